//! In-memory tabular dataset

use serde::{Deserialize, Serialize};

/// Header plus rows of string cells, as read from a CSV or spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset. Short rows are padded with empty cells so every
    /// row has one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        (index < self.rows.len()).then_some(Record {
            dataset: self,
            index,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        (0..self.rows.len()).map(move |index| Record {
            dataset: self,
            index,
        })
    }

    /// Return a copy with `name` set to `values`, replacing the column in
    /// place if it exists and appending it otherwise.
    pub fn with_column(&self, name: &str, values: Vec<String>) -> Dataset {
        let mut headers = self.headers.clone();
        let position = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                headers.push(name.to_string());
                headers.len() - 1
            }
        };

        let rows = self
            .rows
            .iter()
            .zip(values.into_iter().chain(std::iter::repeat(String::new())))
            .map(|(row, value)| {
                let mut row = row.clone();
                if position < row.len() {
                    row[position] = value;
                } else {
                    row.push(value);
                }
                row
            })
            .collect();

        Dataset { headers, rows }
    }
}

/// A row viewed as a column-name → cell mapping
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> Record<'a> {
    /// Row position in the dataset
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell under `column`, or `None` if the dataset has no such column
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.dataset.column_index(column)?;
        self.dataset.rows[self.index].get(idx).map(String::as_str)
    }

    /// Like [`Record::get`] but treats blank cells as missing
    pub fn get_non_empty(&self, column: &str) -> Option<&'a str> {
        self.get(column).filter(|value| !value.trim().is_empty())
    }
}
