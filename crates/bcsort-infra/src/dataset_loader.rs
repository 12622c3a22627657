//! Dataset loading from CSV and spreadsheet files
//!
//! CSV files are read as UTF-8 (a leading BOM is dropped) and fall back to
//! Windows-1252, which is what spreadsheet tools usually export.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bcsort_domain::model::Dataset;
use bcsort_types::{Error, Result};
use calamine::{open_workbook_auto, Data, Reader};

/// Extensions handled by the spreadsheet reader
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Load a dataset, choosing the reader from the file extension.
/// Anything that is not a known spreadsheet extension is read as CSV.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let dataset = if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        load_spreadsheet(path)?
    } else {
        load_csv(path)?
    };

    tracing::debug!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Load a comma-separated file whose first row is the header
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let content = read_file_as_utf8(path)?;
    parse_csv(&content)
}

pub fn parse_csv(content: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(Error::Dataset("file has no header row".to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Dataset::new(headers, rows))
}

/// Load the first worksheet of a spreadsheet; its first row is the header
pub fn load_spreadsheet(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::Spreadsheet(format!("failed to open {}: {}", path.display(), e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Spreadsheet(format!("{} contains no sheets", path.display())))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::Spreadsheet(format!("failed to read sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| Error::Dataset(format!("sheet '{}' is empty", sheet_name)))?
        .iter()
        .map(cell_to_string)
        .collect();

    let rows = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    Ok(Dataset::new(headers, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Read file and convert to UTF-8 if needed
pub fn read_file_as_utf8(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            if had_errors {
                tracing::warn!(path = %path.display(), "some characters could not be decoded");
            }
            decoded.into_owned()
        }
    };

    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}
