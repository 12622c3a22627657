//! Writing the annotated dataset

use std::path::{Path, PathBuf};

use bcsort_domain::model::Dataset;
use bcsort_types::{Error, OutputFormat, Result};
use rust_xlsxwriter::{Format, Workbook};

/// Suffix appended to the input file stem
pub const OUTPUT_SUFFIX: &str = "_BC";

/// First free output path next to `input`: `<stem>_BC.<ext>`, then
/// `<stem>_BC1.<ext>`, `<stem>_BC2.<ext>`, ... A stem that already ends in
/// `_BC` is not suffixed again.
pub fn derive_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = if stem.ends_with(OUTPUT_SUFFIX) {
        stem
    } else {
        format!("{}{}", stem, OUTPUT_SUFFIX)
    };

    let extension = format.extension();
    let mut candidate = dir.join(format!("{}.{}", base, extension));
    let mut counter = 0;
    while candidate.exists() {
        counter += 1;
        candidate = dir.join(format!("{}{}.{}", base, counter, extension));
    }
    candidate
}

/// Write `dataset` to a new file next to `input` and return its path
pub fn export_dataset(dataset: &Dataset, input: &Path, format: OutputFormat) -> Result<PathBuf> {
    let output = derive_output_path(input, format);
    match format {
        OutputFormat::Csv => write_csv(dataset, &output)?,
        OutputFormat::Xlsx => write_xlsx(dataset, &output)?,
    }
    tracing::debug!(path = %output.display(), rows = dataset.len(), "dataset exported");
    Ok(output)
}

pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record(dataset.headers())?;
    for row in dataset.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a single-sheet workbook; plain decimal cells are stored as numbers
pub fn write_xlsx(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Vehicles")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in dataset.headers().iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, row) in dataset.rows().iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let written = match as_plain_number(value) {
                Some(number) => sheet.write_number(excel_row, col as u16, number),
                None => sheet.write_string(excel_row, col as u16, value),
            };
            written.map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| Error::Excel(e.to_string()))?;
    Ok(())
}

/// A cell stored as a number only if it reads back unchanged, so `0123`
/// and `1E3` stay text
fn as_plain_number(value: &str) -> Option<f64> {
    let number: f64 = value.parse().ok()?;
    (number.is_finite() && number.to_string() == value).then_some(number)
}
