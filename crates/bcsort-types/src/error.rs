//! Error types for bcsort

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid option {option}: {reason}")]
    InvalidOption { option: String, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Required column '{column}' not found{}", format_suggestions(.suggestions))]
    MissingColumn {
        column: String,
        suggestions: Vec<String>,
    },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Invalid decision code: {0}")]
    InvalidCode(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Broken internal guarantee, e.g. a plate with no merged decision
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message_lists_suggestions() {
        let err = Error::MissingColumn {
            column: "Plate".to_string(),
            suggestions: vec!["PLATE".to_string(), "RegPlate".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Required column 'Plate' not found (did you mean: PLATE, RegPlate?)"
        );
    }

    #[test]
    fn test_missing_column_message_without_suggestions() {
        let err = Error::MissingColumn {
            column: "Plate".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "Required column 'Plate' not found");
    }
}
