//! Header validation with near-match suggestions

use bcsort_types::{Error, Result};
use similar::TextDiff;

use crate::model::{ColumnLayout, ColumnRole};

/// Number of suggestions offered for a missing column
const SUGGESTION_COUNT: usize = 3;

/// Minimum similarity ratio for a header to be suggested
const SUGGESTION_CUTOFF: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRequirement {
    /// Processing cannot continue without it
    Required,
    /// The dependent feature is disabled when missing
    Optional,
}

/// A column the run expects to find in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedColumn {
    pub role: ColumnRole,
    pub name: String,
    pub requirement: ColumnRequirement,
}

impl ExpectedColumn {
    pub fn required(role: ColumnRole, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            requirement: ColumnRequirement::Required,
        }
    }

    pub fn optional(role: ColumnRole, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
            requirement: ColumnRequirement::Optional,
        }
    }
}

/// An optional column that was not found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn {
    pub role: ColumnRole,
    pub name: String,
    pub suggestions: Vec<String>,
}

/// Outcome of a successful validation
#[derive(Debug, Clone, Default)]
pub struct ColumnReport {
    /// Roles mapped to the header names that were found
    pub layout: ColumnLayout,
    /// Optional columns that were not found
    pub missing: Vec<MissingColumn>,
}

impl ColumnReport {
    /// True when every expected column was present verbatim
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check `expected` against `headers`.
///
/// A missing required column is an error carrying up to three suggestions.
/// Missing optional columns are logged and listed in the report.
pub fn validate_columns(expected: &[ExpectedColumn], headers: &[String]) -> Result<ColumnReport> {
    let mut report = ColumnReport::default();

    for column in expected {
        if headers.iter().any(|h| h == &column.name) {
            report.layout.insert(column.role, column.name.clone());
            continue;
        }

        let suggestions = close_matches(&column.name, headers, SUGGESTION_COUNT, SUGGESTION_CUTOFF);
        match column.requirement {
            ColumnRequirement::Required => {
                return Err(Error::MissingColumn {
                    column: column.name.clone(),
                    suggestions,
                });
            }
            ColumnRequirement::Optional => {
                tracing::warn!(
                    column = %column.name,
                    role = column.role.label(),
                    suggestions = ?suggestions,
                    "optional column not found, {} will be unavailable",
                    column.role.label()
                );
                report.missing.push(MissingColumn {
                    role: column.role,
                    name: column.name.clone(),
                    suggestions,
                });
            }
        }
    }

    Ok(report)
}

/// Best `n` candidates whose similarity to `word` is at least `cutoff`,
/// most similar first. Comparison ignores ASCII case.
pub fn close_matches(word: &str, candidates: &[String], n: usize, cutoff: f32) -> Vec<String> {
    let word = word.to_lowercase();
    let mut scored: Vec<(f32, &String)> = candidates
        .iter()
        .map(|candidate| {
            let lowered = candidate.to_lowercase();
            let ratio = TextDiff::from_chars(word.as_str(), lowered.as_str()).ratio();
            (ratio, candidate)
        })
        .filter(|(ratio, _)| *ratio >= cutoff)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(n).map(|(_, c)| c.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_complete_header_is_clean() {
        let expected = vec![
            ExpectedColumn::required(ColumnRole::Plate, "Plate"),
            ExpectedColumn::optional(ColumnRole::Make, "MVRIS_MAKE_DESC"),
        ];
        let header = headers(&["Plate", "MVRIS_MAKE_DESC", "Other"]);

        let first = validate_columns(&expected, &header).unwrap();
        let second = validate_columns(&expected, &header).unwrap();
        assert!(first.is_clean());
        assert!(second.is_clean());
        assert_eq!(first.layout.get(ColumnRole::Plate), Some("Plate"));
        assert_eq!(first.layout.get(ColumnRole::Make), Some("MVRIS_MAKE_DESC"));
    }

    #[test]
    fn test_missing_required_column_suggests_near_matches() {
        let expected = vec![ExpectedColumn::required(ColumnRole::Plate, "Plate")];
        let header = headers(&["REG_PLATE", "Plates", "Colour"]);

        match validate_columns(&expected, &header) {
            Err(Error::MissingColumn { column, suggestions }) => {
                assert_eq!(column, "Plate");
                assert_eq!(suggestions.first().map(String::as_str), Some("Plates"));
                assert!(suggestions.contains(&"REG_PLATE".to_string()));
                assert!(!suggestions.contains(&"Colour".to_string()));
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_column_is_reported() {
        let expected = vec![
            ExpectedColumn::required(ColumnRole::Plate, "Plate"),
            ExpectedColumn::optional(ColumnRole::Seats, "SEATS"),
        ];
        let header = headers(&["Plate", "Seat"]);

        let report = validate_columns(&expected, &header).unwrap();
        assert!(!report.is_clean());
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].role, ColumnRole::Seats);
        assert_eq!(report.missing[0].suggestions, vec!["Seat".to_string()]);
        assert!(!report.layout.has(ColumnRole::Seats));
    }

    #[test]
    fn test_close_matches_limits_and_orders() {
        let candidates = headers(&["abcd", "abce", "abcf", "abxx", "zzzz"]);
        let matches = close_matches("abcd", &candidates, 3, 0.6);
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0], "abcd");
        assert!(!matches.contains(&"zzzz".to_string()));
    }
}
