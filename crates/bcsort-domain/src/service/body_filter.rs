//! Body-type filtering

use std::collections::{BTreeSet, HashSet};

use crate::model::Dataset;

/// Rows split by whether their body type is accepted
#[derive(Debug, Clone, Default)]
pub struct BodyFilterResult {
    /// Indices of rows that go on to routing, in dataset order
    pub accepted: Vec<usize>,
    /// Indices of rows excluded from classification
    pub rejected: Vec<usize>,
    /// Distinct body types seen on rejected rows
    pub rejected_values: BTreeSet<String>,
}

impl BodyFilterResult {
    pub fn accepts(&self, index: usize) -> bool {
        self.accepted.binary_search(&index).is_ok()
    }
}

/// Keep rows whose `body_column` value is one of `accepted_types`,
/// ignoring ASCII case.
///
/// An empty accepted set, or no body column, accepts every row.
pub fn filter_body_types(
    dataset: &Dataset,
    body_column: Option<&str>,
    accepted_types: &[String],
) -> BodyFilterResult {
    let mut result = BodyFilterResult::default();

    let column = match body_column {
        Some(column) if !accepted_types.is_empty() => column,
        _ => {
            result.accepted = (0..dataset.len()).collect();
            return result;
        }
    };

    let accepted_set: HashSet<String> = accepted_types
        .iter()
        .map(|s| s.trim().to_ascii_uppercase())
        .collect();

    for record in dataset.records() {
        let body = record.get(column).unwrap_or("").trim();
        if accepted_set.contains(&body.to_ascii_uppercase()) {
            result.accepted.push(record.index());
        } else {
            result.rejected.push(record.index());
            result.rejected_values.insert(body.to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(bodies: &[&str]) -> Dataset {
        Dataset::new(
            vec!["Plate".into(), "Body".into()],
            bodies
                .iter()
                .enumerate()
                .map(|(i, body)| vec![format!("P{}", i), body.to_string()])
                .collect(),
        )
    }

    fn types(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rejected_rows_are_reported() {
        let data = dataset(&["S/D BUS/COACH", "TIPPER", "MINIBUS", "TIPPER", "VAN"]);
        let result = filter_body_types(&data, Some("Body"), &types(&["S/D BUS/COACH", "MINIBUS"]));

        assert_eq!(result.accepted, vec![0, 2]);
        assert_eq!(result.rejected, vec![1, 3, 4]);
        let values: Vec<&str> = result.rejected_values.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["TIPPER", "VAN"]);
        assert!(result.accepts(2));
        assert!(!result.accepts(3));
    }

    #[test]
    fn test_body_types_match_ignoring_case() {
        let data = dataset(&["minibus", "Minibus", "s/d bus/coach", "Tipper"]);
        let result = filter_body_types(&data, Some("Body"), &types(&["MINIBUS", "S/D BUS/COACH"]));
        assert_eq!(result.accepted, vec![0, 1, 2]);
        let values: Vec<&str> = result.rejected_values.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["Tipper"]);
    }

    #[test]
    fn test_empty_accepted_set_keeps_everything() {
        let data = dataset(&["TIPPER", "VAN"]);
        let result = filter_body_types(&data, Some("Body"), &[]);
        assert_eq!(result.accepted, vec![0, 1]);
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_no_body_column_keeps_everything() {
        let data = dataset(&["TIPPER"]);
        let result = filter_body_types(&data, None, &types(&["MINIBUS"]));
        assert_eq!(result.accepted, vec![0]);
    }
}
