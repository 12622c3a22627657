//! Decision merging and row annotation

use bcsort_types::{BcCode, Error, Result};

use crate::model::{Dataset, DecisionMap};
use crate::service::BodyFilterResult;

/// Combine the three decision sources. On a key collision the later
/// source wins: `fresh` over `minibus` over `known`.
pub fn merge_decisions(known: &DecisionMap, minibus: &DecisionMap, fresh: &DecisionMap) -> DecisionMap {
    let mut merged = DecisionMap::with_capacity(known.len() + minibus.len() + fresh.len());
    for source in [known, minibus, fresh] {
        merged.extend(source.iter().map(|(plate, code)| (plate.clone(), *code)));
    }
    merged
}

/// Decision column values for every row of the original dataset.
///
/// Accepted rows take the merged decision for their plate; a plate with no
/// decision is an invariant error. Rejected rows keep their existing cell,
/// or `-` when the dataset had no decision column.
pub fn annotate_rows(
    dataset: &Dataset,
    filter: &BodyFilterResult,
    plate_column: &str,
    decision_column: Option<&str>,
    decisions: &DecisionMap,
) -> Result<Vec<String>> {
    let unjudged = BcCode::Unjudged.to_string();

    dataset
        .records()
        .map(|record| {
            if filter.accepts(record.index()) {
                let plate = record.get(plate_column).unwrap_or("");
                decisions
                    .get(plate)
                    .map(|code| code.to_string())
                    .ok_or_else(|| {
                        Error::Invariant(format!(
                            "no decision for plate '{}' on row {}",
                            plate,
                            record.index() + 1
                        ))
                    })
            } else {
                Ok(decision_column
                    .and_then(|column| record.get_non_empty(column))
                    .map(str::to_string)
                    .unwrap_or_else(|| unjudged.clone()))
            }
        })
        .collect()
}
