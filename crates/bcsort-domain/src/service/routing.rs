//! Route accepted rows to exactly one decision source
//!
//! Every plate ends up in one bucket: trusted from a previous run, decided
//! automatically as a minibus, or queued for the operator.

use std::collections::HashMap;

use bcsort_types::BcCode;

use crate::model::{ColumnLayout, ColumnRole, Dataset, DecisionMap, DecisionStore, VehicleDetails};

/// Default gross-weight limit (kg) for automatic minibus classification
pub const DEFAULT_MINIBUS_MAX_GROSS_WEIGHT: f64 = 3501.0;

/// Body type that qualifies for automatic minibus classification
const MINIBUS_BODY: &str = "MINIBUS";

#[derive(Debug, Clone)]
pub struct RoutingOptions {
    /// Reuse settled codes from the decision column and the decision store
    pub trust_previous: bool,
    /// Decide light minibuses without asking
    pub auto_minibus: bool,
    pub minibus_max_gross_weight: f64,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            trust_previous: true,
            auto_minibus: true,
            minibus_max_gross_weight: DEFAULT_MINIBUS_MAX_GROSS_WEIGHT,
        }
    }
}

/// A distinct plate waiting for the operator
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedPlate {
    pub plate: String,
    /// Number of rows carrying this plate
    pub occurrences: usize,
    pub details: VehicleDetails,
}

/// Distinct plates in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlateQueue {
    entries: Vec<QueuedPlate>,
}

impl PlateQueue {
    /// Group plates in first-occurrence order, counting repeats
    pub fn from_plates<I, S>(plates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = Self::default();
        for plate in plates {
            queue.push(plate.into(), VehicleDetails::default());
        }
        queue
    }

    fn push(&mut self, plate: String, details: VehicleDetails) {
        match self.entries.iter_mut().find(|e| e.plate == plate) {
            Some(entry) => entry.occurrences += 1,
            None => self.entries.push(QueuedPlate {
                plate,
                occurrences: 1,
                details,
            }),
        }
    }

    pub fn entries(&self) -> &[QueuedPlate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total rows represented by the queue
    pub fn total_occurrences(&self) -> usize {
        self.entries.iter().map(|e| e.occurrences).sum()
    }

    pub fn plates(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.plate.as_str())
    }
}

/// Buckets produced by [`route_plates`]. Key sets of `known`, `minibus`
/// and the queue are disjoint.
#[derive(Debug, Clone, Default)]
pub struct Routing {
    pub known: DecisionMap,
    pub minibus: DecisionMap,
    pub queue: PlateQueue,
    /// Accepted rows whose plate was already decided
    pub known_rows: usize,
    /// Rows whose plate was decided as a minibus automatically
    pub minibus_rows: usize,
}

impl Routing {
    /// Rows left for the operator
    pub fn remaining_rows(&self) -> usize {
        self.queue.total_occurrences()
    }
}

/// Route the `accepted` rows of `dataset`.
///
/// `layout` must contain the plate column. The body-type and gross-weight
/// columns are needed for automatic minibus detection and are checked by
/// the caller.
pub fn route_plates(
    dataset: &Dataset,
    accepted: &[usize],
    layout: &ColumnLayout,
    options: &RoutingOptions,
    store: Option<&DecisionStore>,
) -> Routing {
    let mut routing = Routing::default();
    let plate_column = layout.get(ColumnRole::Plate).unwrap_or_default();
    let records: Vec<_> = accepted
        .iter()
        .filter_map(|&idx| dataset.record(idx))
        .collect();
    let plate_of = |idx: usize| records[idx].get(plate_column).unwrap_or("").to_string();

    if options.trust_previous {
        let decision_column = layout.get(ColumnRole::Decision);
        for (i, record) in records.iter().enumerate() {
            let plate = plate_of(i);
            let prior = decision_column
                .and_then(|column| record.get(column))
                .and_then(|cell| cell.parse::<BcCode>().ok())
                .filter(BcCode::is_settled);
            let stored = store
                .and_then(|s| s.get(plate.trim()))
                .map(|d| d.code)
                .filter(BcCode::is_persistable);

            if let Some(code) = prior.or(stored) {
                routing.known.insert(plate, code);
            }
        }
    }

    let pending: Vec<usize> = (0..records.len())
        .filter(|&i| !routing.known.contains_key(&plate_of(i)))
        .collect();
    routing.known_rows = records.len() - pending.len();

    let pending: Vec<usize> = if options.auto_minibus {
        let body_column = layout.get(ColumnRole::BodyType);
        let weight_column = layout.get(ColumnRole::GrossWeight);
        for &i in &pending {
            let record = &records[i];
            let is_minibus = body_column
                .and_then(|column| record.get(column))
                .map(|body| body.trim().eq_ignore_ascii_case(MINIBUS_BODY))
                .unwrap_or(false);
            let light = weight_column
                .and_then(|column| record.get(column))
                .and_then(parse_weight)
                .map(|weight| weight <= options.minibus_max_gross_weight)
                .unwrap_or(false);
            if is_minibus && light {
                routing.minibus.insert(plate_of(i), BcCode::Minibus);
            }
        }
        let before = pending.len();
        let rest: Vec<usize> = pending
            .into_iter()
            .filter(|&i| !routing.minibus.contains_key(&plate_of(i)))
            .collect();
        routing.minibus_rows = before - rest.len();
        rest
    } else {
        pending
    };

    let mut index_of: HashMap<String, usize> = HashMap::new();
    for i in pending {
        let plate = plate_of(i);
        match index_of.get(&plate) {
            Some(&pos) => routing.queue.entries[pos].occurrences += 1,
            None => {
                index_of.insert(plate.clone(), routing.queue.entries.len());
                routing.queue.entries.push(QueuedPlate {
                    plate,
                    occurrences: 1,
                    details: VehicleDetails::from_record(&records[i], layout),
                });
            }
        }
    }

    tracing::debug!(
        known = routing.known.len(),
        minibus = routing.minibus.len(),
        queued = routing.queue.len(),
        "plates routed"
    );

    routing
}

/// Parse a weight cell such as `3,500` or `3500.0`
fn parse_weight(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok().filter(|w: &f64| w.is_finite())
}
