//! Decision types

use std::collections::{BTreeMap, BTreeSet, HashMap};

use bcsort_types::BcCode;
use serde::{Deserialize, Serialize};

/// Plate → category for one run
pub type DecisionMap = HashMap<String, BcCode>;

/// Contents of the persisted decision store, keyed by plate
pub type DecisionStore = BTreeMap<String, StoredDecision>;

/// A trusted decision kept across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDecision {
    pub code: BcCode,
    /// Every city label the plate has been judged under
    pub cities: BTreeSet<String>,
}

impl StoredDecision {
    pub fn new(code: BcCode, city: &str) -> Self {
        let mut cities = BTreeSet::new();
        if !city.is_empty() {
            cities.insert(city.to_string());
        }
        Self { code, cities }
    }
}

/// Fold freshly collected decisions into a store.
///
/// Only bus and coach decisions are kept. An existing entry takes the new
/// category and gains `city`; city labels are never removed. Returns the
/// number of entries touched.
pub fn fold_into_store(store: &mut DecisionStore, decisions: &DecisionMap, city: &str) -> usize {
    let city = city.trim();
    let mut touched = 0;

    for (plate, code) in decisions {
        if !code.is_persistable() {
            continue;
        }
        let plate = plate.trim();
        match store.get_mut(plate) {
            Some(entry) => {
                entry.code = *code;
                if !city.is_empty() {
                    entry.cities.insert(city.to_string());
                }
            }
            None => {
                store.insert(plate.to_string(), StoredDecision::new(*code, city));
            }
        }
        touched += 1;
    }

    touched
}
