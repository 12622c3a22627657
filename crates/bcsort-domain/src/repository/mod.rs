//! Repository trait definitions for data persistence

use bcsort_types::Result;

use crate::model::{DecisionMap, DecisionStore};

/// Store of trusted plate decisions that survives between runs
pub trait DecisionStoreRepository {
    /// Load every stored decision. A store that does not exist yet is empty.
    fn load(&self) -> Result<DecisionStore>;

    /// Merge bus/coach decisions under `city` and persist the whole store.
    /// Returns the number of entries added or changed.
    fn update(&self, decisions: &DecisionMap, city: &str) -> Result<usize>;
}
