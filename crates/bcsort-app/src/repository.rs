//! Repository adapters for persistence layer

use bcsort_domain::model::DecisionStore;
use bcsort_domain::repository::DecisionStoreRepository;
use bcsort_infra::persistence::FileDecisionStore;
use bcsort_types::Result;

use crate::config::Config;

/// Open the file-based decision store, if one is configured
pub fn open_decision_store(config: &Config) -> Option<FileDecisionStore> {
    config
        .store_path
        .as_ref()
        .map(|path| FileDecisionStore::new(path.clone()))
}

/// Stored decisions to trust for this run, or `None` when previous
/// decisions are ignored or no store is configured
pub fn load_trusted_decisions(
    config: &Config,
    store: Option<&FileDecisionStore>,
) -> Result<Option<DecisionStore>> {
    match store {
        Some(store) if config.trust_previous => {
            let decisions = store.load()?;
            tracing::debug!(
                path = %store.path().display(),
                entries = decisions.len(),
                "decision store loaded"
            );
            Ok(Some(decisions))
        }
        _ => Ok(None),
    }
}
