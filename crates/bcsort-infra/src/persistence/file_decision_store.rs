//! File-based implementation of DecisionStoreRepository
//!
//! The store is a CSV with columns `Plate,BusCoach,City`. `City` holds a
//! comma-separated list of city labels.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use bcsort_domain::model::decision::fold_into_store;
use bcsort_domain::model::{DecisionMap, DecisionStore, StoredDecision};
use bcsort_domain::repository::DecisionStoreRepository;
use bcsort_types::{BcCode, Result};

#[derive(Debug, Serialize, Deserialize)]
struct StoreRow {
    #[serde(rename = "Plate")]
    plate: String,
    #[serde(rename = "BusCoach")]
    bus_coach: String,
    #[serde(rename = "City", default)]
    city: String,
}

/// Decision store backed by a single CSV file.
///
/// There is no locking; only one process should update a given file.
pub struct FileDecisionStore {
    path: PathBuf,
}

impl FileDecisionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, store: &DecisionStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for (plate, decision) in store {
            writer.serialize(StoreRow {
                plate: plate.clone(),
                bus_coach: decision.code.to_string(),
                city: decision.cities.iter().cloned().collect::<Vec<_>>().join(","),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl DecisionStoreRepository for FileDecisionStore {
    fn load(&self) -> Result<DecisionStore> {
        let mut store = DecisionStore::new();
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "decision store not found, starting empty");
            return Ok(store);
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        for (row_idx, result) in reader.deserialize::<StoreRow>().enumerate() {
            let row = result?;
            let code = match row.bus_coach.parse::<BcCode>() {
                Ok(code) if code.is_persistable() => code,
                Ok(code) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        row = row_idx + 2,
                        "skipping decision store entry with code {}, only B and C are kept",
                        code
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        row = row_idx + 2,
                        "skipping decision store entry: {}",
                        e
                    );
                    continue;
                }
            };
            let cities: BTreeSet<String> = row
                .city
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            store.insert(row.plate.trim().to_string(), StoredDecision { code, cities });
        }

        Ok(store)
    }

    fn update(&self, decisions: &DecisionMap, city: &str) -> Result<usize> {
        let mut store = self.load()?;
        let touched = fold_into_store(&mut store, decisions, city);
        self.persist(&store)?;
        tracing::debug!(
            path = %self.path.display(),
            touched,
            total = store.len(),
            "decision store updated"
        );
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn decisions(entries: &[(&str, BcCode)]) -> DecisionMap {
        entries
            .iter()
            .map(|(plate, code)| (plate.to_string(), *code))
            .collect()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let repo = FileDecisionStore::new(dir.path().join("decisions.csv"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_parses_cities_and_trims_plates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("decisions.csv");
        std::fs::write(
            &path,
            "Plate,BusCoach,City\n SK07CAA ,B,\"Leeds, York\"\nSK07CAE,C,\nSK07CAO,Bus,Leeds\n",
        )
        .unwrap();

        let store = FileDecisionStore::new(&path).load().unwrap();
        assert_eq!(store.len(), 2);
        let entry = &store["SK07CAA"];
        assert_eq!(entry.code, BcCode::Bus);
        assert_eq!(entry.cities.len(), 2);
        assert!(entry.cities.contains("York"));
        assert!(store["SK07CAE"].cities.is_empty());
    }

    #[test]
    fn test_load_skips_codes_other_than_bus_and_coach() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("decisions.csv");
        std::fs::write(
            &path,
            "Plate,BusCoach,City\nX,-,Leeds\nY,U,Leeds\nZ,M,Leeds\nW,C,Leeds\n",
        )
        .unwrap();

        let store = FileDecisionStore::new(&path).load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store["W"].code, BcCode::Coach);
    }

    #[test]
    fn test_update_merges_cities() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("decisions.csv");
        std::fs::write(&path, "Plate,BusCoach,City\nX,B,Leeds\n").unwrap();
        let repo = FileDecisionStore::new(&path);

        let touched = repo
            .update(&decisions(&[("X", BcCode::Coach), ("Y", BcCode::Minibus)]), "York")
            .unwrap();
        assert_eq!(touched, 1);

        let store = repo.load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store["X"].code, BcCode::Coach);
        let cities: Vec<&str> = store["X"].cities.iter().map(String::as_str).collect();
        assert_eq!(cities, vec!["Leeds", "York"]);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Plate,BusCoach,City\nX,C,\"Leeds,York\"\n");
    }

    #[test]
    fn test_update_creates_store_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("decisions.csv");
        let repo = FileDecisionStore::new(&path);

        repo.update(&decisions(&[("A", BcCode::Bus)]), "Bath").unwrap();
        assert!(path.exists());
        assert_eq!(repo.load().unwrap()["A"].cities.len(), 1);
    }
}
