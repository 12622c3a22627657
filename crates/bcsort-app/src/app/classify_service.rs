//! Classification Service - Core Use Case for Plate Classification
//!
//! This service orchestrates one classification run:
//! 1. Load the dataset and validate its columns
//! 2. Drop rows with unaccepted body types
//! 3. Route plates to known, automatic minibus, or the operator queue
//! 4. Ask the operator about each queued plate
//! 5. Merge the decisions back onto every row and export
//! 6. Record fresh bus/coach decisions in the decision store

use std::path::{Path, PathBuf};

use bcsort_domain::model::ColumnRole;
use bcsort_domain::repository::DecisionStoreRepository;
use bcsort_domain::service::{
    annotate_rows, filter_body_types, merge_decisions, route_plates, validate_columns,
};
use bcsort_infra::dataset_loader::load_dataset;
use bcsort_infra::export::export_dataset;
use bcsort_types::{BcCode, Error, Result};

use super::Interaction;
use crate::classifier::{Classifier, ClassifierOutcome};
use crate::config::Config;
use crate::demo::demo_queue;
use crate::repository::{load_trusted_decisions, open_decision_store};

/// What a classification run did
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationSummary {
    pub output_path: PathBuf,
    pub records: usize,
    /// Rows excluded by the body-type filter
    pub rejected_records: usize,
    /// Accepted rows whose plate was already decided
    pub known_records: usize,
    pub minibus_records: usize,
    /// Distinct plates put to the operator
    pub queued_plates: usize,
    pub judged: usize,
    pub cancelled: bool,
    /// Decision store entries added or changed
    pub stored: Option<usize>,
}

/// Plates and decisions from a demo run, in queue order
pub type DemoResult = Vec<(String, BcCode)>;

/// Classify the plates in `input` and write the annotated copy next to it
pub fn run_classification(
    input: &Path,
    config: &Config,
    io: &mut Interaction<'_>,
) -> Result<ClassificationSummary> {
    let dataset = load_dataset(input)?;
    writeln!(io.out, "{} records", dataset.len())?;

    let report = validate_columns(&config.expected_columns(), dataset.headers())?;
    let layout = report.layout;
    let plate_column = layout
        .get(ColumnRole::Plate)
        .ok_or_else(|| Error::Invariant("plate column missing after validation".to_string()))?;

    let filter = filter_body_types(&dataset, layout.get(ColumnRole::BodyType), &config.body_types);
    if !filter.rejected.is_empty() {
        let values: Vec<&str> = filter
            .rejected_values
            .iter()
            .map(|v| if v.is_empty() { "(blank)" } else { v.as_str() })
            .collect();
        writeln!(
            io.out,
            "{} records rejected with body types: {}",
            filter.rejected.len(),
            values.join(", ")
        )?;
    }

    let store = open_decision_store(config);
    let trusted = load_trusted_decisions(config, store.as_ref())?;
    let routing = route_plates(
        &dataset,
        &filter.accepted,
        &layout,
        &config.routing_options(),
        trusted.as_ref(),
    );
    if config.trust_previous {
        writeln!(io.out, "{} already categorised.", routing.known_rows)?;
    }
    if config.auto_minibus {
        writeln!(
            io.out,
            "{} automatically categorised as minibuses.",
            routing.minibus_rows
        )?;
    }
    writeln!(
        io.out,
        "{} records remaining. {} unique registration numbers.",
        routing.remaining_rows(),
        routing.queue.len()
    )?;

    let outcome = if routing.queue.is_empty() {
        ClassifierOutcome::default()
    } else {
        Classifier::new(&mut *io.keys, &mut *io.browser, &mut *io.out, config.search_url.as_str())
            .with_help_interval(config.help_interval)
            .with_details(layout.has_details())
            .run(&routing.queue)?
    };

    let merged = merge_decisions(&routing.known, &routing.minibus, &outcome.decisions);
    let values = annotate_rows(
        &dataset,
        &filter,
        plate_column,
        layout.get(ColumnRole::Decision),
        &merged,
    )?;
    let annotated = dataset.with_column(&config.decision_column, values);
    let output_path = export_dataset(&annotated, input, config.output_format)?;
    writeln!(io.out, "Results saved in {}.", output_path.display())?;

    let stored = match &store {
        Some(store) => {
            let city = city_label(config, input);
            let changed = store.update(&outcome.decisions, &city)?;
            writeln!(
                io.out,
                "{} decisions recorded in {}.",
                changed,
                store.path().display()
            )?;
            Some(changed)
        }
        None => None,
    };

    Ok(ClassificationSummary {
        output_path,
        records: dataset.len(),
        rejected_records: filter.rejected.len(),
        known_records: routing.known_rows,
        minibus_records: routing.minibus_rows,
        queued_plates: routing.queue.len(),
        judged: outcome.judged,
        cancelled: outcome.cancelled,
        stored,
    })
}

/// Run the classifier over the built-in plate list. Nothing is written.
pub fn run_demo(config: &Config, io: &mut Interaction<'_>) -> Result<DemoResult> {
    let queue = demo_queue();
    let outcome =
        Classifier::new(&mut *io.keys, &mut *io.browser, &mut *io.out, config.search_url.as_str())
            .with_help_interval(config.help_interval)
            .run(&queue)?;

    Ok(queue
        .plates()
        .map(|plate| {
            let code = outcome
                .decisions
                .get(plate)
                .copied()
                .unwrap_or_default();
            (plate.to_string(), code)
        })
        .collect())
}

/// Label stored with new decisions: the configured city, else the input
/// file stem
fn city_label(config: &Config, input: &Path) -> String {
    config
        .city
        .as_deref()
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
}
