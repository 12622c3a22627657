//! Auxiliary vehicle data shown to the operator on request

use serde::{Deserialize, Serialize};

use crate::model::{ColumnLayout, ColumnRole, Record};

/// Descriptive fields for one plate, taken from the first row carrying it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub make: Option<String>,
    pub model: Option<String>,
    pub seats: Option<String>,
    pub gross_weight: Option<String>,
    pub unladen_weight: Option<String>,
}

impl VehicleDetails {
    pub fn from_record(record: &Record<'_>, layout: &ColumnLayout) -> Self {
        let field = |role: ColumnRole| {
            layout
                .get(role)
                .and_then(|column| record.get_non_empty(column))
                .map(str::to_string)
        };
        Self {
            make: field(ColumnRole::Make),
            model: field(ColumnRole::Model),
            seats: field(ColumnRole::Seats),
            gross_weight: field(ColumnRole::GrossWeight),
            unladen_weight: field(ColumnRole::UnladenWeight),
        }
    }

    /// Labelled lines for display; missing values show as `n/a`
    pub fn lines(&self) -> Vec<String> {
        let rows = [
            ("Make:", &self.make),
            ("Model:", &self.model),
            ("Seats:", &self.seats),
            ("Gross Weight:", &self.gross_weight),
            ("Unladen Weight:", &self.unladen_weight),
        ];
        rows.iter()
            .map(|(label, value)| format!("  {:<16}{}", label, value.as_deref().unwrap_or("n/a")))
            .collect()
    }
}
