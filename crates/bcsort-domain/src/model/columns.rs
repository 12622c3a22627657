//! Column roles and the resolved layout of a loaded dataset

use std::collections::HashMap;

/// What a column is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Plate,
    Decision,
    BodyType,
    Make,
    Model,
    Seats,
    GrossWeight,
    UnladenWeight,
}

impl ColumnRole {
    /// Roles whose values are shown to the operator on request
    pub const DETAILS: [ColumnRole; 5] = [
        ColumnRole::Make,
        ColumnRole::Model,
        ColumnRole::Seats,
        ColumnRole::GrossWeight,
        ColumnRole::UnladenWeight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::Plate => "registration plate",
            ColumnRole::Decision => "decision",
            ColumnRole::BodyType => "body type",
            ColumnRole::Make => "make",
            ColumnRole::Model => "model",
            ColumnRole::Seats => "seating capacity",
            ColumnRole::GrossWeight => "gross weight",
            ColumnRole::UnladenWeight => "unladen weight",
        }
    }
}

/// Column names that were found in the dataset header, by role
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    columns: HashMap<ColumnRole, String>,
}

impl ColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: ColumnRole, name: impl Into<String>) {
        self.columns.insert(role, name.into());
    }

    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        self.columns.get(&role).map(String::as_str)
    }

    pub fn has(&self, role: ColumnRole) -> bool {
        self.columns.contains_key(&role)
    }

    /// True when at least one vehicle detail column is available
    pub fn has_details(&self) -> bool {
        ColumnRole::DETAILS.iter().any(|role| self.has(*role))
    }
}
