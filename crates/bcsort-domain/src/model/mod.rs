//! Domain model types

pub mod columns;
pub mod dataset;
pub mod decision;
pub mod vehicle_details;

pub use columns::{ColumnLayout, ColumnRole};
pub use dataset::{Dataset, Record};
pub use decision::{DecisionMap, DecisionStore, StoredDecision};
pub use vehicle_details::VehicleDetails;
