//! Domain services

pub mod body_filter;
pub mod column_validator;
pub mod merge;
pub mod routing;

pub use body_filter::{filter_body_types, BodyFilterResult};
pub use column_validator::{
    close_matches, validate_columns, ColumnReport, ColumnRequirement, ExpectedColumn,
    MissingColumn,
};
pub use merge::{annotate_rows, merge_decisions};
pub use routing::{route_plates, PlateQueue, QueuedPlate, Routing, RoutingOptions};
