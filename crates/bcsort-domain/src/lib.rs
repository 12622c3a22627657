//! Domain layer for bus/coach plate classification
//!
//! Holds the dataset and decision models, the pure services that route
//! plates and merge decisions, and the repository traits implemented by
//! `bcsort-infra`.

pub mod model;
pub mod repository;
pub mod service;
