//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_decision_store;

pub use file_decision_store::FileDecisionStore;
