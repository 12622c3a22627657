//! Use cases driven by the CLI

pub mod classify_service;

use std::io::Write;

use crate::browser::Browser;
use crate::keys::KeySource;

pub use classify_service::{run_classification, run_demo, ClassificationSummary, DemoResult};

/// Operator-facing channels for one run
pub struct Interaction<'a> {
    pub keys: &'a mut dyn KeySource,
    pub browser: &'a mut dyn Browser,
    /// Prompts, counts and results
    pub out: &'a mut dyn Write,
}

impl<'a> Interaction<'a> {
    pub fn new(
        keys: &'a mut dyn KeySource,
        browser: &'a mut dyn Browser,
        out: &'a mut dyn Write,
    ) -> Self {
        Self { keys, browser, out }
    }
}
