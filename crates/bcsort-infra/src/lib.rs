//! Infrastructure layer - file formats and persistence

pub mod dataset_loader;
pub mod export;
pub mod persistence;
