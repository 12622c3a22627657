//! Application service layer - config, operator interaction, classification use case

pub mod app;
pub mod browser;
pub mod classifier;
pub mod config;
pub mod demo;
pub mod keys;
pub mod repository;
