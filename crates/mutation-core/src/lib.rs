//! Core types, errors, configuration, tracing, and constants shared by the
//! mutation analysis crates.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
