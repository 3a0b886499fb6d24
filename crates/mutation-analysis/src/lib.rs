//! Mutation analysis engine.
//!
//! Registers the mutation analysis rule repositories and quality profiles,
//! reads PIT reports, computes mutation metrics, and turns surviving mutants
//! into issues.

pub mod metrics;
pub mod model;
pub mod report;
pub mod reporters;
pub mod rules;
pub mod sensors;
mod xml;
