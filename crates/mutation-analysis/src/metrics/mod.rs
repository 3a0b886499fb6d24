//! Mutation metrics: definitions, per-file counters, measures and the
//! computers aggregating them over the project tree.

pub mod catalog;
pub mod computers;
pub mod measures;
pub mod resource_metrics;

pub use catalog::{keys, Metric};
pub use computers::{compute_measures, default_computers, MeasureComputer};
pub use measures::{Component, ComponentKind, ComponentTree, MeasureContext, MeasureStore, MeasureValue};
pub use resource_metrics::ResourceMutationMetrics;
