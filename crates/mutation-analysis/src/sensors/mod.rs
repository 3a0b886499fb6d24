//! Sensor pipeline: source files, report collection, measures and issues.

pub mod collector;
pub mod context;
pub mod filesystem;
pub mod issue;
pub mod pitest_sensor;
pub mod resolver;
pub mod rules_processor;
pub mod source_metrics;
pub mod test_metrics;

pub use collector::ReportCollector;
pub use context::SensorContext;
pub use filesystem::{FileKind, InputFile, ProjectFileSystem};
pub use issue::Issue;
pub use pitest_sensor::{PitestSensor, SensorReport};
pub use resolver::ResourceResolver;
pub use rules_processor::RulesProcessor;
pub use source_metrics::SourceMetricsWriter;
pub use test_metrics::TestMetricsWriter;
