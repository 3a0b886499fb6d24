//! Shared value types.

pub mod effort;
pub mod language;

pub use effort::Effort;
pub use language::Language;
