//! Domain model: mutation operators, mutants, and test descriptors.

pub mod builder;
pub mod mutant;
pub mod operator;
pub mod operators;
pub mod state;
pub mod test_descriptor;

pub use builder::MutantBuilder;
pub use mutant::Mutant;
pub use operator::MutationOperator;
pub use operators::OperatorCatalog;
pub use state::MutantState;
pub use test_descriptor::TestDescriptor;
