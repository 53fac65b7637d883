use thiserror::Error;

/// Errors from the search strategies (C3). Maps to INVALID_ARGUMENT at the
/// application boundary.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("unknown search strategy name '{0}', expected one of ExhaustiveSearchStrategy, SuperabundantSearchStrategy")]
    UnknownStrategyName(String),

    #[error("index type '{actual}' does not match this strategy's index type '{expected}'")]
    WrongIndexType { expected: &'static str, actual: String },

    #[error(transparent)]
    Partition(#[from] riemann_core_partitions::PartitionError),

    #[error(transparent)]
    Arithmetic(#[from] riemann_core_arithmetic::ArithmeticError),

    #[error(transparent)]
    Model(#[from] riemann_domain_models::ModelError),
}
