//! Search strategies (C3): map a position in an abstract index space to a
//! finite block, and a block to the list of candidate results it covers.

pub mod errors;
pub mod exhaustive;
pub mod primes;
pub mod strategy;
pub mod superabundant;

pub use errors::StrategyError;
pub use exhaustive::ExhaustiveSearchStrategy;
pub use strategy::SearchStrategy;
pub use superabundant::SuperabundantSearchStrategy;

/// Resolve a strategy by its name, matching
/// `original_source/riemann/search_strategy.py::search_strategy_by_name`.
pub fn search_strategy_by_name(name: &str) -> Result<Box<dyn SearchStrategy>, StrategyError> {
    match name {
        "ExhaustiveSearchStrategy" => Ok(Box::new(ExhaustiveSearchStrategy::default())),
        "SuperabundantSearchStrategy" => Ok(Box::new(SuperabundantSearchStrategy::default())),
        other => Err(StrategyError::UnknownStrategyName(other.to_string())),
    }
}
