use chrono::Utc;
use num_bigint::BigUint;
use riemann_domain_models::{RiemannDivisorSum, SearchIndex, SearchMetadata};

use crate::errors::StrategyError;
use crate::strategy::SearchStrategy;

/// Tries every positive integer starting from 5041, the practical starting
/// point used in `original_source/riemann/search_strategy.py`.
pub struct ExhaustiveSearchStrategy {
    cursor: BigUint,
}

impl Default for ExhaustiveSearchStrategy {
    fn default() -> Self {
        Self { cursor: BigUint::from(5041u32) }
    }
}

fn expect_exhaustive(index: &SearchIndex) -> Result<&BigUint, StrategyError> {
    match index {
        SearchIndex::ExhaustiveSearchIndex { n } => Ok(n),
        other => Err(StrategyError::WrongIndexType {
            expected: SearchIndex::EXHAUSTIVE,
            actual: other.index_name().to_string(),
        }),
    }
}

impl SearchStrategy for ExhaustiveSearchStrategy {
    fn index_name(&self) -> &'static str {
        SearchIndex::EXHAUSTIVE
    }

    fn effective_default_index(&self) -> SearchIndex {
        SearchIndex::ExhaustiveSearchIndex { n: BigUint::from(5041u32) }
    }

    fn starting_from(&mut self, index: SearchIndex) -> Result<(), StrategyError> {
        self.cursor = expect_exhaustive(&index)?.clone();
        Ok(())
    }

    fn advance_past(&mut self, index: SearchIndex) -> Result<SearchIndex, StrategyError> {
        let next = expect_exhaustive(&index)? + BigUint::from(1u32);
        self.cursor = next.clone();
        Ok(SearchIndex::ExhaustiveSearchIndex { n: next })
    }

    fn generate_search_blocks(
        &mut self,
        count: u64,
        batch_size: u64,
    ) -> Result<Vec<SearchMetadata>, StrategyError> {
        let mut blocks = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let starting = self.cursor.clone();
            let ending = &starting + BigUint::from(batch_size - 1);
            let now = Utc::now();
            blocks.push(SearchMetadata::new_not_started(
                SearchIndex::ExhaustiveSearchIndex { n: starting },
                SearchIndex::ExhaustiveSearchIndex { n: ending.clone() },
                now,
            ));
            self.cursor = ending + BigUint::from(1u32);
        }
        Ok(blocks)
    }

    fn process_block(&self, block: &SearchMetadata) -> Result<Vec<RiemannDivisorSum>, StrategyError> {
        let start = expect_exhaustive(&block.starting_search_index)?;
        let end = expect_exhaustive(&block.ending_search_index)?;
        Ok(riemann_core_arithmetic::compute_batch(start, end)?)
    }
}
