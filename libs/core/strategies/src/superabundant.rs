use chrono::Utc;
use num_bigint::BigUint;
use riemann_core_partitions::{count as partition_count, enumerate as enumerate_partitions};
use riemann_domain_models::{RiemannDivisorSum, SearchIndex, SearchMetadata};

use crate::errors::StrategyError;
use crate::primes::first_k_primes;
use crate::strategy::{witness_value_for_candidate, SearchStrategy};

/// Iterates over possibly-superabundant numbers: products `p1^e1 * p2^e2 *
/// ... * pk^ek` where `(e1 >= e2 >= ... >= ek)` ranges over the partitions of
/// successive levels `L = 1, 2, 3, ...` in reverse-lexicographic order.
///
/// Grounded on `original_source/riemann/search_strategy.py`'s
/// `SuperabundantSearchStrategy` (the multi-level batch-splitting shape) and
/// `SPEC_FULL.md` §4.2.2 for the exact stepping algorithm.
pub struct SuperabundantSearchStrategy {
    level: u64,
    index_in_level: u64,
}

impl Default for SuperabundantSearchStrategy {
    fn default() -> Self {
        Self { level: 1, index_in_level: 0 }
    }
}

fn expect_superabundant(index: &SearchIndex) -> Result<(u64, u64), StrategyError> {
    match index {
        SearchIndex::SuperabundantEnumerationIndex { level, index_in_level } => Ok((*level, *index_in_level)),
        other => Err(StrategyError::WrongIndexType {
            expected: SearchIndex::SUPERABUNDANT,
            actual: other.index_name().to_string(),
        }),
    }
}

/// Map one partition to its `RiemannDivisorSum`, via the closed-form
/// divisor-sum-of-a-prime-power-product formula
/// `sigma(n) = prod_i (p_i^(e_i+1) - 1) / (p_i - 1)`.
fn compute_for_partition(partition: &[u64]) -> RiemannDivisorSum {
    let primes = first_k_primes(partition.len());
    let mut n = BigUint::from(1u32);
    let mut sigma = BigUint::from(1u32);
    for (prime, &exponent) in primes.iter().zip(partition.iter()) {
        let prime = BigUint::from(*prime);
        n *= prime.pow(exponent as u32);
        let numerator = prime.pow((exponent + 1) as u32) - BigUint::from(1u32);
        let denominator = &prime - BigUint::from(1u32);
        sigma *= numerator / denominator;
    }
    let witness = witness_value_for_candidate(&n, &sigma);
    RiemannDivisorSum::new(n, sigma, witness)
}

impl SearchStrategy for SuperabundantSearchStrategy {
    fn index_name(&self) -> &'static str {
        SearchIndex::SUPERABUNDANT
    }

    fn effective_default_index(&self) -> SearchIndex {
        SearchIndex::SuperabundantEnumerationIndex { level: 1, index_in_level: 0 }
    }

    fn starting_from(&mut self, index: SearchIndex) -> Result<(), StrategyError> {
        let (level, index_in_level) = expect_superabundant(&index)?;
        self.level = level;
        self.index_in_level = index_in_level;
        Ok(())
    }

    fn advance_past(&mut self, index: SearchIndex) -> Result<SearchIndex, StrategyError> {
        let (level, index_in_level) = expect_superabundant(&index)?;
        let level_count = partition_count(level)?;
        let next = if index_in_level + 1 >= level_count {
            SearchIndex::SuperabundantEnumerationIndex { level: level + 1, index_in_level: 0 }
        } else {
            SearchIndex::SuperabundantEnumerationIndex { level, index_in_level: index_in_level + 1 }
        };
        self.starting_from(next.clone())?;
        Ok(next)
    }

    fn generate_search_blocks(
        &mut self,
        count: u64,
        batch_size: u64,
    ) -> Result<Vec<SearchMetadata>, StrategyError> {
        let mut blocks = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let start_level = self.level;
            let start_index = self.index_in_level;

            let mut level = self.level;
            let mut end = self.index_in_level + batch_size - 1;
            loop {
                let level_count = partition_count(level)?;
                if end >= level_count {
                    end -= level_count;
                    level += 1;
                } else {
                    break;
                }
            }

            let now = Utc::now();
            blocks.push(SearchMetadata::new_not_started(
                SearchIndex::SuperabundantEnumerationIndex { level: start_level, index_in_level: start_index },
                SearchIndex::SuperabundantEnumerationIndex { level, index_in_level: end },
                now,
            ));

            let level_count = partition_count(level)?;
            if end == level_count - 1 {
                self.level = level + 1;
                self.index_in_level = 0;
            } else {
                self.level = level;
                self.index_in_level = end + 1;
            }
        }
        Ok(blocks)
    }

    fn process_block(&self, block: &SearchMetadata) -> Result<Vec<RiemannDivisorSum>, StrategyError> {
        let (start_level, start_index) = expect_superabundant(&block.starting_search_index)?;
        let (end_level, end_index) = expect_superabundant(&block.ending_search_index)?;

        let mut results = Vec::new();
        let mut level = start_level;
        loop {
            let level_count = partition_count(level)?;
            let from = if level == start_level { start_index } else { 0 };
            let to = if level == end_level { end_index } else { level_count - 1 };
            for (_, partition) in enumerate_partitions(level, from, to)? {
                results.push(compute_for_partition(&partition));
            }
            if level == end_level {
                break;
            }
            level += 1;
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_four_candidates_match_spec_example() {
        let mut strategy = SuperabundantSearchStrategy::default();
        let blocks = strategy.generate_search_blocks(1, 4).unwrap();
        let results = strategy.process_block(&blocks[0]).unwrap();
        let ns: Vec<u32> = results.iter().map(|r| r.n.to_u32_digits()[0]).collect();
        assert_eq!(ns, vec![2, 4, 6, 8]);
    }

    #[test]
    fn cross_level_block_generation_matches_spec_example() {
        let mut strategy = SuperabundantSearchStrategy::default();
        strategy
            .starting_from(SearchIndex::SuperabundantEnumerationIndex { level: 4, index_in_level: 1 })
            .unwrap();
        let blocks = strategy.generate_search_blocks(2, 4).unwrap();
        assert_eq!(
            blocks[0].starting_search_index,
            SearchIndex::SuperabundantEnumerationIndex { level: 4, index_in_level: 1 }
        );
        assert_eq!(
            blocks[0].ending_search_index,
            SearchIndex::SuperabundantEnumerationIndex { level: 4, index_in_level: 4 }
        );
        assert_eq!(
            blocks[1].starting_search_index,
            SearchIndex::SuperabundantEnumerationIndex { level: 5, index_in_level: 0 }
        );
        assert_eq!(
            blocks[1].ending_search_index,
            SearchIndex::SuperabundantEnumerationIndex { level: 5, index_in_level: 3 }
        );
    }

    #[test]
    fn level_five_index_one_batch_two_matches_spec_example() {
        let mut strategy = SuperabundantSearchStrategy::default();
        strategy
            .starting_from(SearchIndex::SuperabundantEnumerationIndex { level: 5, index_in_level: 1 })
            .unwrap();
        let blocks = strategy.generate_search_blocks(1, 2).unwrap();
        let results = strategy.process_block(&blocks[0]).unwrap();
        let ns: Vec<u32> = results.iter().map(|r| r.n.to_u32_digits()[0]).collect();
        assert_eq!(ns, vec![48, 72]);
    }

    #[test]
    fn advance_past_rolls_over_to_next_level() {
        let mut strategy = SuperabundantSearchStrategy::default();
        let next = strategy
            .advance_past(SearchIndex::SuperabundantEnumerationIndex { level: 1, index_in_level: 0 })
            .unwrap();
        assert_eq!(next, SearchIndex::SuperabundantEnumerationIndex { level: 2, index_in_level: 0 });
    }
}
