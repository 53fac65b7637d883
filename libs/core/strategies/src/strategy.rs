use riemann_domain_models::{RiemannDivisorSum, SearchIndex, SearchMetadata};

use crate::errors::StrategyError;

/// Shared contract for both search strategies (C3).
///
/// Grounded on `original_source/riemann/search_strategy.py`'s `SearchStrategy`
/// ABC, generalized with an explicit `advance_past` in place of the
/// original's "generate a dummy block of size one" cursor-advance workaround
/// (see `SPEC_FULL.md` §9 and `DESIGN.md`).
pub trait SearchStrategy: Send {
    /// The `search_index_type` tag this strategy produces.
    fn index_name(&self) -> &'static str;

    /// The practical cold-start index for this strategy: not necessarily the
    /// index space's literal zero point (`SearchIndex::default_for`), but
    /// wherever this strategy's own `Default` cursor actually begins (e.g.
    /// Exhaustive's 5041, to skip candidates below the smallest number
    /// capable of violating Robin's criterion).
    fn effective_default_index(&self) -> SearchIndex;

    /// Rewind so the next generated block begins at `index`. Idempotent.
    fn starting_from(&mut self, index: SearchIndex) -> Result<(), StrategyError>;

    /// The index immediately following `index` in this strategy's space.
    /// Also rewinds the cursor to that position, so a caller can chain
    /// straight into `generate_search_blocks`.
    fn advance_past(&mut self, index: SearchIndex) -> Result<SearchIndex, StrategyError>;

    /// Produce `count` contiguous blocks of at most `batch_size` candidates
    /// each, starting from the current cursor. The cursor advances past the
    /// last produced block.
    fn generate_search_blocks(
        &mut self,
        count: u64,
        batch_size: u64,
    ) -> Result<Vec<SearchMetadata>, StrategyError>;

    /// Compute the outputs for every candidate in `block`'s inclusive range,
    /// in enumeration order. Independent of the strategy's own cursor.
    fn process_block(&self, block: &SearchMetadata) -> Result<Vec<RiemannDivisorSum>, StrategyError>;
}

/// `sigma(n) / (n * ln(ln(n)))`, without the `n <= 2` guard that
/// `riemann_core_arithmetic::witness_value` enforces for its general
/// contract. The superabundant strategy's smallest candidate is `n = 2`
/// (level 1, partition `[1]`), which the spec's own seed scenarios compute
/// a (finite, if not meaningful) witness value for.
pub(crate) fn witness_value_for_candidate(n: &num_bigint::BigUint, divisor_sum: &num_bigint::BigUint) -> f64 {
    use num_traits::ToPrimitive;
    let n_f64 = n.to_f64().unwrap_or(f64::INFINITY);
    let sigma_f64 = divisor_sum.to_f64().unwrap_or(f64::INFINITY);
    sigma_f64 / (n_f64 * n_f64.ln().ln())
}
