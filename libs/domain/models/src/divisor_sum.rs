use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// An immutable witness: `(n, divisor_sum(n), witness_value(n))`.
///
/// `n` and `divisor_sum` are arbitrary-precision, since superabundant
/// candidates at deep levels exceed 64 and even 256 bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiemannDivisorSum {
    pub n: BigUint,
    pub divisor_sum: BigUint,
    pub witness_value: f64,
}

impl RiemannDivisorSum {
    pub fn new(n: BigUint, divisor_sum: BigUint, witness_value: f64) -> Self {
        Self { n, divisor_sum, witness_value }
    }

    /// Equality up to a small tolerance on `witness_value`, matching the
    /// original implementation's `approx_equal`.
    pub fn approx_equal(&self, other: &RiemannDivisorSum, epsilon: f64) -> bool {
        self.n == other.n
            && self.divisor_sum == other.divisor_sum
            && (self.witness_value - other.witness_value).abs() < epsilon
    }
}

/// Summary of a store's contents: the record with the largest `n` and the
/// record with the largest `witness_value` (which may coincide).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub largest_computed_n: RiemannDivisorSum,
    pub largest_witness_value: RiemannDivisorSum,
}
