//! The arithmetic kernel (C1): divisor sums, witness values, and batch
//! computation over a contiguous range of candidates.
//!
//! Grounded on `original_source/riemann/divisor.py`: O(sqrt(n)) trial
//! division for the exact divisor sum, and the same witness formula,
//! `sigma(n) / (n * ln(ln(n)))`.

pub mod errors;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rayon::prelude::*;
use riemann_domain_models::RiemannDivisorSum;

pub use errors::ArithmeticError;

/// Sum of the positive divisors of `n`, computed by trial division up to
/// `sqrt(n)`. Exact for all `n >= 1`.
pub fn divisor_sum(n: &BigUint) -> Result<BigUint, ArithmeticError> {
    if n.is_zero() {
        return Err(ArithmeticError::ZeroInput);
    }
    if n.is_one() {
        return Ok(BigUint::one());
    }

    let mut sum = BigUint::zero();
    let sqrt_n = n.sqrt();
    let mut divisor = BigUint::one();
    while &divisor <= &sqrt_n {
        if (n % &divisor).is_zero() {
            let complement = n / &divisor;
            sum += &divisor;
            if complement != divisor {
                sum += &complement;
            }
        }
        divisor += BigUint::one();
    }
    Ok(sum)
}

/// `sigma(n) / (n * ln(ln(n)))`. Undefined for `n <= 2` since `ln(ln(n))`
/// is non-positive there.
pub fn witness_value(n: &BigUint, divisor_sum_n: &BigUint) -> Result<f64, ArithmeticError> {
    if n <= &BigUint::from(2u32) {
        return Err(ArithmeticError::UndefinedWitness(n.to_string()));
    }
    let n_f64 = n.to_f64().unwrap_or(f64::INFINITY);
    let sigma_f64 = divisor_sum_n.to_f64().unwrap_or(f64::INFINITY);
    Ok(sigma_f64 / (n_f64 * n_f64.ln().ln()))
}

/// Compute a `RiemannDivisorSum` for every integer in the inclusive range
/// `[start, end]`, in ascending order. Parallelized over candidates with
/// rayon; the returned order matches ascending `n` regardless of scheduling.
pub fn compute_batch(start: &BigUint, end: &BigUint) -> Result<Vec<RiemannDivisorSum>, ArithmeticError> {
    if start > end {
        return Ok(Vec::new());
    }
    let span = (end - start).to_u64().unwrap_or(u64::MAX);
    let candidates: Vec<BigUint> = (0..=span).map(|offset| start + BigUint::from(offset)).collect();

    candidates
        .into_par_iter()
        .map(|n| {
            let sigma = divisor_sum(&n)?;
            let witness = witness_value(&n, &sigma)?;
            Ok(RiemannDivisorSum::new(n, sigma, witness))
        })
        .collect()
}
