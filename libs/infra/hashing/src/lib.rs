//! Block hashing (C8): a deterministic fingerprint of a block's outputs.
//!
//! Format: `"<n1>,<w1>,<n2>,<w2>,...,<nk>,<wk>"`, each witness value with
//! exactly four fractional digits, lowercase hex SHA-256 digest. The
//! ordering is whatever order the caller passes in — the enumeration order
//! produced by `process_block` — and is itself a cross-implementation
//! requirement, not something this module enforces.

use riemann_domain_models::RiemannDivisorSum;
use sha2::{Digest, Sha256};

/// Hash an ordered list of `RiemannDivisorSum`. Grounded on
/// `original_source/riemann/postgres_database.py`'s call site
/// (`hash_divisor_sums(divisor_sums)`, invoked on the unfiltered results
/// before THRESHOLD filtering — see `DESIGN.md`).
pub fn hash_divisor_sums(results: &[RiemannDivisorSum]) -> String {
    let mut parts = Vec::with_capacity(results.len() * 2);
    for result in results {
        parts.push(result.n.to_string());
        parts.push(format!("{:.4}", result.witness_value));
    }
    let joined = parts.join(",");
    let digest = Sha256::digest(joined.as_bytes());
    hex::encode(digest)
}
