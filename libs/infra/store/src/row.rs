use chrono::{DateTime, Utc};
use libsql::Row;
use num_bigint::BigUint;
use riemann_domain_models::{RiemannDivisorSum, SearchIndex, SearchMetadata};

use crate::errors::StoreError;

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Internal(format!("malformed timestamp '{value}': {e}")))
}

pub(crate) fn row_to_metadata(row: &Row) -> Result<SearchMetadata, StoreError> {
    let search_index_type: String = row.get(0)?;
    let starting: String = row.get(1)?;
    let ending: String = row.get(2)?;
    let state_str: String = row.get(3)?;
    let creation_time: String = row.get(4)?;
    let start_time: Option<String> = row.get(5)?;
    let end_time: Option<String> = row.get(6)?;
    let block_hash: Option<String> = row.get(7)?;

    let starting_search_index = SearchIndex::from_canonical_string(&search_index_type, &starting)
        .map_err(|e| StoreError::Internal(e.to_string()))?;
    let ending_search_index = SearchIndex::from_canonical_string(&search_index_type, &ending)
        .map_err(|e| StoreError::Internal(e.to_string()))?;
    let state = riemann_domain_models::SearchBlockState::from_db_str(&state_str)
        .ok_or_else(|| StoreError::Internal(format!("unknown block state '{state_str}'")))?;

    Ok(SearchMetadata {
        starting_search_index,
        ending_search_index,
        state,
        creation_time: parse_timestamp(&creation_time)?,
        start_time: start_time.map(|s| parse_timestamp(&s)).transpose()?,
        end_time: end_time.map(|s| parse_timestamp(&s)).transpose()?,
        block_hash,
    })
}

pub(crate) fn row_to_divisor_sum(row: &Row) -> Result<RiemannDivisorSum, StoreError> {
    let n: String = row.get(0)?;
    let divisor_sum: String = row.get(1)?;
    let witness_value: f64 = row.get(2)?;
    let n = n
        .parse::<BigUint>()
        .map_err(|e| StoreError::Internal(format!("malformed stored n '{n}': {e}")))?;
    let divisor_sum = divisor_sum
        .parse::<BigUint>()
        .map_err(|e| StoreError::Internal(format!("malformed stored divisor_sum '{divisor_sum}': {e}")))?;
    Ok(RiemannDivisorSum::new(n, divisor_sum, witness_value))
}
