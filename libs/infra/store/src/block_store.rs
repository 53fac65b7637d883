//! The block store (C4): a durable, concurrency-safe table of search blocks.
//!
//! Claim/finish/fail semantics are grounded definitively on
//! `original_source/riemann/postgres_database.py` (`claim_next_search_block`,
//! `finish_search_block`, `mark_block_as_failed`), restated here over
//! libSQL transactions in the shape of `db-turso`'s
//! `repositories/job/mod.rs::JobRepository`.

use chrono::{DateTime, Duration, Utc};
use libsql::{params, Connection};
use riemann_domain_models::{RiemannDivisorSum, SearchMetadata, SummaryStats};
use tracing::{info, instrument, warn};

use crate::errors::StoreError;
use crate::queries;
use crate::row::{row_to_divisor_sum, row_to_metadata};

pub struct BlockStore {
    connection: Connection,
}

impl BlockStore {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// All blocks, ordered by `creation_time` ascending.
    pub async fn load_metadata(&self) -> Result<Vec<SearchMetadata>, StoreError> {
        let mut rows = self.connection.query(queries::SELECT_ALL_METADATA, ()).await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(row_to_metadata(&row)?);
        }
        Ok(out)
    }

    /// All persisted results, ordered by `n` ascending.
    pub async fn load(&self) -> Result<Vec<RiemannDivisorSum>, StoreError> {
        let mut rows = self.connection.query(queries::SELECT_ALL_RESULTS, ()).await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(row_to_divisor_sum(&row)?);
        }
        out.sort_by(|a, b| a.n.cmp(&b.n));
        Ok(out)
    }

    /// `(record with largest n, record with largest witness_value)`, or
    /// `None` if the results table is empty.
    pub async fn summarize(&self) -> Result<Option<SummaryStats>, StoreError> {
        let mut largest_n_rows = self.connection.query(queries::SELECT_LARGEST_N, ()).await?;
        let Some(largest_n_row) = largest_n_rows.next().await? else {
            return Ok(None);
        };
        let largest_computed_n = row_to_divisor_sum(&largest_n_row)?;

        let mut largest_witness_rows = self.connection.query(queries::SELECT_LARGEST_WITNESS, ()).await?;
        let largest_witness_row = largest_witness_rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Internal("results table non-empty but witness query found nothing".into()))?;
        let largest_witness_value = row_to_divisor_sum(&largest_witness_row)?;

        Ok(Some(SummaryStats { largest_computed_n, largest_witness_value }))
    }

    /// Insert all of `blocks`, all-or-nothing. Each is forced to state
    /// NOT_STARTED by construction; a uniqueness violation on the
    /// `(search_index_type, starting_search_index, ending_search_index)`
    /// triple rolls the whole batch back.
    #[instrument(skip(self, blocks), fields(count = blocks.len()))]
    pub async fn insert_search_blocks(&mut self, blocks: &[SearchMetadata]) -> Result<(), StoreError> {
        let tx = self.connection.transaction().await?;
        for block in blocks {
            let result = tx
                .execute(
                    queries::INSERT_BLOCK,
                    params![
                        block.search_index_type().to_string(),
                        block.starting_search_index.to_canonical_string(),
                        block.ending_search_index.to_canonical_string(),
                        block.creation_time.to_rfc3339(),
                    ],
                )
                .await;

            if let Err(e) = result {
                tx.rollback().await?;
                let message = e.to_string();
                if message.contains("UNIQUE constraint failed") {
                    return Err(StoreError::UniqueViolation(message));
                }
                return Err(StoreError::StoreUnavailable(e));
            }
        }
        tx.commit().await?;
        info!(target: "riemann_infra_store", inserted = blocks.len(), "inserted search blocks");
        Ok(())
    }

    /// Atomically transition the oldest-by-`creation_time` NOT_STARTED or
    /// FAILED block of `index_type` to IN_PROGRESS. Two concurrent callers
    /// never receive the same block: the claiming UPDATE is guarded by the
    /// same state predicate the SELECT used, so a losing racer's UPDATE
    /// affects zero rows and it rolls back to retry.
    #[instrument(skip(self))]
    pub async fn claim_next_search_block(&mut self, index_type: &str) -> Result<SearchMetadata, StoreError> {
        let tx = self.connection.transaction().await?;

        let mut candidate_rows = tx.query(queries::SELECT_CLAIMABLE_ID, params![index_type]).await?;
        let Some(candidate_row) = candidate_rows.next().await? else {
            tx.rollback().await?;
            return Err(StoreError::NotAvailable);
        };
        let id: i64 = candidate_row.get(0)?;
        drop(candidate_rows);

        let now = Utc::now().to_rfc3339();
        let claimed = tx.execute(queries::CLAIM_BLOCK_BY_ID, params![now, id]).await?;
        if claimed == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotAvailable);
        }

        let mut metadata_rows = tx.query(queries::SELECT_METADATA_BY_ID, params![id]).await?;
        let metadata_row = metadata_rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Internal("claimed block vanished before re-read".into()))?;
        let metadata = row_to_metadata(&metadata_row)?;
        drop(metadata_rows);

        tx.commit().await?;
        Ok(metadata)
    }

    /// Verify `block` is IN_PROGRESS, mark it FINISHED with the hash of the
    /// unfiltered `results`, and persist the subset with
    /// `witness_value > threshold`. Rolls back entirely on any failure.
    #[instrument(skip(self, block, results), fields(results = results.len()))]
    pub async fn finish_search_block(
        &mut self,
        block: &SearchMetadata,
        results: &[RiemannDivisorSum],
        threshold: f64,
    ) -> Result<(), StoreError> {
        let index_type = block.search_index_type().to_string();
        let starting = block.starting_search_index.to_canonical_string();
        let ending = block.ending_search_index.to_canonical_string();

        let tx = self.connection.transaction().await?;

        let mut state_rows = tx
            .query(queries::SELECT_STATE_BY_TRIPLE, params![index_type.clone(), starting.clone(), ending.clone()])
            .await?;
        let Some(state_row) = state_rows.next().await? else {
            tx.rollback().await?;
            return Err(StoreError::IllegalState("block not found".into()));
        };
        let state: String = state_row.get(0)?;
        drop(state_rows);
        if state != "IN_PROGRESS" {
            tx.rollback().await?;
            return Err(StoreError::IllegalState(format!("block is {state}, not IN_PROGRESS")));
        }

        let block_hash = riemann_infra_hashing::hash_divisor_sums(results);
        let now = Utc::now().to_rfc3339();
        tx.execute(
            queries::FINISH_BLOCK,
            params![now, block_hash, index_type, starting, ending],
        )
        .await?;

        for result in results.iter().filter(|r| r.witness_value > threshold) {
            tx.execute(
                queries::INSERT_RESULT,
                params![result.n.to_string(), result.divisor_sum.to_string(), result.witness_value],
            )
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Unconditionally revert `block` to FAILED, regardless of its prior
    /// state. Matches `postgres_database.py::mark_block_as_failed`'s
    /// unguarded UPDATE (see `DESIGN.md`).
    #[instrument(skip(self, block))]
    pub async fn mark_block_as_failed(&mut self, block: &SearchMetadata) -> Result<(), StoreError> {
        self.connection
            .execute(
                queries::MARK_FAILED,
                params![
                    block.search_index_type().to_string(),
                    block.starting_search_index.to_canonical_string(),
                    block.ending_search_index.to_canonical_string(),
                ],
            )
            .await?;
        Ok(())
    }

    /// Revert every IN_PROGRESS block whose `start_time` predates `now -
    /// staleness`. Used by the janitor loop (C7).
    #[instrument(skip(self))]
    pub async fn revert_stale_in_progress_blocks(&mut self, staleness: Duration) -> Result<u64, StoreError> {
        let threshold: DateTime<Utc> = Utc::now() - staleness;
        let reverted = self
            .connection
            .execute(queries::MARK_STALE_IN_PROGRESS_AS_FAILED, params![threshold.to_rfc3339()])
            .await?;
        if reverted > 0 {
            warn!(target: "riemann_infra_store", reverted, "reverted stale in-progress blocks to FAILED");
        }
        Ok(reverted)
    }
}
