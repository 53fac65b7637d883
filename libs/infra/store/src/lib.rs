//! The libSQL-backed block store (C4). One client covers a local file, a
//! shared in-memory database, or a remote Turso endpoint — see `client.rs`.

pub mod block_store;
pub mod client;
pub mod errors;
pub mod queries;
pub mod row;
pub mod schema;

pub use block_store::BlockStore;
pub use client::BlockStoreClient;
pub use errors::StoreError;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use riemann_domain_models::{SearchIndex, SearchMetadata};

    async fn memory_store() -> BlockStore {
        let client = BlockStoreClient::connect(":memory:", None).await.unwrap();
        BlockStore::new(client.connection().unwrap())
    }

    fn block(n_start: u32, n_end: u32, creation_time: chrono::DateTime<chrono::Utc>) -> SearchMetadata {
        SearchMetadata::new_not_started(
            SearchIndex::ExhaustiveSearchIndex { n: num_bigint::BigUint::from(n_start) },
            SearchIndex::ExhaustiveSearchIndex { n: num_bigint::BigUint::from(n_end) },
            creation_time,
        )
    }

    #[tokio::test]
    async fn claim_on_empty_store_is_not_available() {
        let mut store = memory_store().await;
        let err = store.claim_next_search_block(SearchIndex::EXHAUSTIVE).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAvailable));
    }

    #[tokio::test]
    async fn insert_claim_finish_round_trip() {
        let mut store = memory_store().await;
        let now = chrono::Utc::now();
        store.insert_search_blocks(&[block(100, 103, now)]).await.unwrap();

        let claimed = store.claim_next_search_block(SearchIndex::EXHAUSTIVE).await.unwrap();
        assert_eq!(claimed.state, riemann_domain_models::SearchBlockState::InProgress);

        let results = riemann_core_arithmetic::compute_batch(
            &num_bigint::BigUint::from(100u32),
            &num_bigint::BigUint::from(103u32),
        )
        .unwrap();
        store.finish_search_block(&claimed, &results, 1.767).await.unwrap();

        let all = store.load_metadata().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].state, riemann_domain_models::SearchBlockState::Finished);
        assert!(all[0].block_hash.is_some());
    }

    #[tokio::test]
    async fn finish_on_non_in_progress_block_is_illegal_state() {
        let mut store = memory_store().await;
        let now = chrono::Utc::now();
        let b = block(100, 103, now);
        store.insert_search_blocks(&[b.clone()]).await.unwrap();
        let results = riemann_core_arithmetic::compute_batch(
            &num_bigint::BigUint::from(100u32),
            &num_bigint::BigUint::from(103u32),
        )
        .unwrap();
        let err = store.finish_search_block(&b, &results, 1.767).await.unwrap_err();
        assert!(matches!(err, StoreError::IllegalState(_)));
    }

    #[tokio::test]
    async fn mark_block_as_failed_is_unconditional() {
        let mut store = memory_store().await;
        let now = chrono::Utc::now();
        let b = block(100, 103, now);
        store.insert_search_blocks(&[b.clone()]).await.unwrap();
        // Still NOT_STARTED; marking as failed anyway must succeed.
        store.mark_block_as_failed(&b).await.unwrap();
        let all = store.load_metadata().await.unwrap();
        assert_eq!(all[0].state, riemann_domain_models::SearchBlockState::Failed);
    }

    #[tokio::test]
    async fn duplicate_range_is_unique_violation() {
        let mut store = memory_store().await;
        let now = chrono::Utc::now();
        store.insert_search_blocks(&[block(100, 103, now)]).await.unwrap();
        let err = store.insert_search_blocks(&[block(100, 103, now)]).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    /// Concurrent-claim serialization guarantee (seed scenario 6). A bare
    /// `:memory:` connection is private to its own `Connection`, so this
    /// uses a shared-cache file URI, the same pattern the teacher's
    /// `mission_lifecycle.test.rs` uses to guarantee schema/data visibility
    /// across connections.
    #[tokio::test]
    async fn concurrent_claims_never_double_assign_the_same_block() {
        let url = "file:riemann_concurrent_claim_test?mode=memory&cache=shared";
        let setup_client = BlockStoreClient::connect(url, None).await.unwrap();
        let mut setup_store = BlockStore::new(setup_client.connection().unwrap());
        let now = chrono::Utc::now();
        let blocks: Vec<_> = (0u32..8).map(|i| block(100 + i * 4, 103 + i * 4, now)).collect();
        setup_store.insert_search_blocks(&blocks).await.unwrap();

        let claimed_starts = std::sync::Arc::new(tokio::sync::Mutex::new(std::collections::HashSet::new()));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let claimed_starts = claimed_starts.clone();
            let client = BlockStoreClient::connect(url, None).await.unwrap();
            handles.push(tokio::spawn(async move {
                let mut store = BlockStore::new(client.connection().unwrap());
                if let Ok(claimed) = store.claim_next_search_block(SearchIndex::EXHAUSTIVE).await {
                    let mut seen = claimed_starts.lock().await;
                    let is_new = seen.insert(claimed.starting_search_index.to_canonical_string());
                    assert!(is_new, "two tasks claimed the same block");
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(claimed_starts.lock().await.len(), 8, "every block should have been claimed exactly once");
    }

    #[tokio::test]
    async fn janitor_reverts_stale_in_progress_blocks() {
        let mut store = memory_store().await;
        store.insert_search_blocks(&[block(100, 103, chrono::Utc::now())]).await.unwrap();
        let claimed = store.claim_next_search_block(SearchIndex::EXHAUSTIVE).await.unwrap();
        assert_eq!(claimed.state, riemann_domain_models::SearchBlockState::InProgress);

        // Backdate start_time to simulate a claim that has gone stale.
        let five_hours_ago = (chrono::Utc::now() - Duration::hours(5)).to_rfc3339();
        store
            .connection()
            .execute("UPDATE search_metadata SET start_time = ?1 WHERE state = 'IN_PROGRESS'", libsql::params![five_hours_ago])
            .await
            .unwrap();

        let reverted = store.revert_stale_in_progress_blocks(Duration::hours(2)).await.unwrap();
        assert_eq!(reverted, 1);
        let all = store.load_metadata().await.unwrap();
        assert_eq!(all[0].state, riemann_domain_models::SearchBlockState::Failed);
    }
}
