//! End-to-end smoke test wiring strategies, the block store, and hashing
//! together, in the shape of
//! `original_source/test/end_to_end_test.py`.

use riemann_core_strategies::{search_strategy_by_name, SearchStrategy};
use riemann_domain_models::SearchBlockState;
use riemann_infra_store::{BlockStore, BlockStoreClient};

#[tokio::test]
async fn exhaustive_strategy_round_trips_through_the_store() {
    let client = BlockStoreClient::connect(":memory:", None).await.unwrap();
    let mut store = BlockStore::new(client.connection().unwrap());
    let mut strategy = search_strategy_by_name("ExhaustiveSearchStrategy").unwrap();

    let blocks = strategy.generate_search_blocks(3, 10).unwrap();
    store.insert_search_blocks(&blocks).await.unwrap();

    for _ in 0..3 {
        let claimed = store.claim_next_search_block(strategy.index_name()).await.unwrap();
        assert_eq!(claimed.state, SearchBlockState::InProgress);
        let results = strategy.process_block(&claimed).unwrap();
        assert_eq!(results.len(), 10);
        store.finish_search_block(&claimed, &results, 1.767).await.unwrap();
    }

    assert!(store.claim_next_search_block(strategy.index_name()).await.is_err());

    let metadata = store.load_metadata().await.unwrap();
    assert_eq!(metadata.len(), 3);
    assert!(metadata.iter().all(|b| b.state == SearchBlockState::Finished));
    assert!(metadata.iter().all(|b| b.block_hash.is_some()));
}

#[tokio::test]
async fn superabundant_strategy_covers_known_small_candidates() {
    let client = BlockStoreClient::connect(":memory:", None).await.unwrap();
    let mut store = BlockStore::new(client.connection().unwrap());
    let mut strategy = search_strategy_by_name("SuperabundantSearchStrategy").unwrap();

    let blocks = strategy.generate_search_blocks(1, 4).unwrap();
    store.insert_search_blocks(&blocks).await.unwrap();

    let claimed = store.claim_next_search_block(strategy.index_name()).await.unwrap();
    let results = strategy.process_block(&claimed).unwrap();
    let ns: Vec<u32> = results.iter().map(|r| r.n.to_u32_digits()[0]).collect();
    assert_eq!(ns, vec![2, 4, 6, 8]);

    store.finish_search_block(&claimed, &results, 1.767).await.unwrap();
    let summary = store.summarize().await.unwrap();
    // threshold 1.767 filters out all four small candidates; nothing persisted.
    assert!(summary.is_none());
}

#[tokio::test]
async fn mark_block_as_failed_allows_reclaim() {
    let client = BlockStoreClient::connect(":memory:", None).await.unwrap();
    let mut store = BlockStore::new(client.connection().unwrap());
    let mut strategy = search_strategy_by_name("ExhaustiveSearchStrategy").unwrap();

    let blocks = strategy.generate_search_blocks(1, 10).unwrap();
    store.insert_search_blocks(&blocks).await.unwrap();

    let claimed = store.claim_next_search_block(strategy.index_name()).await.unwrap();
    store.mark_block_as_failed(&claimed).await.unwrap();

    let reclaimed = store.claim_next_search_block(strategy.index_name()).await.unwrap();
    assert_eq!(reclaimed.starting_search_index, claimed.starting_search_index);
    assert_eq!(reclaimed.state, SearchBlockState::InProgress);
}
