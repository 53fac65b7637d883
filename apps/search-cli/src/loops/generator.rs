//! The generator loop (C5), grounded on
//! `original_source/riemann/generate_search_blocks.py::main` /
//! `get_eligible_blocks` / `get_starting_index`.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use riemann_core_strategies::SearchStrategy;
use riemann_domain_models::{SearchBlockState, SearchIndex, SearchMetadata};
use riemann_infra_store::BlockStore;
use tracing::{info, warn};

use super::MAX_CONSECUTIVE_FAILURES;
use crate::cli::GenerateArgs;

enum TickOutcome {
    Generated(usize),
    Waiting(usize),
}

pub async fn run(store: &mut BlockStore, args: &GenerateArgs, stop_signal: Arc<AtomicBool>) -> anyhow::Result<()> {
    let mut strategy = riemann_core_strategies::search_strategy_by_name(&args.strategy)?;
    let mut failure_count: u32 = 0;

    while !stop_signal.load(AtomicOrdering::SeqCst) {
        match tick(store, strategy.as_mut(), args).await {
            Ok(TickOutcome::Generated(count)) => {
                info!(generated = count, "computed new search blocks");
                failure_count = 0;
            }
            Ok(TickOutcome::Waiting(eligible)) => {
                info!(eligible, threshold = args.refresh_threshold, "eligible backlog above threshold, waiting");
                failure_count = 0;
            }
            Err(e) => {
                failure_count += 1;
                warn!(error = %e, failure_count, "generator tick failed");
                if failure_count >= MAX_CONSECUTIVE_FAILURES {
                    anyhow::bail!("generator failed {failure_count} times in a row, quitting");
                }
            }
        }
        tokio::time::sleep(StdDuration::from_secs(args.refresh_period_seconds)).await;
    }
    Ok(())
}

async fn tick(
    store: &mut BlockStore,
    strategy: &mut dyn SearchStrategy,
    args: &GenerateArgs,
) -> anyhow::Result<TickOutcome> {
    let all_metadata = store.load_metadata().await?;
    let for_this_strategy: Vec<&SearchMetadata> = all_metadata
        .iter()
        .filter(|b| b.search_index_type() == strategy.index_name())
        .collect();

    let eligible_count = for_this_strategy
        .iter()
        .filter(|b| matches!(b.state, SearchBlockState::NotStarted | SearchBlockState::Failed))
        .count();

    if (eligible_count as u64) < args.refresh_threshold {
        let starting_index = starting_index_for(&for_this_strategy, strategy)?;
        strategy.starting_from(starting_index)?;
        let new_blocks = strategy.generate_search_blocks(args.refresh_count, args.block_size)?;
        let generated = new_blocks.len();
        store.insert_search_blocks(&new_blocks).await?;
        Ok(TickOutcome::Generated(generated))
    } else {
        Ok(TickOutcome::Waiting(eligible_count))
    }
}

/// The resume index for the next batch: the index space's default start if
/// no blocks exist yet for this strategy, otherwise one past the maximum
/// `ending_search_index` seen so far (via `advance_past`, in place of the
/// original's dummy-block-of-size-one workaround — see `DESIGN.md`).
fn starting_index_for(
    existing: &[&SearchMetadata],
    strategy: &mut dyn SearchStrategy,
) -> anyhow::Result<SearchIndex> {
    if existing.is_empty() {
        return Ok(strategy.effective_default_index());
    }
    let mut max_ending = &existing[0].ending_search_index;
    for block in existing.iter() {
        if block.ending_search_index.compare(max_ending)? == Ordering::Greater {
            max_ending = &block.ending_search_index;
        }
    }
    Ok(strategy.advance_past(max_ending.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use riemann_infra_store::BlockStoreClient;

    fn args(strategy: &str) -> GenerateArgs {
        GenerateArgs {
            strategy: strategy.to_string(),
            block_size: 10,
            refresh_count: 1,
            refresh_threshold: 100,
            refresh_period_seconds: 30,
        }
    }

    #[tokio::test]
    async fn cold_start_uses_the_strategys_practical_default_not_the_index_spaces_literal_zero() {
        let client = BlockStoreClient::connect(":memory:", None).await.unwrap();
        let mut store = BlockStore::new(client.connection().unwrap());
        let mut strategy = riemann_core_strategies::search_strategy_by_name("ExhaustiveSearchStrategy").unwrap();

        let outcome = tick(&mut store, strategy.as_mut(), &args("ExhaustiveSearchStrategy")).await.unwrap();
        assert!(matches!(outcome, TickOutcome::Generated(1)));

        let metadata = store.load_metadata().await.unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(
            metadata[0].starting_search_index,
            SearchIndex::ExhaustiveSearchIndex { n: BigUint::from(5041u32) }
        );
        assert_eq!(
            metadata[0].ending_search_index,
            SearchIndex::ExhaustiveSearchIndex { n: BigUint::from(5050u32) }
        );
    }

    #[tokio::test]
    async fn warm_resume_continues_past_the_highest_existing_block() {
        let client = BlockStoreClient::connect(":memory:", None).await.unwrap();
        let mut store = BlockStore::new(client.connection().unwrap());
        let mut strategy = riemann_core_strategies::search_strategy_by_name("ExhaustiveSearchStrategy").unwrap();

        tick(&mut store, strategy.as_mut(), &args("ExhaustiveSearchStrategy")).await.unwrap();
        let outcome = tick(&mut store, strategy.as_mut(), &args("ExhaustiveSearchStrategy")).await.unwrap();
        assert!(matches!(outcome, TickOutcome::Generated(1)));

        let metadata = store.load_metadata().await.unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(
            metadata[1].starting_search_index,
            SearchIndex::ExhaustiveSearchIndex { n: BigUint::from(5051u32) }
        );
    }
}
