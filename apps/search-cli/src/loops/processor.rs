//! The processor loop (C6): claim a block, compute it, finish it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use riemann_infra_store::{BlockStore, StoreError};
use tracing::{info, warn};

use super::MAX_CONSECUTIVE_FAILURES;
use crate::cli::ProcessArgs;

pub async fn run(store: &mut BlockStore, args: &ProcessArgs, stop_signal: Arc<AtomicBool>) -> anyhow::Result<()> {
    let strategy = riemann_core_strategies::search_strategy_by_name(&args.strategy)?;
    let mut failure_count: u32 = 0;

    while !stop_signal.load(Ordering::SeqCst) {
        match tick(store, strategy.as_ref(), args).await {
            Ok(()) => {
                failure_count = 0;
            }
            Err(e) => {
                failure_count += 1;
                let backoff = 1 + 2u64.pow(failure_count.min(6));
                warn!(error = %e, failure_count, backoff_seconds = backoff, "processor tick failed");
                if failure_count >= MAX_CONSECUTIVE_FAILURES {
                    anyhow::bail!("processor failed {failure_count} times in a row, quitting");
                }
                tokio::time::sleep(StdDuration::from_secs(backoff)).await;
            }
        }
    }
    Ok(())
}

async fn tick(
    store: &mut BlockStore,
    strategy: &dyn riemann_core_strategies::SearchStrategy,
    args: &ProcessArgs,
) -> anyhow::Result<()> {
    let started = std::time::Instant::now();
    let block = match store.claim_next_search_block(strategy.index_name()).await {
        Ok(block) => block,
        Err(StoreError::NotAvailable) => {
            anyhow::bail!(StoreError::NotAvailable);
        }
        Err(e) => return Err(e.into()),
    };

    let results = strategy.process_block(&block)?;
    store.finish_search_block(&block, &results, args.threshold).await?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        candidates = results.len(),
        "finished search block"
    );
    Ok(())
}
