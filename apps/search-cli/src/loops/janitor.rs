//! The janitor loop (C7): revert blocks stuck IN_PROGRESS back to FAILED.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use riemann_infra_store::BlockStore;
use tracing::{info, warn};

use super::MAX_CONSECUTIVE_FAILURES;
use crate::cli::CleanupArgs;

pub async fn run(store: &mut BlockStore, args: &CleanupArgs, stop_signal: Arc<AtomicBool>) -> anyhow::Result<()> {
    let staleness = Duration::hours(args.stale_threshold_hours);
    let mut failure_count: u32 = 0;

    while !stop_signal.load(Ordering::SeqCst) {
        match tick(store, staleness).await {
            Ok(reverted) => {
                if reverted > 0 {
                    info!(reverted, "reverted stale in-progress blocks");
                }
                failure_count = 0;
            }
            Err(e) => {
                failure_count += 1;
                warn!(error = %e, failure_count, "janitor tick failed");
                if failure_count >= MAX_CONSECUTIVE_FAILURES {
                    anyhow::bail!("janitor failed {failure_count} times in a row, quitting");
                }
            }
        }
        tokio::time::sleep(StdDuration::from_secs(args.refresh_period_seconds)).await;
    }
    Ok(())
}

async fn tick(store: &mut BlockStore, staleness: Duration) -> anyhow::Result<u64> {
    Ok(store.revert_stale_in_progress_blocks(staleness).await?)
}
