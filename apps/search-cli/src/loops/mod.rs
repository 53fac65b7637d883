//! The three cooperating control loops (C5/C6/C7). Each shares the same
//! failure policy from `original_source/riemann/generate_search_blocks.py`:
//! a consecutive-failure counter that exits the process after the 8th
//! failure in a row, so a supervisor can restart a clean instance.

pub mod generator;
pub mod janitor;
pub mod processor;

/// After this many consecutive failures, a loop exits the process.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 8;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Install a ctrl-c handler that flips `stop_signal`, matching the
/// `apps/miner-worker/src/main.rs` shutdown idiom.
pub fn install_stop_signal() -> anyhow::Result<Arc<AtomicBool>> {
    let stop_signal = Arc::new(AtomicBool::new(false));
    let flag = stop_signal.clone();
    ctrlc_shim(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(stop_signal)
}

/// Thin wrapper so the rest of the crate doesn't depend on a ctrl-c crate
/// directly; Tokio's own signal handling covers SIGINT without an extra
/// dependency on top of the teacher's existing stack.
fn ctrlc_shim<F: Fn() + Send + 'static>(handler: F) -> anyhow::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handler();
        }
    });
    Ok(())
}
