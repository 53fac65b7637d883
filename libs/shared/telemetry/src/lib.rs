//! Ambient logging setup, ported from `prospector-shared-heimdall`:
//! a dual JSON/dev-compact `tracing_subscriber`, plus a global panic hook
//! that logs the panic payload through `tracing::error!` instead of letting
//! it go straight to stderr unstructured.

use std::panic;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber for `service_name`. JSON output
/// in release builds, compact human-readable output in debug builds — the
/// split matches `heimdall::init_tracing`.
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(debug_assertions)]
    {
        fmt().with_env_filter(filter).with_target(true).compact().init();
    }
    #[cfg(not(debug_assertions))]
    {
        fmt().with_env_filter(filter).json().flatten_event(true).init();
    }

    install_panic_hook(service_name.to_string());
    tracing::info!(service = service_name, "telemetry initialized");
}

fn install_panic_hook(service_name: String) {
    panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(
            target: "panic_monitor",
            service = %service_name,
            location = %location,
            "{}",
            panic_info
        );
    }));
}
