use clap::{Args, Parser, Subcommand};

/// Coordinates a distributed search for counterexamples to Robin's
/// criterion (Riemann Hypothesis). Each subcommand is an independent
/// process that connects directly to the shared block store.
#[derive(Debug, Parser)]
#[command(name = "riemann-search", version, about)]
pub struct Cli {
    /// libSQL connection string: `:memory:`, a local file path, or a
    /// `libsql://`/`https://` remote endpoint.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Auth token for a remote libSQL/Turso database.
    #[arg(long, env = "TURSO_AUTH_TOKEN")]
    pub database_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the block store schema idempotently.
    Initdb,
    /// Run the generator loop (C5): top up the backlog of claimable blocks.
    Generate(GenerateArgs),
    /// Run the processor loop (C6): claim, compute, and finish blocks.
    Process(ProcessArgs),
    /// Run the janitor loop (C7): revert stale IN_PROGRESS blocks to FAILED.
    Cleanup(CleanupArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long, default_value = "SuperabundantSearchStrategy")]
    pub strategy: String,

    /// Size of a single search block.
    #[arg(long, default_value_t = 250_000)]
    pub block_size: u64,

    /// Number of blocks to generate at a time.
    #[arg(long, default_value_t = 100)]
    pub refresh_count: u64,

    /// Minimum number of eligible blocks before generating a new batch.
    #[arg(long, default_value_t = 100)]
    pub refresh_threshold: u64,

    /// Seconds to wait between refresh checks.
    #[arg(long, default_value_t = 30)]
    pub refresh_period_seconds: u64,
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    #[arg(long, default_value = "SuperabundantSearchStrategy")]
    pub strategy: String,

    /// Only persist results with witness_value strictly above this.
    #[arg(long, default_value_t = 1.767)]
    pub threshold: f64,
}

#[derive(Debug, Args)]
pub struct CleanupArgs {
    /// Seconds to wait between staleness scans.
    #[arg(long, default_value_t = 30)]
    pub refresh_period_seconds: u64,

    /// How long a block may sit IN_PROGRESS before it's considered stale.
    #[arg(long, default_value_t = 2)]
    pub stale_threshold_hours: i64,
}
