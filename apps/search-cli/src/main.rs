//! `riemann-search`: the four-subcommand CLI driving the search engine's
//! three control loops, grounded on `apps/miner-worker/src/main.rs` and
//! `apps/orchestrator/src/main.rs`'s init-then-ignite shell.

mod cli;
mod loops;

use clap::Parser;
use riemann_infra_store::{BlockStore, BlockStoreClient};
use tracing::info;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    riemann_shared_telemetry::init_tracing("riemann-search");

    let cli = Cli::parse();
    let client = BlockStoreClient::connect(&cli.database_url, cli.database_token.as_deref()).await?;

    match cli.command {
        Command::Initdb => {
            info!("schema applied (connection bootstrap already ran it idempotently)");
            Ok(())
        }
        Command::Generate(args) => {
            let mut store = BlockStore::new(client.connection()?);
            let stop_signal = loops::install_stop_signal()?;
            loops::generator::run(&mut store, &args, stop_signal).await
        }
        Command::Process(args) => {
            let mut store = BlockStore::new(client.connection()?);
            let stop_signal = loops::install_stop_signal()?;
            loops::processor::run(&mut store, &args, stop_signal).await
        }
        Command::Cleanup(args) => {
            let mut store = BlockStore::new(client.connection()?);
            let stop_signal = loops::install_stop_signal()?;
            loops::janitor::run(&mut store, &args, stop_signal).await
        }
    }
}
