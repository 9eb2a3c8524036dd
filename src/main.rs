use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tax_engine::api::{AppState, create_router};
use tax_engine::config::ConfigLoader;

const ADDR_ENV: &str = "TAX_ENGINE_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Australian tax position estimator.
///
/// Serves the evaluation, scenario and rate table endpoints over HTTP.
#[derive(Debug, Parser)]
struct Cli {
    /// Address to listen on. Falls back to `TAX_ENGINE_ADDR`, then
    /// `127.0.0.1:3000`.
    #[arg(long)]
    addr: Option<String>,

    /// Load rate tables from `<DIR>/rates/*.yaml` instead of the built-in
    /// tables.
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// Honours `RUST_LOG` when set and falls back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(dir) => ConfigLoader::load(dir)?,
        None => ConfigLoader::builtin()?,
    };
    let years: Vec<String> = config.tables().years().iter().map(ToString::to_string).collect();
    info!(count = years.len(), years = %years.join(", "), "Rate tables loaded");

    let addr = cli
        .addr
        .or_else(|| std::env::var(ADDR_ENV).ok())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "Tax engine listening");

    axum::serve(listener, create_router(AppState::new(config))).await?;

    Ok(())
}
