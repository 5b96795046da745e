//! CLI entry point - loads settings, wires the adapter, serves.
//!
//! Configuration comes from `CHATGATE_*` environment variables (a `.env`
//! file is honored); the flags below override the bind address for quick
//! local runs.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatgate_axum::start_server;
use chatgate_core::settings::Settings;

/// OpenAI-compatible inference gateway with chat-history persistence.
#[derive(Debug, Parser)]
#[command(name = "chatgate", version, about)]
struct Cli {
    /// Bind address, overrides CHATGATE_HOST.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides CHATGATE_PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before settings are read
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env()?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %settings.host,
        port = settings.port,
        "starting chatgate"
    );

    start_server(settings).await
}
