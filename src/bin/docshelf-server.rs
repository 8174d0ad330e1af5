use anyhow::Result;
use clap::Parser;
use docshelf::{config::Config, server};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docshelf-server")]
#[command(about = "HTTP intake for document classification and shelving")]
#[command(version)]
struct Cli {
    /// Path to settings.toml (defaults to the standard locations)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshelf=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing::info!(
        inbox = %config.storage.inbox_dir().display(),
        organized = %config.storage.organized_root().display(),
        provider = %config.provider.kind,
        model = %config.provider.model,
        "starting docshelf"
    );

    server::serve(config).await
}
