use anyhow::{Context, Result};
use clap::Parser;
use docshelf::{config::Config, pipeline::Pipeline, watcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docshelf-watch")]
#[command(about = "Watch the inbox directory and shelve documents as they arrive")]
#[command(version)]
struct Cli {
    /// Path to settings.toml (defaults to the standard locations)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshelf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let inbox = config.storage.inbox_dir();
    std::fs::create_dir_all(&inbox)
        .with_context(|| format!("Failed to create inbox directory: {}", inbox.display()))?;
    std::fs::create_dir_all(config.storage.organized_root())
        .context("Failed to create organized root")?;

    let pipeline = Arc::new(Pipeline::from_config(&config)?);

    let inbox_watcher = watcher::InboxWatcher::new(&inbox)?;
    let mut rx = inbox_watcher.subscribe();
    inbox_watcher.watch()?;

    tracing::info!(inbox = %inbox.display(), "watching for documents, press Ctrl+C to stop");

    while let Ok(path) = rx.recv().await {
        watcher::wait_for_settle(&path).await;

        match docshelf::models::SourceDocument::probe(&path) {
            Ok(doc) => tracing::info!(
                file = %path.display(),
                kind = %doc.kind,
                size = doc.size,
                fingerprint = %doc.fingerprint,
                "new document in inbox"
            ),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping inbox entry");
                continue;
            }
        }

        match pipeline.process(&path).await {
            Ok(placement) => {
                tracing::info!(
                    file = %path.display(),
                    destination = %placement.destination.display(),
                    "shelved"
                );
            }
            Err(e) => {
                // Already logged in detail by the pipeline; the file stays
                // in the inbox for the operator
                tracing::warn!(file = %path.display(), stage = e.stage().as_str(), "left in inbox");
            }
        }
    }

    Ok(())
}
