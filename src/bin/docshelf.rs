use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docshelf::{config::Config, pipeline::Pipeline, server::is_supported_upload};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docshelf")]
#[command(about = "Classify documents with an LLM and shelve them into category folders")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to settings.toml (defaults to the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Classify and print planned destinations without moving anything
    #[arg(long, global = true)]
    dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Shelve a single document
    Shelve {
        /// File to classify and move
        file: PathBuf,
    },
    /// Shelve every supported document directly inside a directory
    Sweep {
        /// Directory to sweep (non-recursive)
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshelf=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    std::fs::create_dir_all(config.storage.organized_root())
        .context("Failed to create organized root")?;
    let pipeline = Arc::new(Pipeline::from_config(&config)?);

    match cli.command {
        Command::Shelve { file } => shelve_one(&pipeline, &file, cli.dry_run).await,
        Command::Sweep { dir } => sweep(&pipeline, &config, &dir, cli.dry_run, cli.yes).await,
    }
}

async fn shelve_one(pipeline: &Pipeline, file: &PathBuf, dry_run: bool) -> Result<()> {
    if dry_run {
        let placement = pipeline
            .plan(file)
            .await
            .with_context(|| format!("Failed to classify {}", file.display()))?;
        println!(
            "would move {} -> {}",
            file.display(),
            placement.destination.display()
        );
        return Ok(());
    }

    let placement = pipeline
        .process(file)
        .await
        .with_context(|| format!("Failed to shelve {}", file.display()))?;
    println!(
        "moved {} -> {}",
        file.display(),
        placement.destination.display()
    );
    Ok(())
}

async fn sweep(
    pipeline: &Arc<Pipeline>,
    config: &Config,
    dir: &PathBuf,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_supported_upload(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();

    if files.is_empty() {
        println!("No supported documents in {}", dir.display());
        return Ok(());
    }

    println!("Found {} documents in {}", files.len(), dir.display());

    if !dry_run && !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Shelve {} files into {}?",
                files.len(),
                config.storage.organized_root().display()
            ))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);

    let failures = Arc::new(AtomicUsize::new(0));
    futures::stream::iter(files)
        .for_each_concurrent(4, |file| {
            let pipeline = Arc::clone(pipeline);
            let failures = Arc::clone(&failures);
            let bar = bar.clone();
            async move {
                let result = if dry_run {
                    pipeline.plan(&file).await
                } else {
                    pipeline.process(&file).await
                };
                match result {
                    Ok(placement) => {
                        let verb = if dry_run { "would move" } else { "moved" };
                        bar.println(format!(
                            "{} {} -> {}",
                            verb,
                            file.display(),
                            placement.destination.display()
                        ));
                    }
                    Err(e) => {
                        failures.fetch_add(1, Ordering::Relaxed);
                        bar.println(format!(
                            "skipped {} ({} failed: {})",
                            file.display(),
                            e.stage(),
                            e
                        ));
                    }
                }
                bar.inc(1);
            }
        })
        .await;

    let failed = failures.load(Ordering::Relaxed);
    bar.finish_with_message(if failed == 0 {
        "done".to_string()
    } else {
        format!("done, {} failed", failed)
    });

    Ok(())
}
