use crate::server::is_supported_upload;
use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Watches the inbox directory and announces supported documents as they
/// arrive. Hot-folder counterpart to the upload endpoint.
pub struct InboxWatcher {
    inbox: PathBuf,
    sender: broadcast::Sender<PathBuf>,
}

impl InboxWatcher {
    pub fn new<P: AsRef<Path>>(inbox: P) -> Result<Self> {
        let inbox = inbox
            .as_ref()
            .canonicalize()
            .context("Failed to canonicalize inbox directory path")?;

        if !inbox.is_dir() {
            anyhow::bail!("Inbox path is not a directory: {}", inbox.display());
        }

        let (tx, _) = broadcast::channel(100);
        Ok(Self { inbox, sender: tx })
    }

    /// Get a receiver for arrival events
    pub fn subscribe(&self) -> broadcast::Receiver<PathBuf> {
        self.sender.subscribe()
    }

    /// Start watching the inbox. Events are forwarded on a blocking worker
    /// so the notify callback never blocks the async runtime.
    pub fn watch(&self) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| {
                if let Ok(event) = result {
                    let _ = tx.send(event);
                }
            },
            Config::default(),
        )
        .context("Failed to create filesystem watcher")?;

        watcher
            .watch(&self.inbox, RecursiveMode::NonRecursive)
            .context("Failed to start watching the inbox")?;

        let inbox = self.inbox.clone();
        let sender = self.sender.clone();
        tokio::task::spawn_blocking(move || {
            // Move the watcher in so it stays alive with the worker
            let _watcher = watcher;
            while let Ok(event) = rx.recv() {
                forward_event(&inbox, event, &sender);
            }
        });

        Ok(())
    }
}

fn forward_event(inbox: &Path, event: Event, sender: &broadcast::Sender<PathBuf>) {
    if !matches!(event.kind, EventKind::Create(_)) {
        return;
    }

    for path in event.paths {
        if !path.starts_with(inbox) || !path.is_file() {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !is_supported_upload(name) {
            continue;
        }
        let _ = sender.send(path);
    }
}

/// Wait until the file's size stops changing, so a document still being
/// copied into the inbox is not processed half-written.
pub async fn wait_for_settle(path: &Path) {
    let mut last_size = None;
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let size = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(_) => return,
        };
        if last_size == Some(size) {
            return;
        }
        last_size = Some(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_watcher_creation() {
        let temp_dir = TempDir::new().unwrap();
        let watcher = InboxWatcher::new(temp_dir.path()).unwrap();
        assert_eq!(watcher.inbox, temp_dir.path().canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_watcher_rejects_non_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, b"test").unwrap();

        assert!(InboxWatcher::new(&file_path).is_err());
    }

    #[tokio::test]
    async fn test_wait_for_settle_returns_for_stable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stable.txt");
        fs::write(&path, "done writing").unwrap();

        // Completes well inside the bounded loop for a file nobody touches
        wait_for_settle(&path).await;
    }

    #[tokio::test]
    async fn test_wait_for_settle_tolerates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        wait_for_settle(&temp_dir.path().join("gone.txt")).await;
    }
}
