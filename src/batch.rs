//! Concurrent loading of many trace files.
//!
//! Each file is loaded on the blocking thread pool with its own buffer and
//! delimiter; the only shared value is the immutable [`TableLoader`].

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, warn};

use crate::loader::TableLoader;
use crate::models::FileOutcome;

/// Loads a list of files with bounded concurrency
#[derive(Debug, Clone)]
pub struct BatchLoader {
    loader: Arc<TableLoader>,
    max_concurrent: usize,
}

impl BatchLoader {
    pub fn new(loader: TableLoader, max_concurrent: usize) -> Self {
        Self {
            loader: Arc::new(loader),
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Load every path, returning outcomes in input order
    ///
    /// `on_done` runs as each file finishes, in completion order.
    pub async fn load_all<F>(&self, paths: Vec<PathBuf>, on_done: F) -> Vec<FileOutcome>
    where
        F: Fn(&FileOutcome),
    {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        debug!(
            "Loading {} files with up to {} concurrent loads",
            paths.len(),
            self.max_concurrent
        );

        let mut outcomes = stream::iter(paths.into_iter().enumerate())
            .map(|(index, path)| {
                let sem = semaphore.clone();
                let loader = self.loader.clone();
                async move {
                    let _permit = sem.acquire().await.ok();
                    let task_path = path.clone();
                    let result = task::spawn_blocking(move || loader.load(&task_path))
                        .await
                        .unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()));
                    (index, FileOutcome { path, result })
                }
            })
            .buffer_unordered(self.max_concurrent)
            .inspect(|(_, outcome)| {
                if let Err(e) = &outcome.result {
                    warn!("Failed to load {}: {}", outcome.path.display(), e);
                }
                on_done(outcome);
            })
            .collect::<Vec<_>>()
            .await;

        outcomes.sort_by_key(|(index, _)| *index);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
