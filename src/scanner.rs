/// Concurrent directory scanner.
///
/// Fans the issue files of one directory out to a bounded pool of workers,
/// each running the issue builder against the PDF engine, and collects the
/// results through a channel. Failing to read the directory itself is a hard
/// error; failing to parse an individual file just means that file
/// contributes no issue.
use crate::error::Result;
use crate::issue::IssueBuilder;
use crate::model::Issue;
use crate::pdf::PdfEngine;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};

/// Default size of the worker pool
pub const DEFAULT_WORKERS: usize = 10;

pub struct DirectoryScanner {
    engine: Arc<dyn PdfEngine>,
    builder: Arc<IssueBuilder>,
    semaphore: Arc<Semaphore>,
    max_workers: usize,
}

impl DirectoryScanner {
    pub fn new(engine: Arc<dyn PdfEngine>, builder: IssueBuilder, max_workers: usize) -> Self {
        Self {
            engine,
            builder: Arc::new(builder),
            semaphore: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    /// Scan every issue file in a directory into Issue records.
    ///
    /// Discovery keeps only files with the builder's configured extension.
    /// Blocks until every worker has drained the queue; issues the builder
    /// could not number (issue_number 0) are filtered out of the result.
    pub async fn scan(&self, dir: &Path, max_to_scan: Option<usize>) -> Result<Vec<Issue>> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(self.builder.extension()))
                .unwrap_or(false);
            if matches {
                files.push(path);
            }
        }
        files.sort();
        if let Some(max) = max_to_scan {
            files.truncate(max);
        }

        if files.is_empty() {
            warn!(
                "No .{} files found in {}",
                self.builder.extension(),
                dir.display()
            );
            return Ok(Vec::new());
        }
        info!("🔍 Scanning {} files in {}", files.len(), dir.display());

        let (tx, mut rx) = mpsc::channel(self.max_workers);
        let total = files.len();
        for (index, path) in files.into_iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let builder = Arc::clone(&self.builder);
            let semaphore = Arc::clone(&self.semaphore);
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();
                debug!("📖 Scanning file {}/{}: {}", index + 1, total, path.display());
                let result = builder.build(engine.as_ref(), &path).await;
                if tx.send((path, result)).await.is_err() {
                    error!("Failed to send scan result");
                }
            });
        }
        // Close the channel once every worker has reported.
        drop(tx);

        let mut issues = Vec::new();
        while let Some((path, result)) = rx.recv().await {
            match result {
                Ok(issue) => {
                    if issue.issue_number == 0 {
                        warn!("⚠️ Could not number {}, excluding it", issue.filename);
                        continue;
                    }
                    info!(
                        "✅ Catalogued {} ({} episodes)",
                        issue.filename,
                        issue.episodes.len()
                    );
                    issues.push(issue);
                }
                Err(e) => {
                    warn!("❌ Skipping {}: {}", path.display(), e);
                }
            }
        }

        issues.sort_by_key(|issue| issue.issue_number);
        Ok(issues)
    }
}
