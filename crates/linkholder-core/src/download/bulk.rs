//! Bulk download of every categorized link.
//!
//! Every initiator call is issued without waiting on an earlier one (unless
//! a limit is configured); each runs on the blocking pool. One failure never
//! stops the others.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinSet;

use super::plan::{plan_bulk, resolve_folder_name, PlannedDownload};
use super::request::{ConflictAction, DownloadError, DownloadId, DownloadInitiator};
use crate::store::LinkStore;

#[derive(Debug, Clone, Copy)]
pub struct BulkOptions {
    /// Upper bound on calls in flight; 0 = unbounded.
    pub max_concurrent: usize,
    pub conflict: ConflictAction,
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 0,
            conflict: ConflictAction::Uniquify,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedDownload {
    pub id: DownloadId,
    pub url: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDownload {
    pub url: String,
    pub filename: String,
    pub reason: String,
}

impl FailedDownload {
    /// Message shown to the user for this failure.
    pub fn alert(&self) -> String {
        format!("Failed to start download for: {}", self.filename)
    }
}

/// Outcome of one bulk run, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    pub folder: String,
    pub total: usize,
    pub started: Vec<StartedDownload>,
    pub failed: Vec<FailedDownload>,
}

impl BulkReport {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Attempted to start {} out of {} downloads.",
            self.started.len(),
            self.total
        )
    }
}

pub const NOTHING_TO_DOWNLOAD: &str = "No categorized links to download!";

/// Reads one snapshot of the store and asks `initiator` for every categorized link.
pub async fn bulk_download(
    store: &LinkStore,
    initiator: Arc<dyn DownloadInitiator>,
    options: BulkOptions,
) -> Result<BulkReport> {
    let snapshot = store.snapshot().await?;
    let folder = resolve_folder_name(&snapshot.download_folder_name);
    let plan = plan_bulk(&snapshot, options.conflict);
    if plan.is_empty() {
        tracing::info!("{}", NOTHING_TO_DOWNLOAD);
        return Ok(BulkReport {
            folder,
            ..BulkReport::default()
        });
    }

    let total = plan.len();
    let max_concurrent = match options.max_concurrent {
        0 => total,
        n => n,
    };
    let mut results: Vec<Option<Result<DownloadId, DownloadError>>> =
        (0..total).map(|_| None).collect();
    let mut queue = plan.iter().cloned().enumerate();
    let mut join_set = JoinSet::new();

    loop {
        while join_set.len() < max_concurrent {
            let Some((index, planned)) = queue.next() else {
                break;
            };
            tracing::info!(
                "Downloading: {} as {}",
                planned.request.url,
                planned.request.destination.display()
            );
            let initiator = Arc::clone(&initiator);
            join_set.spawn_blocking(move || (index, initiator.start(&planned.request)));
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(e) => tracing::error!("download task join: {}", e),
        }
    }

    let mut report = BulkReport {
        folder,
        total,
        ..BulkReport::default()
    };
    for (planned, result) in plan.into_iter().zip(results) {
        let result = result
            .unwrap_or_else(|| Err(DownloadError::Task("task did not complete".into())));
        record(&mut report, planned, result);
    }
    tracing::info!("{}", report.summary());
    Ok(report)
}

fn record(
    report: &mut BulkReport,
    planned: PlannedDownload,
    result: Result<DownloadId, DownloadError>,
) {
    let PlannedDownload {
        entry,
        filename,
        request,
    } = planned;
    match result {
        Ok(id) => {
            tracing::info!("Started download {} for {}", id, entry.url);
            report.started.push(StartedDownload {
                id,
                url: entry.url,
                path: request.destination,
            });
        }
        Err(e) => {
            tracing::error!("Download failed for {}: {}", entry.url, e);
            report.failed.push(FailedDownload {
                url: entry.url,
                filename,
                reason: e.to_string(),
            });
        }
    }
}
