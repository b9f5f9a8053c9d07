//! Turning the categorized lists into download requests.

use std::path::PathBuf;

use super::request::{ConflictAction, DownloadRequest};
use crate::links::{LinkEntry, ListKey, DEFAULT_FOLDER_NAME};
use crate::store::Snapshot;
use crate::url_model::derive_download_filename;

/// Trimmed folder name, or the default when nothing is left.
pub fn resolve_folder_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_FOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One entry scheduled for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDownload {
    pub entry: LinkEntry,
    pub filename: String,
    pub request: DownloadRequest,
}

/// All categorized entries in download order (model, footprint, symbol;
/// each list in its own order), each mapped to `{folder}/{filename}`.
pub fn plan_bulk(snapshot: &Snapshot, conflict: ConflictAction) -> Vec<PlannedDownload> {
    let folder = resolve_folder_name(&snapshot.download_folder_name);
    ListKey::CATEGORIZED
        .into_iter()
        .flat_map(|list| snapshot.list(list).iter())
        .map(|entry| {
            let filename = derive_download_filename(&entry.url);
            let destination = PathBuf::from(&folder).join(&filename);
            PlannedDownload {
                entry: entry.clone(),
                request: DownloadRequest {
                    url: entry.url.clone(),
                    destination,
                    conflict,
                },
                filename,
            }
        })
        .collect()
}
