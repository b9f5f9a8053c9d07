//! Bulk download of categorized links into a named folder.

mod bulk;
mod curl;
pub mod destination;
mod plan;
mod request;

pub use bulk::{
    bulk_download, BulkOptions, BulkReport, FailedDownload, StartedDownload, NOTHING_TO_DOWNLOAD,
};
pub use self::curl::CurlDownloader;
pub use plan::{plan_bulk, resolve_folder_name, PlannedDownload};
pub use request::{ConflictAction, DownloadError, DownloadId, DownloadInitiator, DownloadRequest};
