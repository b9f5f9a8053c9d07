//! `linkholder download` – fetch every categorized link.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use linkholder_core::config::LinkholderConfig;
use linkholder_core::download::{
    bulk_download, BulkOptions, ConflictAction, CurlDownloader, NOTHING_TO_DOWNLOAD,
};
use linkholder_core::store::LinkStore;

pub async fn run_download(
    store: &LinkStore,
    cfg: &LinkholderConfig,
    download_dir: Option<PathBuf>,
    overwrite: bool,
) -> Result<()> {
    let root = match download_dir.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let options = BulkOptions {
        max_concurrent: cfg.max_concurrent_downloads,
        conflict: if overwrite {
            ConflictAction::Overwrite
        } else {
            ConflictAction::Uniquify
        },
    };
    let downloader = Arc::new(CurlDownloader::new(&root, cfg));
    let report = bulk_download(store, downloader, options).await?;

    if report.is_empty() {
        println!("{}", NOTHING_TO_DOWNLOAD);
        return Ok(());
    }
    for started in &report.started {
        println!("{:<6} {}", started.id.to_string(), root.join(&started.path).display());
    }
    for failed in &report.failed {
        eprintln!("{} ({})", failed.alert(), failed.reason);
    }
    println!("{}", report.summary());
    Ok(())
}
