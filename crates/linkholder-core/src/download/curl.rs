//! libcurl-backed initiator: one GET per request, body streamed to a `.part`
//! file next to the destination and renamed into place when complete.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::destination::{claim, discard, finalize, temp_path, validate_destination};
use super::request::{DownloadError, DownloadId, DownloadInitiator, DownloadRequest};
use crate::config::LinkholderConfig;

pub struct CurlDownloader {
    root: PathBuf,
    connect_timeout: Duration,
    transfer_timeout: Duration,
    next_id: AtomicU64,
}

impl CurlDownloader {
    pub fn new(root: impl Into<PathBuf>, cfg: &LinkholderConfig) -> Self {
        Self {
            root: root.into(),
            connect_timeout: cfg.connect_timeout(),
            transfer_timeout: cfg.transfer_timeout(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn fetch_into(&self, url: &str, file: &mut File) -> Result<(), DownloadError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.timeout(self.transfer_timeout)?;

        let mut write_err: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(DownloadError::Io(e));
        }
        performed?;

        let code = easy.response_code()?;
        let is_http = url.starts_with("http://") || url.starts_with("https://");
        if is_http && !(200..300).contains(&code) {
            return Err(DownloadError::Http(code));
        }
        file.flush()?;
        Ok(())
    }
}

impl DownloadInitiator for CurlDownloader {
    fn start(&self, request: &DownloadRequest) -> Result<DownloadId, DownloadError> {
        validate_destination(&request.destination)?;
        let target = self.root.join(&request.destination);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let claimed = claim(&target, request.conflict)?;
        let temp = temp_path(&claimed);
        let result = File::create(&temp)
            .map_err(DownloadError::from)
            .and_then(|mut file| self.fetch_into(&request.url, &mut file))
            .and_then(|()| finalize(&temp, &claimed).map_err(DownloadError::from));

        match result {
            Ok(()) => {
                let id = DownloadId(self.next_id.fetch_add(1, Ordering::Relaxed));
                tracing::debug!(%id, path = %claimed.display(), "download finished");
                Ok(id)
            }
            Err(e) => {
                discard(&temp, &claimed);
                Err(e)
            }
        }
    }
}
