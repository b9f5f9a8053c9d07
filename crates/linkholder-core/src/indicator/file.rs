//! Badge published as a small JSON file for status bars and launchers.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::badge::Badge;
use super::Indicator;

/// Writes the badge to `badge.json` (write to temp, then rename).
#[derive(Debug, Clone)]
pub struct FileIndicator {
    path: PathBuf,
}

impl FileIndicator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last published badge, or None if nothing has been published yet.
    pub fn read(&self) -> Result<Option<Badge>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read badge: {}", self.path.display())),
        };
        let badge = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse badge: {}", self.path.display()))?;
        Ok(Some(badge))
    }
}

impl Indicator for FileIndicator {
    fn publish(&self, badge: &Badge) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string(badge).context("serialize badge")?;
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json).with_context(|| format!("write badge: {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("publish badge: {}", self.path.display()))?;
        Ok(())
    }
}
