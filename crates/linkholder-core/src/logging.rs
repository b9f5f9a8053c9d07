//! Logging setup.
//!
//! Both the agent and one-shot commands append to
//! `~/.local/state/linkholder/linkholder.log`; stderr is the fallback when
//! the state dir cannot be written. `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config;

const DEFAULT_FILTER: &str = "info,linkholder=debug,linkholder_core=debug";
const LOG_FILE_NAME: &str = "linkholder.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file inside the state dir.
pub fn log_file_path() -> Result<PathBuf> {
    Ok(config::state_dir()?.join(LOG_FILE_NAME))
}

/// Per-event writer: the shared log file, or stderr if the handle could not be cloned.
enum Sink {
    Log(File),
    Stderr(io::Stderr),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Log(f) => f.write(buf),
            Sink::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Log(f) => f.flush(),
            Sink::Stderr(e) => e.flush(),
        }
    }
}

struct LogFile(File);

impl LogFile {
    fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create log dir: {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file: {}", path.display()))?;
        Ok(Self(file))
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = Sink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => Sink::Log(f),
            Err(_) => Sink::Stderr(io::stderr()),
        }
    }
}

/// Install the file subscriber. Errors (unwritable state dir, subscriber
/// already set) are returned so the caller can fall back to stderr.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let writer = LogFile::open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("linkholder logging initialized at {}", path.display());
    Ok(())
}

/// Log to stderr only.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
