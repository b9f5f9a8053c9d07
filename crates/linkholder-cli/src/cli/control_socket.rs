//! Control socket: server (during `linkholder agent`) and client (for `linkholder capture`).
//! Protocol: one line per activation, "capture <url>".

use std::path::Path;

use anyhow::Result;
use linkholder_core::agent::MenuClick;
use linkholder_core::control::{capture_line, parse_activation_line};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

/// Binds `path` and spawns a task that forwards each activation line to
/// `activations`. Malformed lines are logged and skipped. The task ends when
/// the receiving side is dropped.
pub fn spawn_control_listener(
    activations: mpsc::Sender<MenuClick>,
    path: impl AsRef<Path>,
) -> Result<tokio::task::JoinHandle<()>> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path)?;
    tracing::info!(path = %path.display(), "control socket listening");

    let handle = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let tx = activations.clone();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(stream).lines();
                        while let Ok(Some(line)) = reader.next_line().await {
                            match parse_activation_line(&line) {
                                Some(click) => {
                                    if tx.send(click).await.is_err() {
                                        return;
                                    }
                                }
                                None => tracing::debug!(line = %line.trim(), "ignored control line"),
                            }
                        }
                    });
                }
                Err(e) => tracing::debug!("control socket accept: {}", e),
            }
            if activations.is_closed() {
                break;
            }
        }
    });
    Ok(handle)
}

/// Sends "capture <url>\n" to a running agent. Returns false if no agent is
/// listening (socket missing or connection refused). URLs that cannot be
/// framed as one line are an error either way.
pub async fn send_capture(socket_path: &Path, url: &str) -> Result<bool> {
    let msg = format!("{}\n", capture_line(url)?);
    if !socket_path.exists() {
        return Ok(false);
    }
    let mut stream = match UnixStream::connect(socket_path).await {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(path = %socket_path.display(), "agent not reachable: {}", e);
            return Ok(false);
        }
    };
    stream.write_all(msg.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(true)
}
