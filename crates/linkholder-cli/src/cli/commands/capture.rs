//! `linkholder capture <url>` – the context-menu activation from a shell.
//! Hands the link to the agent serving this store; captures in-process otherwise.

use anyhow::Result;
use linkholder_core::agent::{capture_link, CaptureOutcome};
use linkholder_core::config::StatePaths;
use linkholder_core::store::LinkStore;

use super::refresh_badge;
use crate::cli::control_socket;

pub async fn run_capture(store: &LinkStore, paths: &StatePaths, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        println!("No link target; nothing captured");
        return Ok(());
    }
    if control_socket::send_capture(&paths.control_socket, url).await? {
        println!("Sent to agent: {url}");
        return Ok(());
    }

    match capture_link(store, url).await? {
        CaptureOutcome::Added(entry) => {
            refresh_badge(store, paths).await;
            println!("Added {} ({})", entry.id, entry.url);
        }
        CaptureOutcome::Duplicate => println!("Already pending: {url}"),
    }
    Ok(())
}
