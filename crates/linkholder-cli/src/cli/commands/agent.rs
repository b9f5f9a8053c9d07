//! `linkholder agent` – long-running background agent.

use anyhow::{Context, Result};
use linkholder_core::agent::BackgroundAgent;
use linkholder_core::config::{LinkholderConfig, StatePaths};
use linkholder_core::store::{LinkStore, StoreWatcher};
use tokio::sync::mpsc;

use super::install::{file_indicator, menu_host};
use crate::cli::control_socket;

pub async fn run_agent(
    store: &LinkStore,
    cfg: &LinkholderConfig,
    paths: &StatePaths,
    installed: bool,
) -> Result<()> {
    let mut agent = BackgroundAgent::new(store.clone(), menu_host(paths), file_indicator(paths));
    let badge = if installed {
        agent.on_installed().await?
    } else {
        agent.on_startup().await?
    };
    tracing::info!(badge = %badge, "agent started");

    let changes = store.subscribe();
    let _watcher = StoreWatcher::new(store.clone(), cfg.watch_interval()).spawn();

    let (tx, rx) = mpsc::channel(64);
    let socket = &paths.control_socket;
    let _listener = control_socket::spawn_control_listener(tx, socket)
        .with_context(|| format!("bind control socket {}", socket.display()))?;
    println!("Agent running (control socket {})", socket.display());

    agent.run(rx, changes).await;
    Ok(())
}
