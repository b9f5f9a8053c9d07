//! Revision poller: turns writes made by other processes into change
//! notifications on the local channel.

use std::collections::BTreeMap;
use std::time::Duration;

use super::change::{ChangeOrigin, StoreChange};
use super::db::LinkStore;
use crate::links::StoreKey;

/// Polls per-key revisions and publishes the keys whose revision moved.
///
/// Local writes are published by `set` directly and show up again here on the
/// next poll; subscribers must tolerate duplicate notifications.
pub struct StoreWatcher {
    store: LinkStore,
    interval: Duration,
    last: BTreeMap<StoreKey, i64>,
}

impl StoreWatcher {
    pub fn new(store: LinkStore, interval: Duration) -> Self {
        Self {
            store,
            interval,
            last: BTreeMap::new(),
        }
    }

    /// Record the current revisions as the baseline without publishing.
    pub async fn prime(&mut self) -> anyhow::Result<()> {
        self.last = self.store.revisions().await?;
        Ok(())
    }

    /// One poll: returns (and publishes) the change since the previous poll, if any.
    pub async fn poll_once(&mut self) -> anyhow::Result<Option<StoreChange>> {
        let current = self.store.revisions().await?;
        let changed: Vec<StoreKey> = current
            .iter()
            .filter(|&(k, rev)| self.last.get(k) != Some(rev))
            .map(|(k, _)| *k)
            .collect();
        self.last = current;
        if changed.is_empty() {
            return Ok(None);
        }
        let change = StoreChange::new(changed, ChangeOrigin::External);
        self.store.publish(change.clone());
        Ok(Some(change))
    }

    /// Spawns the polling loop. Read errors are logged and the loop keeps going.
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.prime().await {
                tracing::warn!("store watcher: initial read failed: {:#}", e);
            }
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.poll_once().await {
                    tracing::warn!("store watcher: poll failed: {:#}", e);
                }
            }
        })
    }
}
