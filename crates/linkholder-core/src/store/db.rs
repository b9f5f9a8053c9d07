//! SQLite-backed key-value store implementation.
//!
//! Each store key is one row; a write replaces the whole value and bumps the
//! row's revision so watchers in other processes can see which keys changed.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::broadcast;

use super::change::{ChangeOrigin, StoreChange};
use super::value::{Record, StoreValue};
use crate::links::StoreKey;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the persistent link store.
///
/// Cloning is cheap; clones share the pool and the change channel, so a
/// subscriber sees writes made through any clone.
///
/// Read-modify-write sequences built on `get`/`set` are not isolated from
/// other writers: two processes updating the same key concurrently can lose
/// one update (last write wins).
#[derive(Clone)]
pub struct LinkStore {
    pub(crate) pool: Pool<Sqlite>,
    changes: broadcast::Sender<StoreChange>,
}

impl LinkStore {
    /// Open (or create) the store at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create store dir: {}", parent.display()))?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await
            .with_context(|| format!("open store: {}", path.display()))?;
        let store = Self::from_pool(pool);
        store.migrate().await?;
        tracing::debug!(path = %path.display(), "link store opened");
        Ok(store)
    }

    fn from_pool(pool: Pool<Sqlite>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { pool, changes }
    }

    async fn migrate(&self) -> Result<()> {
        // `rev` starts at 1 and is incremented on every write of the key.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                rev INTEGER NOT NULL DEFAULT 1
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Subscribe to change notifications (keys written by any `set`, plus
    /// external writes when a `StoreWatcher` is running).
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    pub(crate) fn publish(&self, change: StoreChange) {
        // No receivers is fine: nobody is listening right now.
        let _ = self.changes.send(change);
    }

    /// Current values for `keys`. Keys never written come back as their
    /// defaults (empty list / default folder name).
    pub async fn get(&self, keys: &[StoreKey]) -> Result<Record> {
        let rows = sqlx::query(r#"SELECT key, value FROM kv"#)
            .fetch_all(&self.pool)
            .await
            .context("read store")?;

        let mut stored: BTreeMap<StoreKey, String> = BTreeMap::new();
        for row in rows {
            let name: String = row.get("key");
            if let Some(key) = StoreKey::from_name(&name) {
                stored.insert(key, row.get("value"));
            }
        }

        let mut out = Record::new();
        for &key in keys {
            let value = match stored.remove(&key) {
                Some(text) => StoreValue::decode(key, &text),
                None => StoreValue::default_for(key),
            };
            out.insert(key, value);
        }
        Ok(out)
    }

    /// Merge `patch` into the store in one transaction and notify subscribers
    /// of the written keys.
    pub async fn set(&self, patch: Record) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await.context("begin store write")?;
        let mut keys = Vec::with_capacity(patch.len());
        for (key, value) in &patch {
            let text = value.encode()?;
            sqlx::query(
                r#"
                INSERT INTO kv (key, value, rev) VALUES (?1, ?2, 1)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    rev = kv.rev + 1
                "#,
            )
            .bind(key.as_str())
            .bind(text)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("write store key {}", key))?;
            keys.push(*key);
        }
        tx.commit().await.context("commit store write")?;

        tracing::trace!(?keys, "store keys written");
        self.publish(StoreChange::new(keys, ChangeOrigin::Local));
        Ok(())
    }

    /// Write defaults for every key that has never been written. Existing
    /// values are left untouched. Returns the keys that were seeded.
    pub async fn seed_defaults(&self) -> Result<Vec<StoreKey>> {
        let mut seeded = Vec::new();
        for key in StoreKey::ALL {
            let text = StoreValue::default_for(key).encode()?;
            let r = sqlx::query(r#"INSERT OR IGNORE INTO kv (key, value, rev) VALUES (?1, ?2, 1)"#)
                .bind(key.as_str())
                .bind(text)
                .execute(&self.pool)
                .await
                .with_context(|| format!("seed store key {}", key))?;
            if r.rows_affected() > 0 {
                seeded.push(key);
            }
        }
        if !seeded.is_empty() {
            tracing::info!(?seeded, "seeded default store values");
            self.publish(StoreChange::new(seeded.clone(), ChangeOrigin::Local));
        }
        Ok(seeded)
    }

    /// Per-key revision counters, used to detect writes by other processes.
    pub async fn revisions(&self) -> Result<BTreeMap<StoreKey, i64>> {
        let rows = sqlx::query(r#"SELECT key, rev FROM kv"#)
            .fetch_all(&self.pool)
            .await
            .context("read store revisions")?;
        let mut out = BTreeMap::new();
        for row in rows {
            let name: String = row.get("key");
            if let Some(key) = StoreKey::from_name(&name) {
                out.insert(key, row.get::<i64, _>("rev"));
            }
        }
        Ok(out)
    }

    /// Raw write of an arbitrary JSON value under `key`, bypassing typing.
    /// Only used to exercise lenient decoding.
    #[cfg(test)]
    pub(crate) async fn put_raw(&self, key: StoreKey, json: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, rev) VALUES (?1, ?2, 1)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, rev = kv.rev + 1
            "#,
        )
        .bind(key.as_str())
        .bind(json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
/// Open an in-memory store for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<LinkStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = LinkStore::from_pool(pool);
    store.migrate().await?;
    Ok(store)
}
