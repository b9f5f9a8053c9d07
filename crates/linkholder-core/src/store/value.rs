//! Typed store values and their JSON encoding.

use anyhow::Result;
use std::collections::BTreeMap;

use crate::links::{decode_lenient, LinkEntry, ListKey, StoreKey, DEFAULT_FOLDER_NAME};

/// Value held under one store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    Links(Vec<LinkEntry>),
    Text(String),
}

/// A set of key/value pairs: the result of `get`, the argument of `set`.
pub type Record = BTreeMap<StoreKey, StoreValue>;

impl StoreValue {
    /// Value reported for a key that was never written.
    pub fn default_for(key: StoreKey) -> Self {
        match key.list() {
            Some(_) => StoreValue::Links(Vec::new()),
            None => StoreValue::Text(DEFAULT_FOLDER_NAME.to_string()),
        }
    }

    pub(crate) fn encode(&self) -> Result<String> {
        Ok(match self {
            StoreValue::Links(links) => serde_json::to_string(links)?,
            StoreValue::Text(s) => serde_json::to_string(s)?,
        })
    }

    /// Decodes the persisted text for `key`. Unparseable or mistyped values
    /// fall back to the key's default; list elements are decoded leniently.
    pub(crate) fn decode(key: StoreKey, text: &str) -> Self {
        let json: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(%key, "unparseable store value: {}", e);
                return Self::default_for(key);
            }
        };
        match key.list() {
            Some(_) => StoreValue::Links(decode_lenient(json)),
            None => match json {
                serde_json::Value::String(s) => StoreValue::Text(s),
                other => {
                    tracing::warn!(%key, "expected a string, found {}", other);
                    Self::default_for(key)
                }
            },
        }
    }

    pub fn into_links(self) -> Vec<LinkEntry> {
        match self {
            StoreValue::Links(links) => links,
            StoreValue::Text(_) => Vec::new(),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            StoreValue::Text(s) => Some(s),
            StoreValue::Links(_) => None,
        }
    }
}

/// Every key's current value, as the panel renders it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub pending: Vec<LinkEntry>,
    pub model: Vec<LinkEntry>,
    pub footprint: Vec<LinkEntry>,
    pub symbol: Vec<LinkEntry>,
    pub download_folder_name: String,
}

impl Snapshot {
    pub fn list(&self, key: ListKey) -> &[LinkEntry] {
        match key {
            ListKey::Pending => &self.pending,
            ListKey::Model => &self.model,
            ListKey::Footprint => &self.footprint,
            ListKey::Symbol => &self.symbol,
        }
    }

    pub(crate) fn from_record(mut record: Record) -> Self {
        let mut take = |key: StoreKey| {
            record
                .remove(&key)
                .unwrap_or_else(|| StoreValue::default_for(key))
        };
        let pending = take(StoreKey::Pending).into_links();
        let model = take(StoreKey::Model).into_links();
        let footprint = take(StoreKey::Footprint).into_links();
        let symbol = take(StoreKey::Symbol).into_links();
        let download_folder_name = take(StoreKey::DownloadFolderName)
            .into_text()
            .unwrap_or_else(|| DEFAULT_FOLDER_NAME.to_string());
        Self {
            pending,
            model,
            footprint,
            symbol,
            download_folder_name,
        }
    }
}
