//! Typed accessors over `get`/`set` for the lists and the folder name.

use anyhow::Result;

use super::db::LinkStore;
use super::value::{Record, Snapshot, StoreValue};
use crate::links::{LinkEntry, ListKey, StoreKey, DEFAULT_FOLDER_NAME};

impl LinkStore {
    pub async fn get_list(&self, key: ListKey) -> Result<Vec<LinkEntry>> {
        let store_key = key.store_key();
        let mut record = self.get(&[store_key]).await?;
        Ok(record
            .remove(&store_key)
            .map(StoreValue::into_links)
            .unwrap_or_default())
    }

    /// Replaces the whole list under `key`.
    pub async fn set_list(&self, key: ListKey, links: Vec<LinkEntry>) -> Result<()> {
        let mut patch = Record::new();
        patch.insert(key.store_key(), StoreValue::Links(links));
        self.set(patch).await
    }

    /// Stored folder name exactly as the user entered it (untrimmed).
    pub async fn folder_name(&self) -> Result<String> {
        let mut record = self.get(&[StoreKey::DownloadFolderName]).await?;
        Ok(record
            .remove(&StoreKey::DownloadFolderName)
            .and_then(StoreValue::into_text)
            .unwrap_or_else(|| DEFAULT_FOLDER_NAME.to_string()))
    }

    pub async fn set_folder_name(&self, name: &str) -> Result<()> {
        let mut patch = Record::new();
        patch.insert(
            StoreKey::DownloadFolderName,
            StoreValue::Text(name.to_string()),
        );
        self.set(patch).await
    }

    /// All lists and the folder name in one read.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let record = self.get(&StoreKey::ALL).await?;
        Ok(Snapshot::from_record(record))
    }
}
