//! Panel mutations: assign, remove, clear, folder name.
//!
//! Each is a read-modify-write of whole lists against the store; see
//! `LinkStore` for the last-write-wins caveat.

use anyhow::Result;

use super::render::{render, PanelView};
use super::PanelError;
use crate::links::{self, Category, LinkEntry, LinkId, ListKey};
use crate::store::LinkStore;

/// Asks the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Confirmation already given (e.g. `--yes`).
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

pub const CLEAR_ALL_PROMPT: &str = "Are you sure you want to clear ALL categorized links (Model, Footprint, Symbol)? Links pending categorization will remain.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOutcome {
    /// False when the target list already had this URL.
    pub inserted: bool,
    /// Entries removed from `pending` by id.
    pub removed_from_pending: usize,
    /// Id the link has in the target list. Differs from the pending id only
    /// when the target already used that id for another URL.
    pub id: LinkId,
}

pub struct Panel {
    store: LinkStore,
    max_length: usize,
}

impl Panel {
    pub fn new(store: LinkStore, max_length: usize) -> Self {
        Self { store, max_length }
    }

    pub fn store(&self) -> &LinkStore {
        &self.store
    }

    /// Re-reads every list and renders the view.
    pub async fn view(&self) -> Result<PanelView> {
        let snapshot = self.store.snapshot().await?;
        Ok(render(&snapshot, self.max_length))
    }

    /// Moves `entry` into `target`: insert there unless the URL is present,
    /// then remove its id from `pending`. The second write only starts after
    /// the first succeeded.
    ///
    /// Ids stay unique within `target`: if another URL there already has
    /// `entry.id`, the inserted copy gets the next free id.
    pub async fn assign(&self, entry: &LinkEntry, target: Category) -> Result<AssignOutcome> {
        let target_key = target.list_key();
        let snapshot = self.store.snapshot().await?;
        let mut target_links = snapshot.list(target_key).to_vec();

        let (inserted, id) = match target_links.iter().find(|l| l.url == entry.url) {
            Some(existing) => {
                tracing::info!(list = %target_key, url = %entry.url, "link already exists in target list");
                (false, existing.id)
            }
            None => {
                let mut moved = entry.clone();
                if links::find_id(&target_links, moved.id).is_some() {
                    moved.id = links::next_id(ListKey::ALL.map(|l| snapshot.list(l)), moved.id);
                    tracing::debug!(from = entry.id, to = moved.id, list = %target_key, "id taken in target list; reassigned");
                }
                let id = moved.id;
                target_links.push(moved);
                self.store.set_list(target_key, target_links).await?;
                (true, id)
            }
        };

        let removed_from_pending = self.remove(ListKey::Pending, entry.id).await?;
        tracing::debug!(id, list = %target_key, inserted, "link assigned");
        Ok(AssignOutcome {
            inserted,
            removed_from_pending,
            id,
        })
    }

    /// `assign` for the pending entry with `id`.
    pub async fn assign_by_id(&self, id: LinkId, target: Category) -> Result<AssignOutcome> {
        let pending = self.store.get_list(ListKey::Pending).await?;
        let entry = links::find_id(&pending, id)
            .cloned()
            .ok_or(PanelError::NotPending(id))?;
        self.assign(&entry, target).await
    }

    /// Removes entries with `id` from `list`. Removing an absent id leaves the
    /// list as it was. Returns the number removed.
    pub async fn remove(&self, list: ListKey, id: LinkId) -> Result<usize> {
        let mut current = self.store.get_list(list).await?;
        let removed = links::remove_id(&mut current, id);
        self.store.set_list(list, current).await?;
        Ok(removed)
    }

    pub async fn clear(&self, list: ListKey) -> Result<()> {
        self.store.set_list(list, Vec::new()).await?;
        tracing::info!(%list, "list cleared");
        Ok(())
    }

    /// Clears model, footprint and symbol once `confirm` agrees. `pending` is
    /// never touched. Returns whether anything was cleared.
    pub async fn clear_all_categorized(&self, confirm: &dyn Confirm) -> Result<bool> {
        if !confirm.confirm(CLEAR_ALL_PROMPT)? {
            tracing::debug!("clear all categorized declined");
            return Ok(false);
        }
        for list in ListKey::CATEGORIZED {
            self.clear(list).await?;
        }
        Ok(true)
    }

    pub async fn folder_name(&self) -> Result<String> {
        self.store.folder_name().await
    }

    /// Stores the folder name as typed; trimming and defaulting happen at download time.
    pub async fn set_folder_name(&self, name: &str) -> Result<()> {
        self.store.set_folder_name(name).await
    }
}
