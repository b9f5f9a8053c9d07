//! Context-menu item registration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Id of the single link context-menu item.
pub const MENU_ITEM_ID: &str = "SEND_TO_LINK_HOLDER";
/// Title shown in the context menu.
pub const MENU_ITEM_TITLE: &str = "Send Link to Holder";

/// Targets a menu item is offered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuContext {
    Link,
    Page,
    Selection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

impl MenuItem {
    /// The "Send Link to Holder" item, scoped to link targets only.
    pub fn send_link_to_holder() -> Self {
        Self {
            id: MENU_ITEM_ID.to_string(),
            title: MENU_ITEM_TITLE.to_string(),
            contexts: vec![MenuContext::Link],
        }
    }
}

/// Platform service that owns context-menu items.
pub trait MenuHost: Send + Sync {
    fn has_item(&self, id: &str) -> Result<bool>;
    /// Create or replace the item with the same id.
    fn register(&self, item: &MenuItem) -> Result<()>;
}

/// Menu host backed by a `menu.json` manifest that a desktop or browser
/// bridge reads to build its context menu.
#[derive(Debug, Clone)]
pub struct ManifestMenuHost {
    path: PathBuf,
}

impl ManifestMenuHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<MenuItem>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).with_context(|| format!("read menu: {}", self.path.display())),
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable menu manifest: {}", e);
                Ok(Vec::new())
            }
        }
    }
}

impl MenuHost for ManifestMenuHost {
    fn has_item(&self, id: &str) -> Result<bool> {
        Ok(self.load()?.iter().any(|i| i.id == id))
    }

    fn register(&self, item: &MenuItem) -> Result<()> {
        let mut items = self.load()?;
        items.retain(|i| i.id != item.id);
        items.push(item.clone());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&items).context("serialize menu")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("write menu: {}", self.path.display()))?;
        Ok(())
    }
}
