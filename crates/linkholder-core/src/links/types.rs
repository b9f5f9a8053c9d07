//! Link entries, list names and store keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable handle of a link entry (creation time in Unix milliseconds).
pub type LinkId = i64;

/// One captured link. Moved between lists unchanged; never re-identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub url: String,
    pub id: LinkId,
}

impl LinkEntry {
    pub fn new(url: impl Into<String>, id: LinkId) -> Self {
        Self { url: url.into(), id }
    }
}

/// The four named link lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKey {
    Pending,
    Model,
    Footprint,
    Symbol,
}

impl ListKey {
    pub const ALL: [ListKey; 4] = [
        ListKey::Pending,
        ListKey::Model,
        ListKey::Footprint,
        ListKey::Symbol,
    ];

    /// Categorized lists in bulk-download order.
    pub const CATEGORIZED: [ListKey; 3] = [ListKey::Model, ListKey::Footprint, ListKey::Symbol];

    /// Short name used on the command line and in panel headings.
    pub fn as_str(self) -> &'static str {
        match self {
            ListKey::Pending => "pending",
            ListKey::Model => "model",
            ListKey::Footprint => "footprint",
            ListKey::Symbol => "symbol",
        }
    }

    pub fn store_key(self) -> StoreKey {
        match self {
            ListKey::Pending => StoreKey::Pending,
            ListKey::Model => StoreKey::Model,
            ListKey::Footprint => StoreKey::Footprint,
            ListKey::Symbol => StoreKey::Symbol,
        }
    }

    pub fn is_categorized(self) -> bool {
        self != ListKey::Pending
    }
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list '{0}' (expected pending, model, footprint or symbol)")]
pub struct UnknownList(pub String);

impl FromStr for ListKey {
    type Err = UnknownList;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ListKey::Pending),
            "model" => Ok(ListKey::Model),
            "footprint" => Ok(ListKey::Footprint),
            "symbol" => Ok(ListKey::Symbol),
            _ => Err(UnknownList(s.to_string())),
        }
    }
}

/// Target of an assign: one of the categorized lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Model,
    Footprint,
    Symbol,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Model, Category::Footprint, Category::Symbol];

    pub fn list_key(self) -> ListKey {
        match self {
            Category::Model => ListKey::Model,
            Category::Footprint => ListKey::Footprint,
            Category::Symbol => ListKey::Symbol,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.list_key().as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownList;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ListKey>()? {
            ListKey::Model => Ok(Category::Model),
            ListKey::Footprint => Ok(Category::Footprint),
            ListKey::Symbol => Ok(Category::Symbol),
            ListKey::Pending => Err(UnknownList(s.to_string())),
        }
    }
}

/// Fixed store keys. The string forms are the persisted record names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    Pending,
    Model,
    Footprint,
    Symbol,
    DownloadFolderName,
}

impl StoreKey {
    pub const ALL: [StoreKey; 5] = [
        StoreKey::Pending,
        StoreKey::Model,
        StoreKey::Footprint,
        StoreKey::Symbol,
        StoreKey::DownloadFolderName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Pending => "linksToCategorize",
            StoreKey::Model => "modelLinks",
            StoreKey::Footprint => "footprintLinks",
            StoreKey::Symbol => "symbolLinks",
            StoreKey::DownloadFolderName => "downloadFolderName",
        }
    }

    /// Key for a persisted record name; None for names this store does not own.
    pub fn from_name(s: &str) -> Option<Self> {
        StoreKey::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// The list this key holds, or None for the folder-name scalar.
    pub fn list(self) -> Option<ListKey> {
        match self {
            StoreKey::Pending => Some(ListKey::Pending),
            StoreKey::Model => Some(ListKey::Model),
            StoreKey::Footprint => Some(ListKey::Footprint),
            StoreKey::Symbol => Some(ListKey::Symbol),
            StoreKey::DownloadFolderName => None,
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_key_names_round_trip() {
        for key in StoreKey::ALL {
            assert_eq!(StoreKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(StoreKey::from_name("linkstocategorize"), None);
        assert_eq!(StoreKey::from_name("other"), None);
    }

    #[test]
    fn category_rejects_pending() {
        assert_eq!(" Model ".parse::<Category>(), Ok(Category::Model));
        assert!("pending".parse::<Category>().is_err());
        assert_eq!("pending".parse::<ListKey>(), Ok(ListKey::Pending));
    }
}
