//! Change notifications published after store writes.

use crate::links::StoreKey;

/// Where a change was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A `set` through this process's store handle.
    Local,
    /// A revision bump picked up by a `StoreWatcher` (usually another process).
    External,
}

/// The keys touched by one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub keys: Vec<StoreKey>,
    pub origin: ChangeOrigin,
}

impl StoreChange {
    pub fn new(keys: Vec<StoreKey>, origin: ChangeOrigin) -> Self {
        Self { keys, origin }
    }

    /// True if any of the four link lists changed.
    pub fn touches_lists(&self) -> bool {
        self.keys.iter().any(|k| k.list().is_some())
    }

    pub fn touches(&self, key: StoreKey) -> bool {
        self.keys.contains(&key)
    }
}
