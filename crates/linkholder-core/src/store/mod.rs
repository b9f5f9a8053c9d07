//! Persistent link store (SQLite via sqlx): the only state shared between
//! the background agent and the management panel.
//!
//! Holds the four link lists and the download folder name under fixed keys,
//! offers whole-value `get`/`set`, and broadcasts the written keys after every
//! `set` so views can re-derive themselves without knowing who wrote.

mod change;
mod db;
mod typed;
mod value;
mod watch;

pub use change::{ChangeOrigin, StoreChange};
pub use db::LinkStore;
pub use value::{Record, Snapshot, StoreValue};
pub use watch::StoreWatcher;

#[cfg(test)]
pub(crate) use db::open_memory;
