//! Link data model: entries, the four list names, store keys and list ops.

mod list;
mod types;

pub use list::{contains_url, decode_lenient, find_id, next_id, remove_id};
pub use types::{Category, LinkEntry, LinkId, ListKey, StoreKey, UnknownList};

/// Default destination subfolder for bulk downloads.
pub const DEFAULT_FOLDER_NAME: &str = "__SimonShark1__";

/// Current time as Unix milliseconds (entry ids).
pub fn now_millis() -> LinkId {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as LinkId
}
