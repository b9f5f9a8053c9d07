//! CLI command handlers. One file per command group.

mod agent;
mod badge;
mod capture;
mod download;
mod folder;
mod install;
mod list;
mod triage;

pub use agent::run_agent;
pub use badge::run_badge;
pub use capture::run_capture;
pub use download::run_download;
pub use folder::run_folder;
pub use install::run_install;
pub use list::run_list;
pub use triage::{run_assign, run_clear, run_clear_all, run_discard, run_remove};

use install::file_indicator;
use linkholder_core::config::{LinkholderConfig, StatePaths};
use linkholder_core::indicator::{refresh_indicator, Badge};
use linkholder_core::panel::Panel;
use linkholder_core::store::LinkStore;

pub(crate) fn panel(store: &LinkStore, cfg: &LinkholderConfig) -> Panel {
    Panel::new(store.clone(), cfg.shorten_max_length)
}

/// Republishes the badge after a one-shot edit, for when no agent is running.
/// Failures only cost a stale badge (see `refresh_indicator`).
pub(crate) async fn refresh_badge(store: &LinkStore, paths: &StatePaths) -> Badge {
    refresh_indicator(store, &file_indicator(paths)).await
}
