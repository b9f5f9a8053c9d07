//! `linkholder install` – register the menu item, seed the store, publish the badge.

use anyhow::Result;
use linkholder_core::agent::{BackgroundAgent, ManifestMenuHost};
use linkholder_core::config::StatePaths;
use linkholder_core::indicator::FileIndicator;
use linkholder_core::store::LinkStore;

pub(crate) fn file_indicator(paths: &StatePaths) -> FileIndicator {
    FileIndicator::new(&paths.badge)
}

pub(crate) fn menu_host(paths: &StatePaths) -> ManifestMenuHost {
    ManifestMenuHost::new(&paths.menu)
}

pub async fn run_install(store: &LinkStore, paths: &StatePaths) -> Result<()> {
    let mut agent = BackgroundAgent::new(store.clone(), menu_host(paths), file_indicator(paths));
    let badge = agent.on_installed().await?;
    println!("Registered context-menu item in {}", paths.menu.display());
    println!("Badge: {}", badge);
    Ok(())
}
