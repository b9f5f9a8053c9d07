//! Panel row actions: assign, discard, remove, clear, clear-all.

use anyhow::Result;
use linkholder_core::config::{LinkholderConfig, StatePaths};
use linkholder_core::links::{Category, LinkId, ListKey};
use linkholder_core::panel::{AlwaysConfirm, Confirm};
use linkholder_core::store::LinkStore;

use super::{panel, refresh_badge};
use crate::cli::prompt::TerminalConfirm;

pub async fn run_assign(
    store: &LinkStore,
    cfg: &LinkholderConfig,
    paths: &StatePaths,
    id: LinkId,
    category: Category,
) -> Result<()> {
    let out = panel(store, cfg).assign_by_id(id, category).await?;
    refresh_badge(store, paths).await;
    if out.inserted {
        println!("Moved {id} to {category}");
    } else {
        println!("{category} already has that URL; removed {id} from pending");
    }
    Ok(())
}

pub async fn run_discard(
    store: &LinkStore,
    cfg: &LinkholderConfig,
    paths: &StatePaths,
    id: LinkId,
) -> Result<()> {
    run_remove(store, cfg, paths, ListKey::Pending, id).await
}

pub async fn run_remove(
    store: &LinkStore,
    cfg: &LinkholderConfig,
    paths: &StatePaths,
    list: ListKey,
    id: LinkId,
) -> Result<()> {
    let removed = panel(store, cfg).remove(list, id).await?;
    if removed == 0 {
        println!("No entry {id} in {list}");
        return Ok(());
    }
    if list == ListKey::Pending {
        refresh_badge(store, paths).await;
    }
    println!("Removed {id} from {list}");
    Ok(())
}

pub async fn run_clear(
    store: &LinkStore,
    cfg: &LinkholderConfig,
    paths: &StatePaths,
    list: ListKey,
) -> Result<()> {
    panel(store, cfg).clear(list).await?;
    if list == ListKey::Pending {
        refresh_badge(store, paths).await;
    }
    println!("Cleared {list}");
    Ok(())
}

pub async fn run_clear_all(store: &LinkStore, cfg: &LinkholderConfig, yes: bool) -> Result<()> {
    let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &TerminalConfirm };
    if panel(store, cfg).clear_all_categorized(confirm).await? {
        println!("Cleared model, footprint and symbol lists");
    } else {
        println!("Nothing cleared");
    }
    Ok(())
}
