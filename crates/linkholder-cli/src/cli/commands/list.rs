//! `linkholder list` – the management panel as text.

use anyhow::Result;
use linkholder_core::config::LinkholderConfig;
use linkholder_core::store::LinkStore;

pub async fn run_list(store: &LinkStore, cfg: &LinkholderConfig, full: bool) -> Result<()> {
    let view = super::panel(store, cfg).view().await?;
    print!("{}", view.to_text(full));
    Ok(())
}
