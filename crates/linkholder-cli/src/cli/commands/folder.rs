//! `linkholder folder [<name>]` – show or rename the download folder.

use anyhow::Result;
use linkholder_core::config::LinkholderConfig;
use linkholder_core::download::resolve_folder_name;
use linkholder_core::store::LinkStore;

pub async fn run_folder(
    store: &LinkStore,
    cfg: &LinkholderConfig,
    name: Option<&str>,
) -> Result<()> {
    let panel = super::panel(store, cfg);
    match name {
        Some(name) => {
            panel.set_folder_name(name).await?;
            println!("Download folder: {}", resolve_folder_name(name));
        }
        None => println!("{}", panel.folder_name().await?),
    }
    Ok(())
}
