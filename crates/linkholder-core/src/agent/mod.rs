//! Background agent: registers the link context-menu item, captures
//! activated links into `pending`, and keeps the pending-count indicator in
//! step with the store.
//!
//! The agent never talks to the panel. It reacts to menu activations and to
//! store change notifications, whoever caused them.

mod capture;
mod menu;

pub use capture::{capture_link, CaptureOutcome};
#[cfg(test)]
pub(crate) use capture::capture_link_at;
pub use menu::{ManifestMenuHost, MenuContext, MenuHost, MenuItem, MENU_ITEM_ID, MENU_ITEM_TITLE};

use anyhow::Result;
use tokio::sync::{broadcast, mpsc};

use crate::indicator::{refresh_indicator, Badge, Indicator};
use crate::store::{LinkStore, StoreChange};

/// One context-menu activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuClick {
    pub menu_item_id: String,
    /// Target link; None when the menu was opened on something that is not a link.
    pub link_url: Option<String>,
}

impl MenuClick {
    /// Activation of our own item on `url`.
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            menu_item_id: MENU_ITEM_ID.to_string(),
            link_url: Some(url.into()),
        }
    }
}

/// Whether the menu item is known to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Idle,
    MenuRegistered,
}

/// What happened to one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Captured(CaptureOutcome),
    /// Other menu item, or no link target.
    Ignored,
}

pub struct BackgroundAgent<M, I> {
    store: LinkStore,
    menu: M,
    indicator: I,
    state: AgentState,
}

impl<M: MenuHost, I: Indicator> BackgroundAgent<M, I> {
    pub fn new(store: LinkStore, menu: M, indicator: I) -> Self {
        Self {
            store,
            menu,
            indicator,
            state: AgentState::Idle,
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn store(&self) -> &LinkStore {
        &self.store
    }

    /// Install/update: register the menu item, seed missing store keys,
    /// publish the indicator.
    pub async fn on_installed(&mut self) -> Result<Badge> {
        self.register_menu()?;
        self.store.seed_defaults().await?;
        Ok(self.refresh().await)
    }

    /// Environment startup: publish the indicator. The menu item is only
    /// registered again if the host no longer has it.
    pub async fn on_startup(&mut self) -> Result<Badge> {
        self.ensure_menu()?;
        Ok(self.refresh().await)
    }

    /// Registers the menu item if the host reports it absent.
    pub fn ensure_menu(&mut self) -> Result<()> {
        if self.menu.has_item(MENU_ITEM_ID)? {
            self.state = AgentState::MenuRegistered;
            return Ok(());
        }
        self.register_menu()
    }

    fn register_menu(&mut self) -> Result<()> {
        self.menu.register(&MenuItem::send_link_to_holder())?;
        self.state = AgentState::MenuRegistered;
        tracing::info!("context menu created");
        Ok(())
    }

    /// Handles one activation: captures the link into `pending` and refreshes
    /// the indicator. Activations of other items or without a link are no-ops.
    pub async fn on_menu_click(&self, click: &MenuClick) -> Result<ClickOutcome> {
        if click.menu_item_id != MENU_ITEM_ID {
            return Ok(ClickOutcome::Ignored);
        }
        let Some(url) = click.link_url.as_deref().filter(|u| !u.is_empty()) else {
            tracing::debug!("menu activated without a link target");
            return Ok(ClickOutcome::Ignored);
        };
        tracing::debug!(url, "context menu clicked for link");
        let outcome = capture_link(&self.store, url).await?;
        if matches!(outcome, CaptureOutcome::Added(_)) {
            self.refresh().await;
        }
        Ok(ClickOutcome::Captured(outcome))
    }

    /// Recompute and publish the indicator. Never fails; see `refresh_indicator`.
    pub async fn refresh(&self) -> Badge {
        refresh_indicator(&self.store, &self.indicator).await
    }

    /// Event loop: handles activations until the activation channel closes,
    /// and refreshes the indicator whenever a list key changes.
    ///
    /// A failed capture is logged; the loop keeps running.
    pub async fn run(
        &self,
        mut activations: mpsc::Receiver<MenuClick>,
        mut changes: broadcast::Receiver<StoreChange>,
    ) {
        loop {
            tokio::select! {
                click = activations.recv() => {
                    let Some(click) = click else { break };
                    if let Err(e) = self.on_menu_click(&click).await {
                        tracing::error!("error adding link to categorize: {:#}", e);
                    }
                }
                change = changes.recv() => match change {
                    Ok(change) if change.touches_lists() => {
                        self.refresh().await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::debug!(skipped = n, "change notifications lagged; refreshing");
                        self.refresh().await;
                    }
                    // The sender lives in `self.store`.
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
        tracing::info!("agent stopped: activation source closed");
    }
}
