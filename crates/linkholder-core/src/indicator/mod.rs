//! Pending-count indicator.
//!
//! The count is a projection of the `pending` list; it is recomputed from the
//! store on every list change rather than tracked incrementally. Any failure
//! turns into the `ERR` badge instead of an error for the caller.

mod badge;
mod file;

pub use badge::{Badge, BadgeColor, ERROR_TEXT};
pub use file::FileIndicator;

use anyhow::Result;

use crate::links::ListKey;
use crate::store::LinkStore;

/// Platform surface that displays the badge.
pub trait Indicator: Send + Sync {
    fn publish(&self, badge: &Badge) -> Result<()>;
}

/// Reads `pending`, publishes its count and returns the badge shown.
///
/// A failed read or publish shows the error badge; if even that cannot be
/// published the failure is only logged.
pub async fn refresh_indicator(store: &LinkStore, indicator: &dyn Indicator) -> Badge {
    let badge = match store.get_list(ListKey::Pending).await {
        Ok(pending) => Badge::for_count(pending.len()),
        Err(e) => {
            tracing::error!("error updating badge: {:#}", e);
            return publish_error(indicator);
        }
    };
    match indicator.publish(&badge) {
        Ok(()) => {
            tracing::debug!(text = %badge.text, color = %badge.color, "badge updated");
            badge
        }
        Err(e) => {
            tracing::error!("error updating badge: {:#}", e);
            publish_error(indicator)
        }
    }
}

fn publish_error(indicator: &dyn Indicator) -> Badge {
    let badge = Badge::error();
    if let Err(e) = indicator.publish(&badge) {
        tracing::error!("could not publish error badge: {:#}", e);
    }
    badge
}
