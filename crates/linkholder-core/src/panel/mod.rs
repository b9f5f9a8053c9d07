//! Management panel: renders the four lists and applies the user's triage
//! actions to the store.

mod ops;
mod render;

pub use ops::{AlwaysConfirm, AssignOutcome, Confirm, Panel, CLEAR_ALL_PROMPT};
pub use render::{
    render, PanelView, Row, RowAction, Section, SectionBody, EMPTY_PLACEHOLDER,
    PENDING_PLACEHOLDER,
};

use crate::links::LinkId;

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("no pending link with id {0}")]
    NotPending(LinkId),
}
