//! URL presentation and filename derivation.
//!
//! Both are pure functions of the stored URL: `shorten` for panel display,
//! `derive_download_filename` for the bulk-download destination.

mod filename;
mod sanitize;
mod shorten;

pub use filename::{derive_download_filename, DEFAULT_FILENAME};
pub use sanitize::{percent_decode_strict, replace_unsafe_chars};
pub use shorten::{shorten, truncate_with_ellipsis, DEFAULT_MAX_LENGTH};
