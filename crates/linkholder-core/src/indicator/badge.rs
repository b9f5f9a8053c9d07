//! Pending-count badge: label plus color.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Badge background color as RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeColor(pub [u8; 4]);

impl BadgeColor {
    /// Nothing pending.
    pub const TRANSPARENT: BadgeColor = BadgeColor([0, 0, 0, 0]);
    /// Links waiting for triage (`#FFA500`).
    pub const ATTENTION: BadgeColor = BadgeColor([0xFF, 0xA5, 0x00, 0xFF]);
    /// Indicator could not be computed (`#FF0000`).
    pub const ALERT: BadgeColor = BadgeColor([0xFF, 0x00, 0x00, 0xFF]);

    pub fn is_transparent(self) -> bool {
        self.0[3] == 0
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 0 {
            f.write_str("transparent")
        } else {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        }
    }
}

/// What the indicator shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub color: BadgeColor,
}

/// Label shown when the pending count could not be read or published.
pub const ERROR_TEXT: &str = "ERR";

impl Badge {
    /// Empty and transparent for zero, otherwise the decimal count on attention color.
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            Badge {
                text: String::new(),
                color: BadgeColor::TRANSPARENT,
            }
        } else {
            Badge {
                text: count.to_string(),
                color: BadgeColor::ATTENTION,
            }
        }
    }

    pub fn error() -> Self {
        Badge {
            text: ERROR_TEXT.to_string(),
            color: BadgeColor::ALERT,
        }
    }

    pub fn is_error(&self) -> bool {
        self.text == ERROR_TEXT && self.color == BadgeColor::ALERT
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "(empty) {}", self.color)
        } else {
            write!(f, "{} {}", self.text, self.color)
        }
    }
}
