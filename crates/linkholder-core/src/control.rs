//! Activation channel between a running agent and one-shot CLI invocations.
//!
//! The agent listens on a Unix socket (`StatePaths::control_socket`). Each
//! line is one activation of the context-menu item: `capture <url>`.

use anyhow::Result;

use crate::agent::{MenuClick, MENU_ITEM_ID};

pub const CAPTURE_COMMAND: &str = "capture";

/// Line sent for a capture request (no trailing newline). URLs with control
/// characters are refused: a newline would split the request into two lines.
pub fn capture_line(url: &str) -> Result<String> {
    let url = url.trim();
    if url.chars().any(char::is_control) {
        anyhow::bail!("link URL contains control characters: {:?}", url);
    }
    Ok(format!("{} {}", CAPTURE_COMMAND, url))
}

/// Parses one protocol line into a menu activation.
///
/// `capture` with no argument is an activation without a link URL, which the
/// agent ignores. Unknown commands yield `None`.
pub fn parse_activation_line(line: &str) -> Option<MenuClick> {
    let line = line.trim();
    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    if cmd != CAPTURE_COMMAND {
        return None;
    }
    Some(MenuClick {
        menu_item_id: MENU_ITEM_ID.to_string(),
        link_url: (!rest.is_empty()).then(|| rest.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_capture_with_url() {
        let click = parse_activation_line("capture https://h/a b.step\n").unwrap();
        assert_eq!(click.menu_item_id, MENU_ITEM_ID);
        assert_eq!(click.link_url.as_deref(), Some("https://h/a b.step"));
    }

    #[test]
    fn bare_capture_has_no_link() {
        let click = parse_activation_line("  capture  ").unwrap();
        assert_eq!(click.link_url, None);
    }

    #[test]
    fn unknown_or_empty_lines_rejected() {
        assert!(parse_activation_line("").is_none());
        assert!(parse_activation_line("pause 1").is_none());
        assert!(parse_activation_line("captured https://h").is_none());
    }

    #[test]
    fn capture_line_parses_back() {
        let line = capture_line(" https://h/x ").unwrap();
        assert_eq!(line, "capture https://h/x");
        assert_eq!(
            parse_activation_line(&line).unwrap().link_url.as_deref(),
            Some("https://h/x")
        );
    }

    #[test]
    fn capture_line_refuses_embedded_newline() {
        assert!(capture_line("https://h/a\ncapture https://evil/b").is_err());
        assert!(capture_line("https://h/a\rb").is_err());
        assert!(capture_line("https://h/a\tb").is_err());
    }
}
