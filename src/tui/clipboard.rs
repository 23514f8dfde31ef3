//! System clipboard access for the copy-link key
//!
//! Uses `arboard` for cross-platform support. The clipboard is opened per
//! copy rather than held for the lifetime of the app.

use anyhow::{bail, Context, Result};
use arboard::Clipboard;

/// Copy a link to the system clipboard
///
/// Fails on an empty link, and when there is no clipboard to talk to
/// (headless Linux without a display server, for one).
pub fn copy_link(link: &str) -> Result<()> {
    let link = link.trim();
    if link.is_empty() {
        bail!("Nothing to copy");
    }
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(link)
        .context("Failed to set clipboard text")?;
    tracing::debug!(link, "copied link to clipboard");
    Ok(())
}
