//! System clipboard — copies the plain-text form of a marked-up message.

use crate::safety::markup::strip_markers;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}

/// Strip emphasis markers from `marked` and place the result on the
/// clipboard. Returns the text that was copied.
pub fn copy_plain(marked: &str) -> Result<String, ClipboardError> {
    let plain = strip_markers(marked);
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(plain.as_str())?;
    log::info!("[CLIPBOARD] Copied {} chars", plain.len());
    Ok(plain)
}
