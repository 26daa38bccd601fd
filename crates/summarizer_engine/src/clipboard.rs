use std::thread;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(#[from] pub arboard::Error);

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes to the desktop clipboard through `arboard`.
///
/// On X11/Wayland the copied text disappears with the owning `Clipboard`, so the
/// instance is kept alive for `linger` after writing. Callers should run this
/// off their event loop.
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    linger: Duration,
}

impl SystemClipboard {
    pub fn new(linger: Duration) -> Self {
        Self { linger }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        if !self.linger.is_zero() {
            thread::sleep(self.linger);
        }
        Ok(())
    }
}
