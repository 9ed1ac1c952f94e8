//! Clipboard backends for the copy controller

use crate::utils::error::{GrabError, GrabResult};

/// Something that can receive copied text
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> GrabResult<()>;
}

/// In-memory clipboard (for tests and headless use)
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write, like a page without focus
    pub fn rejecting() -> Self {
        Self {
            contents: None,
            reject: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> GrabResult<()> {
        if self.reject {
            return Err(GrabError::clipboard("write rejected"));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// The operating system clipboard
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> GrabResult<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| GrabError::clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> GrabResult<()> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| GrabError::clipboard(e.to_string()))
    }
}
