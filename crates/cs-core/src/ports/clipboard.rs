//! Clipboard port - abstracts system clipboard access
//!
//! The engine reads and writes clipboard content exclusively through
//! this capability; it never implements clipboard plumbing itself.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SystemClipboardPort: Send + Sync {
    /// Read the current textual clipboard content.
    ///
    /// Returns `None` when the clipboard is empty or holds no text
    /// representation.
    async fn read_text(&self) -> Result<Option<String>>;

    /// Replace the clipboard content with `text`.
    async fn write_text(&self, text: &str) -> Result<()>;
}
