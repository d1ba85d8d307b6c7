//! In-memory clipboard adapter.
//!
//! Used by tests and by headless wiring where no display server is
//! available. Behaves like a single-slot text clipboard.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use cs_core::ports::SystemClipboardPort;

#[derive(Default)]
pub struct InMemoryClipboard {
    content: Mutex<Option<String>>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(text.into())),
        }
    }

    /// Synchronous write for test setup, bypassing the port.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.content.lock().unwrap() = Some(text.into());
    }

    pub fn current(&self) -> Option<String> {
        self.content.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemClipboardPort for InMemoryClipboard {
    async fn read_text(&self) -> Result<Option<String>> {
        Ok(self.content.lock().unwrap().clone())
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        *self.content.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}
