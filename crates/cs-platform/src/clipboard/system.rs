//! System clipboard adapter over `clipboard-rs`.
//!
//! `ClipboardContext` is not async; reads and writes run on blocking
//! workers with the context behind a mutex.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use std::sync::{Arc, Mutex};
use tokio::task::spawn_blocking;

use cs_core::ports::SystemClipboardPort;

pub struct SystemClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let context =
            ClipboardContext::new().map_err(|e| anyhow!("ClipboardContext::new failed: {e}"))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

#[async_trait]
impl SystemClipboardPort for SystemClipboard {
    async fn read_text(&self) -> Result<Option<String>> {
        let inner = Arc::clone(&self.inner);
        spawn_blocking(move || {
            let ctx = inner.lock().unwrap();
            if !ctx.has(ContentFormat::Text) {
                return Ok(None);
            }
            ctx.get_text()
                .map(Some)
                .map_err(|e| anyhow!("clipboard text read failed: {e}"))
        })
        .await
        .context("clipboard read worker failed")?
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        spawn_blocking(move || {
            let ctx = inner.lock().unwrap();
            ctx.set_text(text)
                .map_err(|e| anyhow!("clipboard text write failed: {e}"))
        })
        .await
        .context("clipboard write worker failed")?
    }
}
