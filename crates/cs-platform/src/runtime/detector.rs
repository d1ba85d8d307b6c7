//! Change-detection strategies.
//!
//! Two interchangeable strategies behind one interface:
//!
//! - `CounterStrategy` compares the OS pasteboard change counter and
//!   only reads content after the counter moved (enhanced
//!   monitoring, 100ms default tick).
//! - `HashPollingStrategy` reads content every tick and compares its
//!   fingerprint with the previous tick's (portable fallback, 1s
//!   default tick).
//!
//! Both arm a baseline on their first observation instead of
//! reporting the pre-existing clipboard content as a change.

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use cs_core::clipboard::{ClipboardSnapshot, Fingerprint};
use cs_core::errors::DetectionError;
use cs_core::ports::{ChangeCounterPort, SystemClipboardPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Native,
    Polling,
}

/// One tick worth of observation. Returns a snapshot when the
/// clipboard changed since the previous tick.
#[async_trait]
pub trait DetectionStrategy: Send {
    fn kind(&self) -> StrategyKind;

    async fn poll(
        &mut self,
        max_content_size: usize,
    ) -> Result<Option<ClipboardSnapshot>, DetectionError>;
}

pub struct CounterStrategy {
    counter: Arc<dyn ChangeCounterPort>,
    clipboard: Arc<dyn SystemClipboardPort>,
    last_count: Option<u64>,
}

impl CounterStrategy {
    pub fn new(counter: Arc<dyn ChangeCounterPort>, clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        Self {
            counter,
            clipboard,
            last_count: None,
        }
    }
}

#[async_trait]
impl DetectionStrategy for CounterStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Native
    }

    async fn poll(
        &mut self,
        max_content_size: usize,
    ) -> Result<Option<ClipboardSnapshot>, DetectionError> {
        let count = self.counter.change_count()?;

        let changed = match self.last_count {
            None => {
                self.last_count = Some(count);
                false
            }
            Some(prev) => prev != count,
        };

        if !changed {
            return Ok(None);
        }

        // Counter moved; only now pay for a content read. The new
        // count is committed only once the read succeeds, so a
        // transient read failure leaves the delta pending and the
        // next tick retries instead of dropping the change.
        let text = self
            .clipboard
            .read_text()
            .await
            .map_err(|e| DetectionError::ReadFailed(e.to_string()))?;

        self.last_count = Some(count);
        Ok(text.and_then(|t| capture(t, max_content_size)))
    }
}

pub struct HashPollingStrategy {
    clipboard: Arc<dyn SystemClipboardPort>,
    last_hash: Option<Fingerprint>,
}

impl HashPollingStrategy {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        Self {
            clipboard,
            last_hash: None,
        }
    }
}

#[async_trait]
impl DetectionStrategy for HashPollingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Polling
    }

    async fn poll(
        &mut self,
        max_content_size: usize,
    ) -> Result<Option<ClipboardSnapshot>, DetectionError> {
        let text = self
            .clipboard
            .read_text()
            .await
            .map_err(|e| DetectionError::ReadFailed(e.to_string()))?;

        let Some(text) = text else {
            // Empty clipboard is not a change event.
            return Ok(None);
        };

        let hash = Fingerprint::of_text(&text);
        if self.last_hash.as_ref() == Some(&hash) {
            return Ok(None);
        }

        let first_observation = self.last_hash.is_none();
        self.last_hash = Some(hash);

        if first_observation {
            return Ok(None);
        }

        Ok(capture(text, max_content_size))
    }
}

/// Oversize content counts as a change (the strategies above already
/// advanced their counter/hash state) but is never dispatched.
fn capture(text: String, max_content_size: usize) -> Option<ClipboardSnapshot> {
    if text.len() > max_content_size {
        debug!(
            "clipboard change skipped: {} bytes exceeds security.max_clipboard_size ({})",
            text.len(),
            max_content_size
        );
        return None;
    }
    Some(ClipboardSnapshot::text(text))
}
