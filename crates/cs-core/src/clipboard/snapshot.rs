use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Fingerprint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    /// Observed but never dispatched; modules only receive text.
    Binary,
}

/// One observed clipboard state.
///
/// Created by the change detector on each observed change, handed to
/// the processing pipeline for exactly one pass, then dropped.
#[derive(Debug, Clone)]
pub struct ClipboardSnapshot {
    pub content: String,
    pub content_type: ContentType,
    pub captured_at: DateTime<Utc>,

    /// Content hash derived at capture time, so the pipeline and the
    /// fingerprint cache agree on identity without re-hashing.
    pub fingerprint: Fingerprint,
}

impl ClipboardSnapshot {
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        let fingerprint = Fingerprint::of_text(&content);

        Self {
            content,
            content_type: ContentType::Text,
            captured_at: Utc::now(),
            fingerprint,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_snapshot_carries_fingerprint_of_content() {
        let snapshot = ClipboardSnapshot::text("# Title");
        assert_eq!(snapshot.fingerprint, Fingerprint::of_text("# Title"));
        assert_eq!(snapshot.content_type, ContentType::Text);
    }

    #[test]
    fn size_is_byte_length() {
        let snapshot = ClipboardSnapshot::text("héllo");
        assert_eq!(snapshot.size_bytes(), "héllo".len());
    }
}
