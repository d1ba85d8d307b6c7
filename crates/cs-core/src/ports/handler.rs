use async_trait::async_trait;

use crate::clipboard::ClipboardSnapshot;
use crate::settings::model::Settings;

/// Receiver of detected clipboard changes.
///
/// Implemented by the processing pipeline in the application layer;
/// the platform runtime calls it once per detected change, passing
/// the tick's immutable settings snapshot along with the content.
#[async_trait]
pub trait SnapshotHandlerPort: Send + Sync {
    async fn on_clipboard_changed(
        &self,
        snapshot: ClipboardSnapshot,
        settings: Settings,
    ) -> anyhow::Result<()>;
}
