use crate::errors::DetectionError;

/// Monotonically increasing change counter provided by the OS
/// pasteboard, when the platform offers one.
///
/// A counter delta signals a clipboard change without reading the
/// full content first, which is what makes the native detection
/// strategy cheaper than content-hash polling.
pub trait ChangeCounterPort: Send + Sync {
    fn change_count(&self) -> Result<u64, DetectionError>;
}
