use thiserror::Error;

#[derive(Debug, Error)]
pub enum PauseSignalError {
    #[error("failed to update pause marker: {0}")]
    Io(String),
}

/// External on/off signal consulted by the detector loop.
///
/// # Behavior
/// - `is_paused()` must re-check the durable signal on every call;
///   implementations never cache the state. Toggling therefore takes
///   effect within one tick interval with no thread teardown.
/// - `toggle()` must create or remove the marker atomically.
pub trait PauseSignalPort: Send + Sync {
    fn is_paused(&self) -> bool;

    /// Flip the signal; returns the new paused state.
    fn toggle(&self) -> Result<bool, PauseSignalError>;
}
