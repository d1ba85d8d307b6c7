//! Pause toggle use case.
//!
//! Flips the durable pause marker through the `PauseSignalPort`. The
//! monitor observes the marker independently on every tick, so this
//! use case never talks to the runtime; it only reports the new state
//! for the caller to surface.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, info_span};

use cs_core::ports::{PauseSignalError, PauseSignalPort};

#[derive(Debug, Error)]
pub enum TogglePauseError {
    #[error("failed to toggle the pause marker: {0}")]
    Signal(#[from] PauseSignalError),
}

pub struct TogglePause {
    pause: Arc<dyn PauseSignalPort>,
}

impl TogglePause {
    pub fn new(pause: Arc<dyn PauseSignalPort>) -> Self {
        Self { pause }
    }

    /// Flip the marker. Returns the new state: `true` means
    /// processing is now paused.
    pub fn execute(&self) -> Result<bool, TogglePauseError> {
        let span = info_span!("pause.toggle");
        let _guard = span.enter();

        let paused = self.pause.toggle()?;
        info!(
            "processing {}",
            if paused { "paused" } else { "resumed" }
        );
        Ok(paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlagSignal {
        paused: AtomicBool,
        fail: bool,
    }

    impl PauseSignalPort for FlagSignal {
        fn is_paused(&self) -> bool {
            self.paused.load(Ordering::SeqCst)
        }

        fn toggle(&self) -> Result<bool, PauseSignalError> {
            if self.fail {
                return Err(PauseSignalError::Io("marker directory vanished".into()));
            }
            Ok(!self.paused.fetch_xor(true, Ordering::SeqCst))
        }
    }

    #[test]
    fn toggling_twice_round_trips_the_state() {
        let toggle = TogglePause::new(Arc::new(FlagSignal {
            paused: AtomicBool::new(false),
            fail: false,
        }));

        assert!(toggle.execute().unwrap());
        assert!(!toggle.execute().unwrap());
    }

    #[test]
    fn signal_errors_surface_to_the_caller() {
        let toggle = TogglePause::new(Arc::new(FlagSignal {
            paused: AtomicBool::new(false),
            fail: true,
        }));

        let err = toggle.execute().unwrap_err();
        assert!(err.to_string().contains("marker directory vanished"));
    }
}
