//! Pause marker file.
//!
//! The pause signal is the presence or absence of a marker file at a
//! well-known path. An external controller (companion UI, `clipsentry
//! pause`) creates and removes it; the detector consults it read-only
//! on every tick. Single writer, atomic create/delete, cheap to poll.

use log::info;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cs_core::ports::{PauseSignalError, PauseSignalPort};

pub struct PauseMarker {
    path: PathBuf,
}

impl PauseMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PauseSignalPort for PauseMarker {
    /// Re-checks the filesystem every call. Never cached, so an
    /// external toggle takes effect within one detector tick.
    fn is_paused(&self) -> bool {
        self.path.exists()
    }

    fn toggle(&self) -> Result<bool, PauseSignalError> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                info!("pause marker created: {}", self.path.display());
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                match fs::remove_file(&self.path) {
                    Ok(()) => {
                        info!("pause marker removed: {}", self.path.display());
                        Ok(false)
                    }
                    // Lost a race with the external controller; the
                    // marker is gone either way.
                    Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
                    Err(err) => Err(PauseSignalError::Io(err.to_string())),
                }
            }
            Err(err) => Err(PauseSignalError::Io(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn toggle_flips_marker_presence() {
        let dir = TempDir::new().unwrap();
        let marker = PauseMarker::new(dir.path().join("pause.marker"));

        assert!(!marker.is_paused());
        assert!(marker.toggle().unwrap());
        assert!(marker.is_paused());
        assert!(!marker.toggle().unwrap());
        assert!(!marker.is_paused());
    }

    #[test]
    fn externally_created_marker_is_observed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pause.marker");
        let marker = PauseMarker::new(&path);

        std::fs::write(&path, b"").unwrap();
        assert!(marker.is_paused());

        std::fs::remove_file(&path).unwrap();
        assert!(!marker.is_paused());
    }
}
