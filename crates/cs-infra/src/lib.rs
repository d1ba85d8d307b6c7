//! # cs-infra
//!
//! Filesystem-backed infrastructure for clipsentry: the TOML settings
//! repository and the pause-marker file. No OS clipboard access lives
//! here; that is cs-platform territory.

pub mod pause;
pub mod settings;

pub use pause::PauseMarker;
pub use settings::FileSettingsRepository;
