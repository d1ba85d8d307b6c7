//! Port interfaces for the monitoring engine
//!
//! Ports define the contract between the engine logic and the
//! infrastructure/platform implementations, keeping the core free of
//! OS and filesystem dependencies.

pub mod change_counter;
pub mod clipboard;
pub mod discovery;
pub mod handler;
pub mod pause;
pub mod settings;

pub use change_counter::ChangeCounterPort;
pub use clipboard::SystemClipboardPort;
pub use discovery::ModuleDiscoveryPort;
pub use handler::SnapshotHandlerPort;
pub use pause::{PauseSignalError, PauseSignalPort};
pub use settings::SettingsPort;
