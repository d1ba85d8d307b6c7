//! # cs-platform
//!
//! Platform-specific implementations for clipsentry: the system
//! clipboard adapter, the native change counter, and the monitor
//! runtime that drives change detection.

pub mod clipboard;
pub mod counter;
pub mod runtime;

pub use clipboard::{InMemoryClipboard, SystemClipboard};
pub use counter::{InMemoryChangeCounter, NativeChangeCounter};
pub use runtime::{MonitorError, MonitorRuntime};
