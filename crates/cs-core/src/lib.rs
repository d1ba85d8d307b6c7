//! # cs-core
//!
//! Core domain models and business logic for clipsentry.
//!
//! This crate contains pure monitoring-engine logic without any
//! infrastructure dependencies: clipboard snapshots, the
//! loop-prevention fingerprint cache, the module registry, the
//! settings model, and the port interfaces implemented by the
//! infrastructure and platform layers.

// Public module exports
pub mod clipboard;
pub mod errors;
pub mod fingerprint;
pub mod module;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipboardSnapshot, ContentType, Fingerprint};
pub use errors::{ConfigError, DetectionError, ModuleExecutionError, ValidationError};
pub use fingerprint::ContentFingerprintCache;
pub use module::{
    ActiveModule, ModuleCandidate, ModuleCapability, ModuleDescriptor, ModuleProcessor,
    ModuleRegistry, ProcessingResult,
};
pub use settings::model::Settings;
