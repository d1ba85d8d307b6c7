//! Error taxonomy for the monitoring engine.
//!
//! - `DetectionError` flows to the error policy for counting and
//!   downgrade/shutdown decisions.
//! - `ValidationError` is contained at discovery time; the offending
//!   module is excluded and startup continues.
//! - `ModuleExecutionError` is contained per module inside the
//!   pipeline; other modules still run.
//! - `ConfigError` is always recovered locally with defaults.

use std::time::Duration;
use thiserror::Error;

/// Failure of the underlying change-detection capability.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("clipboard read failed: {0}")]
    ReadFailed(String),

    #[error("change counter unavailable: {0}")]
    CounterUnavailable(String),
}

/// A discovered module failed interface validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("module '{name}' exposes no process entry point")]
    MissingEntryPoint { name: String },

    #[error("module '{name}' entry point is not callable: {reason}")]
    NotCallable { name: String, reason: String },

    #[error("module '{name}' failed to load: {reason}")]
    LoadFailed { name: String, reason: String },
}

/// Failure of a single module invocation during dispatch.
#[derive(Debug, Clone, Error)]
pub enum ModuleExecutionError {
    #[error("module returned an error: {0}")]
    Failed(String),

    #[error("module panicked")]
    Panicked,

    #[error("module exceeded its {budget:?} execution budget")]
    TimedOut { budget: Duration },
}

/// Malformed settings. Never fatal; the reader falls back to the
/// documented default and logs a warning.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file could not be read: {0}")]
    Unreadable(String),

    #[error("settings file is not valid TOML: {0}")]
    Malformed(String),
}
