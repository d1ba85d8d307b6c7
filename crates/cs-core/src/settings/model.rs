use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Fallback content-hash polling interval, in seconds.
    pub polling_interval: f64,

    /// Native change-counter tick interval, in seconds.
    pub enhanced_check_interval: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Capacity of the in-memory processing-result report ring.
    pub max_items: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecuritySettings {
    /// Content larger than this (bytes) is observed as a change but
    /// never dispatched to modules.
    pub max_clipboard_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub capacity: usize,
    pub cooldown_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Per-module execution budget, in milliseconds.
    pub module_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Consecutive failures before the error policy downgrades the
    /// strategy (or, on fallback, shuts the engine down).
    pub failure_threshold: u32,
}

/// Immutable settings snapshot.
///
/// The monitor re-reads this at the start of each tick from durable
/// configuration; nothing mutates a snapshot in place, which is what
/// rules out torn reads during a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub general: GeneralSettings,

    /// `modules.<name>` enable/disable switches.
    #[serde(default)]
    pub modules: BTreeMap<String, bool>,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub security: SecuritySettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub pipeline: PipelineSettings,

    #[serde(default)]
    pub detector: DetectorSettings,
}

/// Interval fields ride through TOML as plain numbers; these
/// accessors turn them into guarded `Duration`s. Non-finite or
/// non-positive values (already warned about at load) resolve to the
/// documented default.
impl Settings {
    pub fn polling_interval(&self) -> Duration {
        secs_or(self.general.polling_interval, defaults::POLLING_INTERVAL_SECS)
    }

    pub fn enhanced_check_interval(&self) -> Duration {
        secs_or(
            self.general.enhanced_check_interval,
            defaults::ENHANCED_CHECK_INTERVAL_SECS,
        )
    }

    pub fn cooldown_window(&self) -> Duration {
        secs_or(self.cache.cooldown_secs, defaults::CACHE_COOLDOWN_SECS)
    }

    pub fn module_timeout(&self) -> Duration {
        Duration::from_millis(self.pipeline.module_timeout_ms.max(1))
    }
}

fn secs_or(value: f64, default: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::from_secs_f64(default)
    }
}

use super::defaults;
