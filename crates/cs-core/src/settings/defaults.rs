use std::collections::BTreeMap;

use super::model::*;

pub const POLLING_INTERVAL_SECS: f64 = 1.0;
pub const ENHANCED_CHECK_INTERVAL_SECS: f64 = 0.1;
pub const CACHE_COOLDOWN_SECS: f64 = 3.0;

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            polling_interval: POLLING_INTERVAL_SECS,
            enhanced_check_interval: ENHANCED_CHECK_INTERVAL_SECS,
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_items: 100 }
    }
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            max_clipboard_size: 1024 * 1024, // 1 MiB
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: 8,
            cooldown_secs: CACHE_COOLDOWN_SECS,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            module_timeout_ms: 500,
        }
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            modules: BTreeMap::new(),
            history: HistorySettings::default(),
            security: SecuritySettings::default(),
            cache: CacheSettings::default(),
            pipeline: PipelineSettings::default(),
            detector: DetectorSettings::default(),
        }
    }
}
