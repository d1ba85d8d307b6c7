//! File-backed settings repository.
//!
//! Settings are stored as TOML. Loading is lenient: a malformed value
//! falls back to its documented default with a warning, a malformed
//! section falls back wholesale, and an unreadable or unparseable
//! file yields the full default snapshot. The engine never crashes on
//! configuration input.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

use cs_core::errors::ConfigError;
use cs_core::settings::model::Settings;

pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create settings dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Load the current settings snapshot. Infallible by design; every
    /// failure path degrades to defaults with a logged reason.
    pub async fn load(&self) -> Settings {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("settings file absent, using defaults");
                return Settings::default();
            }
            Err(err) => {
                warn!(
                    "{}; using defaults",
                    ConfigError::Unreadable(err.to_string())
                );
                return Settings::default();
            }
        };

        match raw.parse::<toml::Value>() {
            Ok(value) => lenient_from_value(&value),
            Err(err) => {
                warn!("{}; using defaults", ConfigError::Malformed(err.to_string()));
                Settings::default()
            }
        }
    }

    /// Persist `settings` atomically: write a sibling tmp file, then
    /// rename over the target.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        self.ensure_parent_dir().await?;

        let rendered = toml::to_string_pretty(settings).context("serialize settings failed")?;

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, rendered.as_bytes())
            .await
            .with_context(|| format!("write settings tmp failed: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("rename settings file failed: {}", self.path.display()))?;

        Ok(())
    }

    /// Seed the default settings file on first run so operators have a
    /// file to edit.
    pub async fn ensure_exists(&self) -> Result<()> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }
        self.save(&Settings::default()).await
    }
}

#[async_trait::async_trait]
impl cs_core::ports::SettingsPort for FileSettingsRepository {
    async fn load(&self) -> Settings {
        FileSettingsRepository::load(self).await
    }
}

fn lenient_from_value(root: &toml::Value) -> Settings {
    let mut settings = Settings::default();

    if let Some(general) = section(root, "general") {
        read_interval_secs(
            general,
            "general",
            "polling_interval",
            &mut settings.general.polling_interval,
        );
        read_interval_secs(
            general,
            "general",
            "enhanced_check_interval",
            &mut settings.general.enhanced_check_interval,
        );
    }

    if let Some(modules) = section(root, "modules") {
        for (name, value) in modules {
            match value.as_bool() {
                Some(enabled) => {
                    settings.modules.insert(name.clone(), enabled);
                }
                None => warn!("modules.{name} is not a boolean ({value}); entry ignored"),
            }
        }
    }

    if let Some(history) = section(root, "history") {
        read_usize(
            history,
            "history",
            "max_items",
            &mut settings.history.max_items,
        );
    }

    if let Some(security) = section(root, "security") {
        read_usize(
            security,
            "security",
            "max_clipboard_size",
            &mut settings.security.max_clipboard_size,
        );
    }

    if let Some(cache) = section(root, "cache") {
        read_usize(cache, "cache", "capacity", &mut settings.cache.capacity);
        read_interval_secs(
            cache,
            "cache",
            "cooldown_secs",
            &mut settings.cache.cooldown_secs,
        );
    }

    if let Some(pipeline) = section(root, "pipeline") {
        let mut timeout = settings.pipeline.module_timeout_ms as usize;
        read_usize(pipeline, "pipeline", "module_timeout_ms", &mut timeout);
        settings.pipeline.module_timeout_ms = timeout as u64;
    }

    if let Some(detector) = section(root, "detector") {
        let mut threshold = settings.detector.failure_threshold as usize;
        read_usize(detector, "detector", "failure_threshold", &mut threshold);
        settings.detector.failure_threshold = threshold.min(u32::MAX as usize) as u32;
    }

    settings
}

fn section<'a>(root: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    match root.get(name) {
        None => None,
        Some(value) => match value.as_table() {
            Some(table) => Some(table),
            None => {
                warn!("[{name}] is not a table; using defaults for the whole section");
                None
            }
        },
    }
}

fn read_interval_secs(table: &toml::value::Table, sect: &str, key: &str, slot: &mut f64) {
    let Some(value) = table.get(key) else {
        return;
    };
    let parsed = value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64));
    match parsed {
        Some(secs) if secs.is_finite() && secs > 0.0 => *slot = secs,
        _ => warn!("{sect}.{key} is malformed ({value}); keeping default {slot}"),
    }
}

fn read_usize(table: &toml::value::Table, sect: &str, key: &str, slot: &mut usize) {
    let Some(value) = table.get(key) else {
        return;
    };
    match value.as_integer() {
        Some(n) if n >= 0 => *slot = n as usize,
        _ => warn!("{sect}.{key} is malformed ({value}); keeping default {slot}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_in(dir: &TempDir) -> FileSettingsRepository {
        FileSettingsRepository::new(dir.path().join("settings.toml"))
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = repo_in(&dir).load().await;
        assert_eq!(settings.cache.capacity, 8);
        assert_eq!(settings.detector.failure_threshold, 5);
    }

    #[tokio::test]
    async fn malformed_values_fall_back_per_key() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(
            repo.path(),
            r#"
[general]
polling_interval = "fast"
enhanced_check_interval = 0.25

[modules]
markdown = true
urls = "yes"

[cache]
capacity = -2
cooldown_secs = 5.0
"#,
        )
        .unwrap();

        let settings = repo.load().await;

        // Bad keys keep defaults, good keys in the same section stick.
        assert_eq!(settings.general.polling_interval, 1.0);
        assert_eq!(settings.general.enhanced_check_interval, 0.25);
        assert_eq!(settings.modules.get("markdown"), Some(&true));
        assert_eq!(settings.modules.get("urls"), None);
        assert_eq!(settings.cache.capacity, 8);
        assert_eq!(settings.cache.cooldown_secs, 5.0);
    }

    #[tokio::test]
    async fn unparseable_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);
        std::fs::write(repo.path(), "not [valid toml").unwrap();

        let settings = repo.load().await;
        assert_eq!(settings.history.max_items, 100);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        let mut settings = Settings::default();
        settings.general.polling_interval = 2.5;
        settings.modules.insert("markdown".to_string(), false);

        repo.save(&settings).await.unwrap();
        let loaded = repo.load().await;

        assert_eq!(loaded.general.polling_interval, 2.5);
        assert_eq!(loaded.modules.get("markdown"), Some(&false));
    }

    #[tokio::test]
    async fn ensure_exists_seeds_default_file_once() {
        let dir = TempDir::new().unwrap();
        let repo = repo_in(&dir);

        repo.ensure_exists().await.unwrap();
        assert!(repo.path().exists());

        // A later call must not clobber operator edits.
        std::fs::write(repo.path(), "[cache]\ncapacity = 5\n").unwrap();
        repo.ensure_exists().await.unwrap();
        assert_eq!(repo.load().await.cache.capacity, 5);
    }
}
