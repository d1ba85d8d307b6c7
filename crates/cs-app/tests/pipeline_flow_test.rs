//! End-to-end pipeline flow over the in-memory adapters: a module
//! rewrites the clipboard, the echo is suppressed, pause toggling
//! leaves the engine state untouched, and configuration switches
//! modules without a restart.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;

use cs_app::{DispatchOutcome, ProcessingPipeline, ProcessingReportLog, TogglePause};
use cs_core::clipboard::ClipboardSnapshot;
use cs_core::module::{ModuleCandidate, ModuleProcessor, ModuleRegistry};
use cs_core::ports::{ModuleDiscoveryPort, PauseSignalPort};
use cs_core::settings::model::Settings;
use cs_infra::pause::PauseMarker;
use cs_infra::settings::FileSettingsRepository;
use cs_platform::clipboard::InMemoryClipboard;

struct StaticSource(Vec<ModuleCandidate>);

impl ModuleDiscoveryPort for StaticSource {
    fn discover(&self) -> Vec<ModuleCandidate> {
        self.0.clone()
    }
}

/// Turns a markdown heading into an HTML one and writes it back,
/// standing in for a real enrichment plugin.
struct MarkdownHeading {
    clipboard: Arc<InMemoryClipboard>,
    invocations: AtomicU32,
}

impl ModuleProcessor for MarkdownHeading {
    fn process(&self, content: &str) -> Result<bool> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        match content.strip_prefix("# ") {
            Some(title) => {
                self.clipboard.set_text(format!("<h1>{title}</h1>"));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn pipeline_with(
    clipboard: Arc<InMemoryClipboard>,
    candidates: Vec<ModuleCandidate>,
) -> (Arc<ProcessingPipeline>, Arc<Mutex<ModuleRegistry>>, Arc<ProcessingReportLog>) {
    let registry = Arc::new(Mutex::new(ModuleRegistry::discover(&StaticSource(
        candidates,
    ))));
    let reports = Arc::new(ProcessingReportLog::new(100));
    let pipeline = Arc::new(ProcessingPipeline::new(
        clipboard,
        registry.clone(),
        reports.clone(),
        8,
        Duration::from_secs(3),
    ));
    (pipeline, registry, reports)
}

#[tokio::test]
async fn markdown_rewrite_suppresses_its_own_echo() {
    let clipboard = Arc::new(InMemoryClipboard::with_text("# Title"));
    let module = Arc::new(MarkdownHeading {
        clipboard: clipboard.clone(),
        invocations: AtomicU32::new(0),
    });
    let (pipeline, _, reports) = pipeline_with(
        clipboard.clone(),
        vec![ModuleCandidate::processing("markdown", module.clone())],
    );
    let settings = Settings::default();

    let outcome = pipeline
        .dispatch(ClipboardSnapshot::text("# Title"), &settings)
        .await;
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(clipboard.current().as_deref(), Some("<h1>Title</h1>"));
    assert!(reports.drain()[0].modified);

    // The detector's next tick observes the rewritten content; the
    // fingerprint cache stops the loop before the module runs again.
    let echo = clipboard.current().unwrap();
    let outcome = pipeline
        .dispatch(ClipboardSnapshot::text(echo), &settings)
        .await;
    assert_eq!(outcome, DispatchOutcome::SuppressedEcho);
    assert_eq!(module.invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn pause_toggle_leaves_engine_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let marker = Arc::new(PauseMarker::new(dir.path().join("pause.marker")));

    let clipboard = Arc::new(InMemoryClipboard::with_text("before pause"));
    let module = Arc::new(MarkdownHeading {
        clipboard: clipboard.clone(),
        invocations: AtomicU32::new(0),
    });
    let (pipeline, registry, _) = pipeline_with(
        clipboard,
        vec![ModuleCandidate::processing("markdown", module)],
    );
    let settings = Settings::default();

    pipeline
        .dispatch(ClipboardSnapshot::text("before pause"), &settings)
        .await;
    let fingerprints_before = pipeline.cache_fingerprints().await;
    let active_before: Vec<_> = registry
        .lock()
        .unwrap()
        .active_modules()
        .iter()
        .map(|m| m.name.clone())
        .collect();

    let toggle = TogglePause::new(marker.clone());
    assert!(toggle.execute().unwrap());
    assert!(marker.is_paused());
    assert!(!toggle.execute().unwrap());
    assert!(!marker.is_paused());

    // Pausing is purely a signal; nothing in the engine was rebuilt.
    assert_eq!(pipeline.cache_fingerprints().await, fingerprints_before);
    let active_after: Vec<_> = registry
        .lock()
        .unwrap()
        .active_modules()
        .iter()
        .map(|m| m.name.clone())
        .collect();
    assert_eq!(active_after, active_before);
}

#[tokio::test]
async fn configuration_switches_modules_without_restart() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.toml");
    tokio::fs::write(
        &settings_path,
        "[modules]\nmarkdown = false\n",
    )
    .await
    .unwrap();

    let clipboard = Arc::new(InMemoryClipboard::with_text("# Title"));
    let module = Arc::new(MarkdownHeading {
        clipboard: clipboard.clone(),
        invocations: AtomicU32::new(0),
    });
    let (pipeline, registry, reports) = pipeline_with(
        clipboard.clone(),
        vec![ModuleCandidate::processing("markdown", module.clone())],
    );

    let repo = FileSettingsRepository::new(settings_path);
    let settings = repo.load().await;
    registry.lock().unwrap().apply_settings(&settings.modules);

    let outcome = pipeline
        .dispatch(ClipboardSnapshot::text("# Title"), &settings)
        .await;

    // The change was observed and recorded but no module ran.
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(module.invocations.load(Ordering::SeqCst), 0);
    assert!(reports.drain().is_empty());
    assert_eq!(clipboard.current().as_deref(), Some("# Title"));
}
