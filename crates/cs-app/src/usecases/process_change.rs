//! Processing pipeline use case.
//!
//! Reacts to one detected clipboard change: consults the
//! loop-prevention cache, dispatches the content through every active
//! module under an execution-time budget, and records whatever a
//! module wrote back so the echo never re-enters the pipeline.
//!
//! Exactly one run is active at any instant. The run lock is the
//! mutex guarding the fingerprint cache; a snapshot arriving while a
//! run is active replaces any parked one ("latest wins") and is
//! drained by the lock holder before the lock is released.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info_span, warn, Instrument};

use cs_core::clipboard::ClipboardSnapshot;
use cs_core::errors::ModuleExecutionError;
use cs_core::fingerprint::ContentFingerprintCache;
use cs_core::module::{ActiveModule, ModuleRegistry, ProcessingResult};
use cs_core::ports::{SnapshotHandlerPort, SystemClipboardPort};
use cs_core::settings::model::Settings;

use crate::report::ProcessingReportLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The cache recognized the content; the loop ends here.
    SuppressedEcho,
    /// All active modules ran; results were reported.
    Completed,
    /// Another run holds the lock; the snapshot was parked as the
    /// latest pending one.
    Deferred,
}

pub struct ProcessingPipeline {
    clipboard: Arc<dyn SystemClipboardPort>,
    registry: Arc<StdMutex<ModuleRegistry>>,
    reports: Arc<ProcessingReportLog>,

    /// The single global processing lock; the cache lives inside it
    /// because only the lock holder may consult or update it.
    cache: Mutex<ContentFingerprintCache>,

    /// Latest-wins slot for snapshots arriving mid-run. Each parked
    /// snapshot keeps the settings of its own tick.
    pending: StdMutex<Option<(ClipboardSnapshot, Settings)>>,
}

impl ProcessingPipeline {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        registry: Arc<StdMutex<ModuleRegistry>>,
        reports: Arc<ProcessingReportLog>,
        cache_capacity: usize,
        cooldown_window: Duration,
    ) -> Self {
        Self {
            clipboard,
            registry,
            reports,
            cache: Mutex::new(ContentFingerprintCache::new(cache_capacity, cooldown_window)),
            pending: StdMutex::new(None),
        }
    }

    /// Dispatch one snapshot. Non-reentrant: if a run is already
    /// active the snapshot is parked (replacing any previously parked
    /// one) and processed by the active run before it releases the
    /// lock. A snapshot that lands in the narrow window between the
    /// final drain check and the lock release waits for the next
    /// dispatch, which in steady detector operation is the next tick.
    pub async fn dispatch(
        &self,
        snapshot: ClipboardSnapshot,
        settings: &Settings,
    ) -> DispatchOutcome {
        let mut cache = match self.cache.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("pipeline busy; snapshot parked (latest wins)");
                *self.pending.lock().unwrap() = Some((snapshot, settings.clone()));
                return DispatchOutcome::Deferred;
            }
        };

        let outcome = self.run_one(&mut cache, snapshot, settings).await;

        // Drain whatever arrived while this run held the lock, each
        // under the settings snapshot of its own dispatch.
        loop {
            let parked = self.pending.lock().unwrap().take();
            match parked {
                Some((next, next_settings)) => {
                    self.run_one(&mut cache, next, &next_settings).await;
                }
                None => break,
            }
        }

        outcome
    }

    /// Cache fingerprints, exposed so callers can assert the cache
    /// survives pause/resume cycles untouched.
    pub async fn cache_fingerprints(&self) -> Vec<cs_core::clipboard::Fingerprint> {
        self.cache.lock().await.fingerprints()
    }

    async fn run_one(
        &self,
        cache: &mut ContentFingerprintCache,
        snapshot: ClipboardSnapshot,
        settings: &Settings,
    ) -> DispatchOutcome {
        let span = info_span!("pipeline.run", fingerprint = %snapshot.fingerprint.short());

        async {
            if cache.has_processed(&snapshot.content) {
                debug!("fingerprint cache hit; dispatch suppressed");
                return DispatchOutcome::SuppressedEcho;
            }

            // Record the incoming content first: dispatching the same
            // content again within the cooldown window must not run
            // the modules a second time.
            cache.record(&snapshot.content);

            let modules = self.registry.lock().unwrap().active_modules();
            let budget = settings.module_timeout();
            let mut any_modified = false;

            for module in modules {
                let result = run_module(&module, &snapshot.content, budget).await;

                if let Some(error) = &result.error {
                    warn!(module = %result.module_name, %error, "module failed; continuing");
                    self.registry
                        .lock()
                        .unwrap()
                        .record_error(&result.module_name, error);
                } else {
                    debug!(
                        module = %result.module_name,
                        modified = result.modified,
                        duration_ms = result.duration.as_millis() as u64,
                        "module finished"
                    );
                }

                any_modified |= result.modified;
                self.reports.push(result);
            }

            // A module rewrote the clipboard: record the new content
            // before releasing the lock so the echo is suppressed on
            // the very next tick.
            if any_modified {
                match self.clipboard.read_text().await {
                    Ok(Some(new_content)) => cache.record(&new_content),
                    Ok(None) => {}
                    Err(err) => {
                        warn!("clipboard re-read after module rewrite failed: {err:#}")
                    }
                }
            }

            DispatchOutcome::Completed
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl SnapshotHandlerPort for ProcessingPipeline {
    async fn on_clipboard_changed(
        &self,
        snapshot: ClipboardSnapshot,
        settings: Settings,
    ) -> Result<()> {
        self.dispatch(snapshot, &settings).await;
        Ok(())
    }
}

/// Run one module on a blocking worker joined with the execution
/// budget. A panic or timeout becomes the module's error; the worker
/// of a timed-out module is left to finish detached (cooperative
/// cancellation only).
async fn run_module(module: &ActiveModule, content: &str, budget: Duration) -> ProcessingResult {
    let processor = Arc::clone(&module.processor);
    let content = content.to_string();
    let started = Instant::now();

    let worker = tokio::task::spawn_blocking(move || processor.process(&content));

    let error = match tokio::time::timeout(budget, worker).await {
        Err(_) => Some(ModuleExecutionError::TimedOut { budget }),
        Ok(Err(join_err)) if join_err.is_panic() => Some(ModuleExecutionError::Panicked),
        Ok(Err(join_err)) => Some(ModuleExecutionError::Failed(join_err.to_string())),
        Ok(Ok(Err(err))) => Some(ModuleExecutionError::Failed(format!("{err:#}"))),
        Ok(Ok(Ok(modified))) => {
            return ProcessingResult {
                module_name: module.name.clone(),
                modified,
                duration: started.elapsed(),
                error: None,
            }
        }
    };

    ProcessingResult {
        module_name: module.name.clone(),
        modified: false,
        duration: started.elapsed(),
        error,
    }
}
