//! Monitor runtime.
//!
//! One background task owns the detector tick: check the pause
//! signal, re-read the settings snapshot, poll the active detection
//! strategy, and hand any snapshot to the pipeline handler. The error
//! policy observes every poll outcome and decides downgrade or
//! shutdown.
//!
//! External mutation (pause toggle, module switches, interval
//! changes) only ever reaches this loop through durable state re-read
//! at the start of a tick; nothing is pushed into a running tick.

use log::{debug, error, info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use cs_core::module::ModuleRegistry;
use cs_core::ports::{
    ChangeCounterPort, PauseSignalPort, SettingsPort, SnapshotHandlerPort, SystemClipboardPort,
};

use super::detector::{CounterStrategy, DetectionStrategy, HashPollingStrategy, StrategyKind};
use super::error_policy::{ErrorPolicy, PolicyAction};

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("change detection failed on both the native and the fallback strategy; giving up")]
    StrategiesExhausted,
}

/// Tick-local detector state, traced for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorState {
    Idle,
    Watching,
    ChangeDetected,
}

pub struct MonitorRuntime {
    clipboard: Arc<dyn SystemClipboardPort>,
    counter: Option<Arc<dyn ChangeCounterPort>>,
    pause: Arc<dyn PauseSignalPort>,
    settings: Arc<dyn SettingsPort>,
    registry: Arc<Mutex<ModuleRegistry>>,
    handler: Arc<dyn SnapshotHandlerPort>,
    running: AtomicBool,
}

impl MonitorRuntime {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        counter: Option<Arc<dyn ChangeCounterPort>>,
        pause: Arc<dyn PauseSignalPort>,
        settings: Arc<dyn SettingsPort>,
        registry: Arc<Mutex<ModuleRegistry>>,
        handler: Arc<dyn SnapshotHandlerPort>,
    ) -> Self {
        Self {
            clipboard,
            counter,
            pause,
            settings,
            registry,
            handler,
            running: AtomicBool::new(false),
        }
    }

    /// Ask the loop to end after the current tick. The in-flight
    /// pipeline run, if any, completes; nothing is interrupted.
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Run the detector loop until `request_stop` or a terminal
    /// error-policy decision. Idempotent: a second concurrent call
    /// returns immediately.
    pub async fn run(&self) -> Result<(), MonitorError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        let mut strategy = self.initial_strategy();
        let mut policy = ErrorPolicy::new(self.settings.load().await.detector.failure_threshold);

        while self.running.load(Ordering::Acquire) {
            // Immutable snapshot for this tick.
            let settings = self.settings.load().await;
            policy.set_threshold(settings.detector.failure_threshold);

            let interval = match strategy.kind() {
                StrategyKind::Native => settings.enhanced_check_interval(),
                StrategyKind::Polling => settings.polling_interval(),
            };

            if self.pause.is_paused() {
                // Skip the tick wholly: no snapshot, no cache or
                // counter state, no failure accounting.
                trace!("paused; tick skipped");
                tokio::time::sleep(interval).await;
                continue;
            }

            self.registry.lock().unwrap().apply_settings(&settings.modules);

            let mut state = DetectorState::Watching;
            trace!("detector state: {state:?}");

            match strategy.poll(settings.security.max_clipboard_size).await {
                Ok(Some(snapshot)) => {
                    policy.record_success();
                    state = DetectorState::ChangeDetected;
                    trace!("detector state: {state:?}");
                    debug!(
                        "clipboard change detected (fingerprint {})",
                        snapshot.fingerprint.short()
                    );

                    if let Err(err) = self
                        .handler
                        .on_clipboard_changed(snapshot, settings.clone())
                        .await
                    {
                        // Module failures are contained inside the
                        // pipeline; reaching here means the dispatch
                        // infrastructure itself failed.
                        error!("pipeline dispatch failed: {err:#}");
                    }
                }
                Ok(None) => {
                    policy.record_success();
                }
                Err(err) => {
                    warn!("change detection failed: {err}");
                    let on_fallback = strategy.kind() == StrategyKind::Polling;
                    match policy.record_failure(on_fallback) {
                        PolicyAction::Continue => {}
                        PolicyAction::Downgrade => {
                            warn!(
                                "{} consecutive detection failures; downgrading to content-hash polling",
                                settings.detector.failure_threshold
                            );
                            strategy = Box::new(HashPollingStrategy::new(self.clipboard.clone()));
                        }
                        PolicyAction::Shutdown => {
                            self.running.store(false, Ordering::Release);
                            let terminal = MonitorError::StrategiesExhausted;
                            error!(
                                "{terminal} ({} consecutive fallback failures)",
                                policy.consecutive_failures()
                            );
                            return Err(terminal);
                        }
                    }
                }
            }

            state = DetectorState::Idle;
            trace!("detector state: {state:?}");

            // Re-read the kind: a downgrade this tick switches to the
            // polling cadence immediately.
            let interval = match strategy.kind() {
                StrategyKind::Native => settings.enhanced_check_interval(),
                StrategyKind::Polling => settings.polling_interval(),
            };
            tokio::time::sleep(interval).await;
        }

        info!("monitor loop stopped");
        Ok(())
    }

    /// Prefer the native change counter; probe it once so a dead
    /// capability downgrades immediately, logged exactly once.
    fn initial_strategy(&self) -> Box<dyn DetectionStrategy> {
        match &self.counter {
            Some(counter) => match counter.change_count() {
                Ok(_) => {
                    info!("change detection: native change counter");
                    Box::new(CounterStrategy::new(counter.clone(), self.clipboard.clone()))
                }
                Err(err) => {
                    warn!("native change counter unavailable ({err}); using content-hash polling");
                    Box::new(HashPollingStrategy::new(self.clipboard.clone()))
                }
            },
            None => {
                warn!("no native change counter on this platform; using content-hash polling");
                Box::new(HashPollingStrategy::new(self.clipboard.clone()))
            }
        }
    }
}
