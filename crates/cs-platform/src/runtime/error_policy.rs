//! Detector failure containment.
//!
//! Counts consecutive change-detection failures; a successful tick
//! resets the counter. Crossing the threshold on the native strategy
//! downgrades to content-hash polling and resets the counter; if the
//! fallback is still failing right after a downgrade, or itself
//! crosses the threshold, the engine ends with a diagnostic. A silent
//! infinite-retry loop is never an outcome.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    /// Keep ticking.
    Continue,
    /// Threshold crossed on the native strategy; switch to fallback.
    Downgrade,
    /// Both strategies exhausted; terminal.
    Shutdown,
}

pub struct ErrorPolicy {
    consecutive: u32,
    threshold: u32,
    /// Set by a downgrade, cleared by the first successful tick.
    /// While set, any further failure means the fallback never
    /// recovered and the engine must not retry forever.
    probation: bool,
}

impl ErrorPolicy {
    pub fn new(threshold: u32) -> Self {
        Self {
            consecutive: 0,
            threshold: threshold.max(1),
            probation: false,
        }
    }

    /// Threshold follows configuration and is refreshed per tick.
    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = threshold.max(1);
    }

    pub fn record_success(&mut self) {
        self.consecutive = 0;
        self.probation = false;
    }

    /// Record one failed tick. `on_fallback` tells the policy whether
    /// a downgrade is still available.
    pub fn record_failure(&mut self, on_fallback: bool) -> PolicyAction {
        self.consecutive += 1;

        if on_fallback && self.probation {
            return PolicyAction::Shutdown;
        }

        if self.consecutive < self.threshold {
            return PolicyAction::Continue;
        }

        if on_fallback {
            PolicyAction::Shutdown
        } else {
            // The downgrade consumes the failure streak; the fallback
            // strategy starts with a clean counter but on probation.
            self.consecutive = 0;
            self.probation = true;
            PolicyAction::Downgrade
        }
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive
    }
}
