//! In-memory change counter for tests and the probe path.

use std::sync::atomic::{AtomicU64, Ordering};

use cs_core::errors::DetectionError;
use cs_core::ports::ChangeCounterPort;

#[derive(Default)]
pub struct InMemoryChangeCounter {
    count: AtomicU64,
}

impl InMemoryChangeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate one clipboard write.
    pub fn bump(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

impl ChangeCounterPort for InMemoryChangeCounter {
    fn change_count(&self) -> Result<u64, DetectionError> {
        Ok(self.count.load(Ordering::SeqCst))
    }
}
