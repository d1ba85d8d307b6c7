//! Processing-result report ring.
//!
//! The pipeline pushes every `ProcessingResult` here; reporting
//! collaborators (status commands, notification shells) drain it.
//! Bounded by `history.max_items` - the oldest result is dropped
//! first when full.

use std::collections::VecDeque;
use std::sync::Mutex;

use cs_core::module::ProcessingResult;

pub struct ProcessingReportLog {
    entries: Mutex<VecDeque<ProcessingResult>>,
    capacity: usize,
}

impl ProcessingReportLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, result: ProcessingResult) {
        let mut entries = self.entries.lock().unwrap();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(result);
    }

    /// Take all accumulated results, oldest first.
    pub fn drain(&self) -> Vec<ProcessingResult> {
        self.entries.lock().unwrap().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
