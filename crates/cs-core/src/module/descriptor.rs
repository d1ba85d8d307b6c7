use std::sync::Arc;
use std::time::Duration;

use crate::errors::ModuleExecutionError;

use super::ModuleProcessor;

/// Registry view of one discovered module.
///
/// Created at discovery time. `enabled` is mutated only through the
/// registry (configuration changes); `last_error` records the most
/// recent dispatch failure reported by the pipeline.
pub struct ModuleDescriptor {
    pub name: String,
    pub(crate) processor: Option<Arc<dyn ModuleProcessor>>,
    pub enabled: bool,
    pub validated: bool,
    pub last_error: Option<String>,
}

impl ModuleDescriptor {
    /// Dispatchable iff validation passed and configuration has not
    /// switched the module off.
    pub fn is_active(&self) -> bool {
        self.validated && self.enabled
    }
}

/// Outcome of one module invocation within a pipeline run.
///
/// Transient: produced per dispatch and handed to the reporting
/// collaborators, never stored by the engine itself.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub module_name: String,
    pub modified: bool,
    pub duration: Duration,
    pub error: Option<ModuleExecutionError>,
}

impl ProcessingResult {
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}
