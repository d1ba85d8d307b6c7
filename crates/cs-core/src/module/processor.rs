use std::fmt;
use std::sync::Arc;

/// The plugin contract: `process(content) -> bool`.
///
/// A `true` return means "the clipboard was mutated by this call";
/// the pipeline then records the rewritten content in the fingerprint
/// cache so the resulting echo does not re-enter processing.
///
/// Implementations may block; the pipeline runs each invocation on a
/// blocking worker joined with a timeout, so a hung module cannot
/// stall the engine.
pub trait ModuleProcessor: Send + Sync {
    fn process(&self, content: &str) -> anyhow::Result<bool>;
}

/// Capability shape a discovery source found for one candidate unit.
///
/// Discovery reports what it saw rather than failing, so the registry
/// can log the precise validation reason per unit.
#[derive(Clone)]
pub enum ModuleCapability {
    /// Entry point present and callable.
    Process(Arc<dyn ModuleProcessor>),

    /// Unit loaded but exposes no process entry point.
    MissingEntryPoint,

    /// An entry point exists but has the wrong shape.
    NotCallable { reason: String },

    /// The unit could not be loaded at all.
    LoadFailed { reason: String },
}

impl fmt::Debug for ModuleCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process(_) => f.write_str("Process(..)"),
            Self::MissingEntryPoint => f.write_str("MissingEntryPoint"),
            Self::NotCallable { reason } => write!(f, "NotCallable({reason})"),
            Self::LoadFailed { reason } => write!(f, "LoadFailed({reason})"),
        }
    }
}

/// A unit reported by `ModuleDiscoveryPort`, before validation.
#[derive(Debug, Clone)]
pub struct ModuleCandidate {
    pub name: String,
    pub capability: ModuleCapability,
}

impl ModuleCandidate {
    pub fn processing(name: impl Into<String>, processor: Arc<dyn ModuleProcessor>) -> Self {
        Self {
            name: name.into(),
            capability: ModuleCapability::Process(processor),
        }
    }

    pub fn missing_entry_point(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capability: ModuleCapability::MissingEntryPoint,
        }
    }

    pub fn not_callable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capability: ModuleCapability::NotCallable {
                reason: reason.into(),
            },
        }
    }

    pub fn load_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capability: ModuleCapability::LoadFailed {
                reason: reason.into(),
            },
        }
    }
}
