pub mod detector;
pub mod error_policy;
pub mod monitor;

pub use detector::{CounterStrategy, DetectionStrategy, HashPollingStrategy, StrategyKind};
pub use error_policy::{ErrorPolicy, PolicyAction};
pub use monitor::{MonitorError, MonitorRuntime};
