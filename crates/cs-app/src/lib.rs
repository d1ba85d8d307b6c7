//! # cs-app
//!
//! Application use cases for clipsentry: the processing pipeline that
//! dispatches detected clipboard changes through the module registry,
//! and the pause-toggle command.

pub mod report;
pub mod usecases;

pub use report::ProcessingReportLog;
pub use usecases::process_change::{DispatchOutcome, ProcessingPipeline};
pub use usecases::toggle_pause::TogglePause;
