pub mod descriptor;
pub mod processor;
pub mod registry;

pub use descriptor::{ModuleDescriptor, ProcessingResult};
pub use processor::{ModuleCandidate, ModuleCapability, ModuleProcessor};
pub use registry::{ActiveModule, ModuleRegistry};
