pub mod in_memory;
pub mod native;

pub use in_memory::InMemoryChangeCounter;
pub use native::NativeChangeCounter;
