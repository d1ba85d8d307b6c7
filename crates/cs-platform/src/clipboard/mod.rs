pub mod in_memory;
pub mod system;

pub use in_memory::InMemoryClipboard;
pub use system::SystemClipboard;
