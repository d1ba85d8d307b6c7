pub mod hash;
pub mod snapshot;

pub use hash::Fingerprint;
pub use snapshot::{ClipboardSnapshot, ContentType};
