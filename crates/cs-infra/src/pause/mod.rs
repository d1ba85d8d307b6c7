pub mod marker;

pub use marker::PauseMarker;
