pub mod process_change;
pub mod toggle_pause;
