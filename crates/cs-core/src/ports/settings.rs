use async_trait::async_trait;

use crate::settings::model::Settings;

/// Read access to durable configuration.
///
/// The monitor loads a fresh snapshot at the start of every tick
/// instead of being pushed updates mid-tick; external changes become
/// visible at the next tick boundary and never tear a running
/// pipeline pass.
#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> Settings;
}
