use async_trait::async_trait;
use models::{Settings, SettingsPatch};

use crate::errors::ServiceError;

/// Trait abstraction for the site settings singleton.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> Result<Settings, ServiceError>;
    async fn update(&self, patch: SettingsPatch) -> Result<Settings, ServiceError>;
}
