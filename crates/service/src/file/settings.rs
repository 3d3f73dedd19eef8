use std::sync::Arc;

use models::{Settings, SettingsPatch};
use tracing::{info, instrument};

use crate::admin::settings_store::SettingsStore;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

pub const SETTINGS_DOCUMENT: &str = "settings";

/// Settings singleton stored as one JSON object.
pub struct SettingsFile {
    docs: DocumentStore,
}

impl SettingsFile {
    pub fn new(docs: DocumentStore) -> Arc<Self> {
        Arc::new(Self { docs })
    }

    pub async fn bootstrap(&self) -> Result<bool, ServiceError> {
        let written = self.docs.bootstrap(SETTINGS_DOCUMENT, &Settings::seed()).await?;
        if written {
            info!(document = SETTINGS_DOCUMENT, "settings seeded");
        }
        Ok(written)
    }

    /// Current settings; the seed when the file is absent or unreadable,
    /// `MalformedState` when it parses but lacks a required part.
    pub async fn get(&self) -> Result<Settings, ServiceError> {
        Ok(self.docs.load_checked(SETTINGS_DOCUMENT, Settings::seed()).await?)
    }

    /// Apply `patch` to the stored document and save it whole.
    #[instrument(skip(self, patch), fields(days = patch.work_hours.len()))]
    pub async fn update(&self, patch: SettingsPatch) -> Result<Settings, ServiceError> {
        let mut settings = self.get().await?;
        settings.apply(patch)?;
        self.docs.save(SETTINGS_DOCUMENT, &settings).await?;
        info!("settings_updated");
        Ok(settings)
    }
}

#[async_trait::async_trait]
impl SettingsStore for SettingsFile {
    async fn get(&self) -> Result<Settings, ServiceError> { self.get().await }
    async fn update(&self, patch: SettingsPatch) -> Result<Settings, ServiceError> { self.update(patch).await }
}
