//! Runtime environment helpers
//!
//! Startup wiring: directory checks via `common::env` and opening the
//! document-backed stores with their seed data.

use std::path::Path;
use std::sync::Arc;

use models::{Review, Service};
use tracing::info;

use crate::file::{collection::JsonCollection, settings::SettingsFile};
use crate::storage::DocumentStore;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(frontend_dir: &str, data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_dir).await
}

/// The three file-backed stores the site runs on.
#[derive(Clone)]
pub struct Stores {
    pub services: Arc<JsonCollection<Service>>,
    pub reviews: Arc<JsonCollection<Review>>,
    pub settings: Arc<SettingsFile>,
}

/// Open the data directory and seed every document whose file is absent.
pub async fn open_stores(data_dir: &Path) -> anyhow::Result<Stores> {
    let docs = DocumentStore::open(data_dir).await?;
    let stores = Stores {
        services: JsonCollection::new(docs.clone()),
        reviews: JsonCollection::new(docs.clone()),
        settings: SettingsFile::new(docs),
    };
    let seeded = [
        stores.settings.bootstrap().await?,
        stores.services.bootstrap().await?,
        stores.reviews.bootstrap().await?,
    ];
    info!(
        data_dir = %data_dir.display(),
        seeded = seeded.iter().filter(|s| **s).count(),
        "document stores ready"
    );
    Ok(stores)
}
