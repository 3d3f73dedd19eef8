use std::{marker::PhantomData, sync::Arc};

use models::Record;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::admin::collection_store::CollectionStore;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

/// High-water mark of issued ids, kept next to the collection so that the id
/// of a removed record (even the largest one) is never handed out again.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Sequence {
    last_id: u64,
}

/// JSON-array collection of `R` persisted through a [`DocumentStore`].
///
/// Each operation reads the document, mutates it and writes it back whole.
pub struct JsonCollection<R> {
    docs: DocumentStore,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonCollection<R> {
    pub fn new(docs: DocumentStore) -> Arc<Self> {
        Arc::new(Self { docs, _record: PhantomData })
    }

    fn sequence_name() -> String {
        format!("{}_sequence", R::COLLECTION)
    }

    /// Write the seed records if the collection file does not exist yet.
    pub async fn bootstrap(&self) -> Result<bool, ServiceError> {
        let seed = R::seed();
        let written = self.docs.bootstrap(R::COLLECTION, &seed).await?;
        if written {
            if let Some(top) = seed.iter().map(R::id).max() {
                self.raise_sequence(top).await;
            }
            info!(collection = R::COLLECTION, "collection seeded");
        }
        Ok(written)
    }

    async fn load(&self) -> Result<Vec<R>, ServiceError> {
        Ok(self.docs.load_checked(R::COLLECTION, Vec::new()).await?)
    }

    async fn persist(&self, items: &[R]) -> Result<(), ServiceError> {
        Ok(self.docs.save(R::COLLECTION, items).await?)
    }

    async fn last_issued(&self) -> u64 {
        let issued: Sequence = self.docs.load(&Self::sequence_name(), Sequence::default()).await;
        issued.last_id
    }

    async fn next_id(&self, items: &[R]) -> u64 {
        let live_max = items.iter().map(R::id).max().unwrap_or(0);
        live_max.max(self.last_issued().await) + 1
    }

    /// Move the high-water mark up to `id`; never lowers it. Failures are
    /// logged only, the collection file stays authoritative.
    async fn raise_sequence(&self, id: u64) {
        if self.last_issued().await >= id {
            return;
        }
        if let Err(e) = self.docs.save(&Self::sequence_name(), &Sequence { last_id: id }).await {
            warn!(collection = R::COLLECTION, id, error = %e, "id sequence not persisted");
        }
    }

    /// All records in file order.
    pub async fn list(&self) -> Result<Vec<R>, ServiceError> {
        self.load().await
    }

    pub async fn get(&self, id: u64) -> Result<R, ServiceError> {
        self.load()
            .await?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(R::LABEL, id))
    }

    /// Validate, allocate the next id, append and persist.
    pub async fn add(&self, input: R::Input) -> Result<R, ServiceError> {
        R::validate_new(&input)?;
        let mut items = self.load().await?;
        let id = self.next_id(&items).await;
        let record = R::create(id, input);
        items.push(record.clone());

        if let Err(e) = self.persist(&items).await {
            warn!(collection = R::COLLECTION, id, error = %e, "record not persisted");
            return Err(e);
        }
        self.raise_sequence(id).await;
        info!(collection = R::COLLECTION, id, "record_added");
        Ok(record)
    }

    /// Overwrite every mutable field of record `id`. A missing id leaves the
    /// file untouched.
    pub async fn update(&self, id: u64, input: R::Input) -> Result<R, ServiceError> {
        R::validate_update(&input)?;
        let mut items = self.load().await?;
        let existing = items
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(R::LABEL, id))?;
        existing.apply(input);
        let updated = existing.clone();
        self.persist(&items).await?;
        info!(collection = R::COLLECTION, id, "record_updated");
        Ok(updated)
    }

    /// Remove record `id` and return it.
    pub async fn remove(&self, id: u64) -> Result<R, ServiceError> {
        let mut items = self.load().await?;
        let pos = items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(R::LABEL, id))?;
        let removed = items.remove(pos);
        self.persist(&items).await?;
        // hand-edited or pre-sidecar data: the removed id may sit above the mark
        self.raise_sequence(id).await;
        info!(collection = R::COLLECTION, id, "record_removed");
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl<R: Record> CollectionStore<R> for JsonCollection<R> {
    async fn list(&self) -> Result<Vec<R>, ServiceError> { self.list().await }
    async fn get(&self, id: u64) -> Result<R, ServiceError> { self.get(id).await }
    async fn add(&self, input: R::Input) -> Result<R, ServiceError> { self.add(input).await }
    async fn update(&self, id: u64, input: R::Input) -> Result<R, ServiceError> { self.update(id, input).await }
    async fn remove(&self, id: u64) -> Result<R, ServiceError> { self.remove(id).await }
}
