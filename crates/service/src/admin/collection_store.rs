use async_trait::async_trait;
use models::Record;

use crate::errors::ServiceError;

/// Trait abstraction for an id-keyed collection (services, reviews).
/// Implementations enforce id allocation and required-field rules.
#[async_trait]
pub trait CollectionStore<R: Record>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, ServiceError>;
    async fn get(&self, id: u64) -> Result<R, ServiceError>;
    async fn add(&self, input: R::Input) -> Result<R, ServiceError>;
    async fn update(&self, id: u64, input: R::Input) -> Result<R, ServiceError>;
    async fn remove(&self, id: u64) -> Result<R, ServiceError>;
}
