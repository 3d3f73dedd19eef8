use models::errors::ModelError;
use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("malformed stored state: {0}")]
    MalformedState(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: u64) -> Self {
        Self::NotFound(format!("{entity} #{id} not found"))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Malformed(msg) => Self::MalformedState(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Shape { .. } => Self::MalformedState(e.to_string()),
            _ => Self::Persistence(e.to_string()),
        }
    }
}
