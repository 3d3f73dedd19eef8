use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ModelError;

/// An entity stored as one element of a JSON array collection.
///
/// Ids are positive and unique within the collection; allocation is done by
/// the repository, records only carry them.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Fields accepted on create and update.
    type Input: Send + 'static;

    /// Document name of the backing collection (`services`, `reviews`).
    const COLLECTION: &'static str;
    /// Singular label used in messages.
    const LABEL: &'static str;

    fn id(&self) -> u64;

    /// Required-field checks applied on create.
    fn validate_new(input: &Self::Input) -> Result<(), ModelError>;

    /// Checks applied on update. Blank text fields are accepted here.
    fn validate_update(_input: &Self::Input) -> Result<(), ModelError> {
        Ok(())
    }

    fn create(id: u64, input: Self::Input) -> Self;

    /// Overwrite every mutable field with the input's value.
    fn apply(&mut self, input: Self::Input);

    /// Content written when the collection file does not exist yet.
    fn seed() -> Vec<Self>;
}
