use serde::{Deserialize, Serialize};

use crate::errors::{require_non_blank, ModelError};

/// Contact form payload. Never persisted.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("phone", &self.phone)?;
        Ok(())
    }
}
