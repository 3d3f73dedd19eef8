use thiserror::Error;

/// Business errors for the admin session gate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("admin login required")]
    Unauthorized,
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 1004,
            AuthError::Unauthorized => 1005,
        }
    }
}
