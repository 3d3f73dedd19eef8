use std::convert::Infallible;

use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::response::{IntoResponse, IntoResponseParts, Redirect, Response, ResponseParts};
use service::auth::domain::Notice;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const LOGIN_PATH: &str = "/admin/login";

/// Response part carrying a notice for the session middleware to queue.
#[derive(Debug, Clone)]
pub struct Flash(pub Notice);

impl IntoResponseParts for Flash {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.extensions_mut().insert(self.0);
        Ok(res)
    }
}

/// Every failure a handler can hit.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Body, form or path that could not be decoded.
    #[error("malformed request: {0}")]
    Input(String),
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Input(e.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(e: FormRejection) -> Self {
        AppError::Input(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::Input(e.body_text())
    }
}

impl AppError {
    /// Message shown to the visitor; internal details stay in the log.
    pub fn notice(&self) -> Notice {
        let message = match self {
            AppError::Service(ServiceError::Validation(msg)) => format!("Please check the form: {msg}"),
            AppError::Service(ServiceError::NotFound(msg)) => capitalize(msg),
            AppError::Service(ServiceError::Persistence(_)) => {
                "Changes could not be saved, please try again".to_string()
            }
            AppError::Service(ServiceError::MalformedState(_)) => {
                "Stored data is damaged; nothing was changed".to_string()
            }
            AppError::Auth(AuthError::Unauthorized) => "Please log in to continue".to_string(),
            AppError::Auth(AuthError::InvalidCredentials) => "Invalid username or password".to_string(),
            AppError::Input(msg) => format!("Please check the form: {msg}"),
        };
        Notice::error(message)
    }

    /// Attach the page the visitor is sent back to.
    pub fn back_to(self, path: impl Into<String>) -> Rejection {
        Rejection { error: self, back: path.into() }
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A failed request: notice plus redirect to a safe page. `Unauthorized`
/// always goes to the login page.
#[derive(Debug)]
pub struct Rejection {
    pub error: AppError,
    pub back: String,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let target = match &self.error {
            AppError::Auth(AuthError::Unauthorized) => LOGIN_PATH.to_string(),
            _ => self.back,
        };
        match &self.error {
            AppError::Service(ServiceError::Persistence(e) | ServiceError::MalformedState(e)) => {
                error!(error = %e, redirect = %target, "request failed")
            }
            AppError::Auth(e) => warn!(error = %e, code = e.code(), redirect = %target, "request rejected"),
            other => warn!(error = %other, redirect = %target, "request rejected"),
        }
        (Flash(self.error.notice()), Redirect::to(&target)).into_response()
    }
}
