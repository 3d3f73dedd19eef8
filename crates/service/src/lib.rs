//! Service layer: document storage, typed repositories over it, the admin
//! session gate and contact-form handling.
//! - Separates business rules from the HTTP layer in `server`.
//! - Reuses validation and record definitions from the `models` crate.
//! - Exposes repositories behind traits in `admin` so handlers and tests can
//!   swap implementations.

pub mod errors;
pub mod auth;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod file;
pub mod admin;
pub mod contact;
