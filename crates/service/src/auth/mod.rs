//! Admin session gate: domain, repository and service layers.
//!
//! Sessions are server-side records keyed by an opaque id the HTTP layer
//! carries in a cookie. Besides the login state they hold pending one-shot
//! notices shown on the next page view.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use service::SessionGate;
