//! File-backed implementations of the `admin` store traits.

pub mod collection;
pub mod settings;
