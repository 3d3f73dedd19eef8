//! Typed records persisted by the site: the settings singleton and the
//! `services` / `reviews` collections, plus the inputs used to create and
//! edit them.

pub mod catalog;
pub mod contact;
pub mod de;
pub mod errors;
pub mod record;
pub mod review;
pub mod settings;

pub use catalog::{Service, ServiceInput};
pub use contact::ContactSubmission;
pub use record::Record;
pub use review::{Review, ReviewInput};
pub use settings::{Settings, SettingsPatch, Weekday};
