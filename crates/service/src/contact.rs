//! Contact form handling. Submissions are validated and acknowledged; they
//! are not stored anywhere.

use models::ContactSubmission;
use tracing::info;

use crate::auth::domain::Notice;
use crate::errors::ServiceError;

/// Validate a submission and build the confirmation notice.
pub fn submit(form: &ContactSubmission) -> Result<Notice, ServiceError> {
    form.validate()?;
    let name = form.name.trim();
    info!(name, has_message = !form.message.trim().is_empty(), "contact_request_received");
    Ok(Notice::success(format!("Спасибо, {name}! Ваша заявка принята.")))
}
