use std::collections::BTreeMap;

use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceInputDoc {
    pub title: String,
    pub description: String,
    pub price: String,
    /// Blank falls back to the default picture.
    pub image: String,
}

#[derive(ToSchema)]
pub struct ReviewInputDoc {
    pub name: String,
    /// Integer 1..=5; numeric strings are accepted.
    pub rating: i64,
    pub text: String,
    pub date: String,
}

#[derive(ToSchema)]
pub struct WorkDayPatchDoc {
    pub open: Option<String>,
    pub close: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(ToSchema)]
pub struct ContactInfoPatchDoc {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema)]
pub struct SocialLinksPatchDoc {
    pub vk: Option<String>,
    pub instagram: Option<String>,
    pub telegram: Option<String>,
}

#[derive(ToSchema)]
pub struct SettingsPatchDoc {
    pub contact_info: Option<ContactInfoPatchDoc>,
    /// Keyed by `monday` .. `sunday`.
    pub work_hours: BTreeMap<String, WorkDayPatchDoc>,
    pub social_links: Option<SocialLinksPatchDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::public::index,
        crate::routes::public::services_page,
        crate::routes::public::submit_form,
        crate::routes::auth::login,
        crate::routes::admin::dashboard,
        crate::routes::admin::add_service,
        crate::routes::admin::get_service,
        crate::routes::admin::update_service,
        crate::routes::admin::remove_service,
        crate::routes::admin::add_review,
        crate::routes::admin::get_review,
        crate::routes::admin::update_review,
        crate::routes::admin::remove_review,
        crate::routes::admin::get_settings,
        crate::routes::admin::update_settings,
        crate::routes::admin::export_services,
        crate::routes::admin::export_reviews,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceInputDoc,
            ReviewInputDoc,
            WorkDayPatchDoc,
            ContactInfoPatchDoc,
            SocialLinksPatchDoc,
            SettingsPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "public"),
        (name = "auth"),
        (name = "admin"),
        (name = "export")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
