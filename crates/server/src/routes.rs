use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use service::{auth::domain::Notice, errors::ServiceError};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};

use common::types::Health;

use crate::errors::AppError;
use crate::session;

pub mod admin;
pub mod auth;
pub mod public;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Page views have no safer page to fall back to: a broken document is
/// replaced by `fallback` and reported as a notice.
pub(crate) fn or_degrade<T>(res: Result<T, ServiceError>, fallback: T, notices: &mut Vec<Notice>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "page rendered with fallback data");
            let notice = AppError::from(e).notice();
            if !notices.contains(&notice) {
                notices.push(notice);
            }
            fallback
        }
    }
}

/// Build the full application router: public pages, the login flow and the
/// session-gated admin panel.
pub fn build_router(state: auth::ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/", get(public::index))
        .route("/services", get(public::services_page))
        .route("/submit_form", post(public::submit_form))
        .route("/admin/login", get(auth::login_page).post(auth::login))
        .route("/admin/logout", get(auth::logout))
        .route("/api-docs/openapi.json", get(crate::openapi::openapi_json))
        .nest_service("/static", ServeDir::new(frontend_dir));

    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/services", post(admin::add_service))
        .route(
            "/admin/services/:id",
            get(admin::get_service).put(admin::update_service).delete(admin::remove_service),
        )
        .route("/admin/reviews", post(admin::add_review))
        .route(
            "/admin/reviews/:id",
            get(admin::get_review).put(admin::update_review).delete(admin::remove_review),
        )
        .route("/admin/settings", get(admin::get_settings).put(admin::update_settings))
        .route("/admin/api/services", get(admin::export_services))
        .route("/admin/api/reviews", get(admin::export_reviews))
        .route_layer(middleware::from_fn_with_state(state.clone(), session::require_admin));

    public
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(state.clone(), session::resolve_session))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
