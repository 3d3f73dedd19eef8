use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    response::Redirect,
    Json,
};
use models::{Record, Review, ReviewInput, Service, ServiceInput, Settings, SettingsPatch};
use serde::Serialize;
use service::{
    admin::collection_store::CollectionStore,
    auth::domain::{Notice, SessionId},
};

use crate::errors::{capitalize, AppError, Flash, Rejection};
use crate::routes::{auth::ServerState, or_degrade};

/// Every admin mutation lands back on the dashboard.
const DASHBOARD: &str = "/admin";

type Mutation = Result<(Flash, Redirect), Rejection>;
type Payload<T> = Result<Json<T>, JsonRejection>;
type Id = Result<Path<u64>, PathRejection>;

fn done(message: String) -> (Flash, Redirect) {
    (Flash(Notice::success(message)), Redirect::to(DASHBOARD))
}

fn rejected(e: impl Into<AppError>) -> Rejection {
    e.into().back_to(DASHBOARD)
}

#[derive(Serialize)]
pub struct DashboardView {
    pub username: String,
    pub settings: Settings,
    pub services: Vec<Service>,
    pub reviews: Vec<Review>,
    pub notices: Vec<Notice>,
}

#[utoipa::path(get, path = "/admin", tag = "admin", responses((status = 200, description = "Dashboard view"), (status = 303, description = "Not logged in")))]
pub async fn dashboard(
    State(state): State<ServerState>,
    Extension(sid): Extension<SessionId>,
) -> Result<Json<DashboardView>, Rejection> {
    let username = state.gate.require_admin(sid).await.map_err(rejected)?;
    let mut notices = state.gate.take_notices(sid).await;
    let settings = or_degrade(state.settings.get().await, Settings::seed(), &mut notices);
    let services = or_degrade(state.services.list().await, Vec::new(), &mut notices);
    let reviews = or_degrade(state.reviews.list().await, Vec::new(), &mut notices);
    Ok(Json(DashboardView { username, settings, services, reviews, notices }))
}

// Shared bodies for both collections.

async fn show<R: Record>(store: &dyn CollectionStore<R>, id: u64) -> Result<Json<R>, Rejection> {
    store.get(id).await.map(Json).map_err(rejected)
}

async fn create<R: Record>(store: &dyn CollectionStore<R>, input: R::Input) -> Mutation {
    let record = store.add(input).await.map_err(rejected)?;
    Ok(done(format!("{} #{} added", capitalize(R::LABEL), record.id())))
}

async fn replace<R: Record>(store: &dyn CollectionStore<R>, id: u64, input: R::Input) -> Mutation {
    store.update(id, input).await.map_err(rejected)?;
    Ok(done(format!("{} #{id} updated", capitalize(R::LABEL))))
}

async fn discard<R: Record>(store: &dyn CollectionStore<R>, id: u64) -> Mutation {
    store.remove(id).await.map_err(rejected)?;
    Ok(done(format!("{} #{id} deleted", capitalize(R::LABEL))))
}

#[utoipa::path(post, path = "/admin/services", tag = "admin", request_body = crate::openapi::ServiceInputDoc, responses((status = 303, description = "Redirect to /admin with a notice")))]
pub async fn add_service(State(state): State<ServerState>, input: Payload<ServiceInput>) -> Mutation {
    let Json(input) = input.map_err(rejected)?;
    create(state.services.as_ref(), input).await
}

#[utoipa::path(get, path = "/admin/services/{id}", tag = "admin", params(("id" = u64, Path, description = "Service id")), responses((status = 200, description = "Service"), (status = 303, description = "Not found")))]
pub async fn get_service(State(state): State<ServerState>, id: Id) -> Result<Json<Service>, Rejection> {
    let Path(id) = id.map_err(rejected)?;
    show(state.services.as_ref(), id).await
}

#[utoipa::path(put, path = "/admin/services/{id}", tag = "admin", params(("id" = u64, Path, description = "Service id")), request_body = crate::openapi::ServiceInputDoc, responses((status = 303, description = "Redirect to /admin with a notice")))]
pub async fn update_service(
    State(state): State<ServerState>,
    id: Id,
    input: Payload<ServiceInput>,
) -> Mutation {
    let Path(id) = id.map_err(rejected)?;
    let Json(input) = input.map_err(rejected)?;
    replace(state.services.as_ref(), id, input).await
}

#[utoipa::path(delete, path = "/admin/services/{id}", tag = "admin", params(("id" = u64, Path, description = "Service id")), responses((status = 303, description = "Redirect to /admin with a notice")))]
pub async fn remove_service(State(state): State<ServerState>, id: Id) -> Mutation {
    let Path(id) = id.map_err(rejected)?;
    discard(state.services.as_ref(), id).await
}

#[utoipa::path(post, path = "/admin/reviews", tag = "admin", request_body = crate::openapi::ReviewInputDoc, responses((status = 303, description = "Redirect to /admin with a notice")))]
pub async fn add_review(State(state): State<ServerState>, input: Payload<ReviewInput>) -> Mutation {
    let Json(input) = input.map_err(rejected)?;
    create(state.reviews.as_ref(), input).await
}

#[utoipa::path(get, path = "/admin/reviews/{id}", tag = "admin", params(("id" = u64, Path, description = "Review id")), responses((status = 200, description = "Review"), (status = 303, description = "Not found")))]
pub async fn get_review(State(state): State<ServerState>, id: Id) -> Result<Json<Review>, Rejection> {
    let Path(id) = id.map_err(rejected)?;
    show(state.reviews.as_ref(), id).await
}

#[utoipa::path(put, path = "/admin/reviews/{id}", tag = "admin", params(("id" = u64, Path, description = "Review id")), request_body = crate::openapi::ReviewInputDoc, responses((status = 303, description = "Redirect to /admin with a notice")))]
pub async fn update_review(
    State(state): State<ServerState>,
    id: Id,
    input: Payload<ReviewInput>,
) -> Mutation {
    let Path(id) = id.map_err(rejected)?;
    let Json(input) = input.map_err(rejected)?;
    replace(state.reviews.as_ref(), id, input).await
}

#[utoipa::path(delete, path = "/admin/reviews/{id}", tag = "admin", params(("id" = u64, Path, description = "Review id")), responses((status = 303, description = "Redirect to /admin with a notice")))]
pub async fn remove_review(State(state): State<ServerState>, id: Id) -> Mutation {
    let Path(id) = id.map_err(rejected)?;
    discard(state.reviews.as_ref(), id).await
}

#[utoipa::path(get, path = "/admin/settings", tag = "admin", responses((status = 200, description = "Current settings")))]
pub async fn get_settings(State(state): State<ServerState>) -> Result<Json<Settings>, Rejection> {
    state.settings.get().await.map(Json).map_err(rejected)
}

#[utoipa::path(put, path = "/admin/settings", tag = "admin", request_body = crate::openapi::SettingsPatchDoc, responses((status = 303, description = "Redirect to /admin with a notice")))]
pub async fn update_settings(State(state): State<ServerState>, patch: Payload<SettingsPatch>) -> Mutation {
    let Json(patch) = patch.map_err(rejected)?;
    state.settings.update(patch).await.map_err(rejected)?;
    Ok(done("Settings saved".to_string()))
}

/// Raw `services` collection.
#[utoipa::path(get, path = "/admin/api/services", tag = "export", responses((status = 200, description = "All services")))]
pub async fn export_services(State(state): State<ServerState>) -> Result<Json<Vec<Service>>, Rejection> {
    state.services.list().await.map(Json).map_err(rejected)
}

/// Raw `reviews` collection.
#[utoipa::path(get, path = "/admin/api/reviews", tag = "export", responses((status = 200, description = "All reviews")))]
pub async fn export_reviews(State(state): State<ServerState>) -> Result<Json<Vec<Review>>, Rejection> {
    state.reviews.list().await.map(Json).map_err(rejected)
}
