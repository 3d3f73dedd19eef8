use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Extension, State},
    response::Redirect,
    Form, Json,
};
use models::{Review, Service};
use serde::Serialize;
use service::{
    admin::{collection_store::CollectionStore, settings_store::SettingsStore},
    auth::{
        domain::{Credentials, LoginInput, Notice, SessionId},
        repository::memory::InMemorySessions,
        SessionGate,
    },
    runtime::Stores,
};

use crate::errors::{AppError, Flash, Rejection, LOGIN_PATH};

#[derive(Clone)]
pub struct ServerState {
    pub services: Arc<dyn CollectionStore<Service>>,
    pub reviews: Arc<dyn CollectionStore<Review>>,
    pub settings: Arc<dyn SettingsStore>,
    pub gate: Arc<SessionGate>,
}

impl ServerState {
    /// Wire file-backed stores and an in-memory session gate.
    pub fn new(stores: Stores, credentials: Credentials) -> Self {
        let gate = SessionGate::new(Arc::new(InMemorySessions::default()), credentials);
        Self {
            services: stores.services,
            reviews: stores.reviews,
            settings: stores.settings,
            gate: Arc::new(gate),
        }
    }
}

#[derive(Serialize)]
pub struct LoginView {
    pub authenticated: bool,
    pub notices: Vec<Notice>,
}

pub async fn login_page(
    State(state): State<ServerState>,
    Extension(sid): Extension<SessionId>,
) -> Json<LoginView> {
    let authenticated = state.gate.state(sid).await.is_authenticated();
    let notices = state.gate.take_notices(sid).await;
    Json(LoginView { authenticated, notices })
}

#[utoipa::path(post, path = "/admin/login", tag = "auth", responses((status = 303, description = "Redirect to /admin on success, back to /admin/login otherwise")))]
pub async fn login(
    State(state): State<ServerState>,
    Extension(sid): Extension<SessionId>,
    input: Result<Form<LoginInput>, FormRejection>,
) -> Result<(Flash, Redirect), Rejection> {
    let Form(input) = input.map_err(|e| AppError::from(e).back_to(LOGIN_PATH))?;
    state
        .gate
        .login(sid, input)
        .await
        .map_err(|e| AppError::from(e).back_to(LOGIN_PATH))?;
    Ok((Flash(Notice::success("Logged in")), Redirect::to("/admin")))
}

pub async fn logout(
    State(state): State<ServerState>,
    Extension(sid): Extension<SessionId>,
) -> (Flash, Redirect) {
    state.gate.logout(sid).await;
    (Flash(Notice::info("Logged out")), Redirect::to("/"))
}
