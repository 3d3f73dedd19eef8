use axum::{
    extract::{rejection::FormRejection, Extension, State},
    response::Redirect,
    Form, Json,
};
use chrono::Datelike;
use models::{ContactSubmission, Review, Service, Settings};
use serde::Serialize;
use service::{
    auth::domain::{Notice, SessionId},
    contact,
};

use crate::errors::{AppError, Flash, Rejection};
use crate::routes::{auth::ServerState, or_degrade};

#[derive(Serialize)]
pub struct HomeView {
    pub settings: Settings,
    pub services: Vec<Service>,
    pub reviews: Vec<Review>,
    pub current_year: i32,
    pub notices: Vec<Notice>,
}

#[derive(Serialize)]
pub struct ServicesView {
    pub settings: Settings,
    pub services: Vec<Service>,
    pub current_year: i32,
    pub notices: Vec<Notice>,
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[utoipa::path(get, path = "/", tag = "public", responses((status = 200, description = "Home page view")))]
pub async fn index(State(state): State<ServerState>, Extension(sid): Extension<SessionId>) -> Json<HomeView> {
    let mut notices = state.gate.take_notices(sid).await;
    let settings = or_degrade(state.settings.get().await, Settings::seed(), &mut notices);
    let services = or_degrade(state.services.list().await, Vec::new(), &mut notices);
    let reviews = or_degrade(state.reviews.list().await, Vec::new(), &mut notices);
    Json(HomeView { settings, services, reviews, current_year: current_year(), notices })
}

#[utoipa::path(get, path = "/services", tag = "public", responses((status = 200, description = "Services page view")))]
pub async fn services_page(
    State(state): State<ServerState>,
    Extension(sid): Extension<SessionId>,
) -> Json<ServicesView> {
    let mut notices = state.gate.take_notices(sid).await;
    let settings = or_degrade(state.settings.get().await, Settings::seed(), &mut notices);
    let services = or_degrade(state.services.list().await, Vec::new(), &mut notices);
    Json(ServicesView { settings, services, current_year: current_year(), notices })
}

/// Contact form: confirmation or validation notice, back to the services page.
#[utoipa::path(post, path = "/submit_form", tag = "public", responses((status = 303, description = "Redirect to /services with a notice")))]
pub async fn submit_form(
    form: Result<Form<ContactSubmission>, FormRejection>,
) -> Result<(Flash, Redirect), Rejection> {
    let Form(form) = form.map_err(|e| AppError::from(e).back_to("/services"))?;
    let notice = contact::submit(&form).map_err(|e| AppError::from(e).back_to("/services"))?;
    Ok((Flash(notice), Redirect::to("/services")))
}
