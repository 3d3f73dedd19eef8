//! Session plumbing: resolves the `session_id` cookie for every request and
//! gates admin routes.

use axum::{
    extract::{Extension, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::{Notice, SessionId};
use tracing::debug;

use crate::errors::{AppError, LOGIN_PATH};
use crate::routes::auth::ServerState;

pub const SESSION_COOKIE: &str = "session_id";

fn session_cookie(id: SessionId) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Middleware: attach a [`SessionId`] to the request, issuing a cookie for
/// new visitors, and queue any [`Notice`] the handler put on the response.
pub async fn resolve_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<SessionId>().ok());
    let sid = existing.unwrap_or_else(SessionId::generate);
    req.extensions_mut().insert(sid);

    let mut resp = next.run(req).await;

    if let Some(notice) = resp.extensions_mut().remove::<Notice>() {
        debug!(session = %sid, level = ?notice.level, "notice queued");
        state.gate.flash(sid, notice).await;
    }
    if existing.is_none() {
        let jar = CookieJar::new().add(session_cookie(sid));
        return (jar, resp).into_response();
    }
    resp
}

/// Middleware: admin routes require an authenticated session; anyone else
/// is sent to the login page with a notice.
pub async fn require_admin(
    State(state): State<ServerState>,
    Extension(sid): Extension<SessionId>,
    req: Request,
    next: Next,
) -> Response {
    match state.gate.require_admin(sid).await {
        Ok(_) => next.run(req).await,
        Err(e) => AppError::from(e).back_to(LOGIN_PATH).into_response(),
    }
}
