use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use super::domain::{Credentials, LoginInput, Notice, Session, SessionId, SessionState};
use super::errors::AuthError;
use super::repository::SessionRepository;

/// Per-session admin gate, independent of the web framework.
///
/// Two states per session: `Anonymous` and `Authenticated`. Every admin
/// mutation goes through [`require_admin`](Self::require_admin) first.
pub struct SessionGate {
    repo: Arc<dyn SessionRepository>,
    credentials: Credentials,
}

impl SessionGate {
    pub fn new(repo: Arc<dyn SessionRepository>, credentials: Credentials) -> Self {
        Self { repo, credentials }
    }

    async fn session(&self, id: SessionId) -> Session {
        self.repo.load(id).await.unwrap_or_default()
    }

    pub async fn state(&self, id: SessionId) -> SessionState {
        self.session(id).await.state
    }

    /// Authenticate session `id` on an exact match with the configured pair.
    /// On mismatch the session keeps its previous state.
    #[instrument(skip(self, input), fields(session = %id, username = %input.username))]
    pub async fn login(&self, id: SessionId, input: LoginInput) -> Result<(), AuthError> {
        if input.username != self.credentials.username || input.password != self.credentials.password {
            warn!("admin_login_rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let mut session = self.session(id).await;
        session.state = SessionState::Authenticated { username: input.username, since: Utc::now() };
        self.repo.store(id, session).await;
        info!("admin_logged_in");
        Ok(())
    }

    /// Drop back to `Anonymous`; pending notices survive.
    #[instrument(skip(self), fields(session = %id))]
    pub async fn logout(&self, id: SessionId) {
        if let Some(mut session) = self.repo.load(id).await {
            session.state = SessionState::Anonymous;
            if session.notices.is_empty() {
                self.repo.delete(id).await;
            } else {
                self.repo.store(id, session).await;
            }
            info!("admin_logged_out");
        }
    }

    /// Returns the admin username, or `Unauthorized`.
    pub async fn require_admin(&self, id: SessionId) -> Result<String, AuthError> {
        match self.state(id).await {
            SessionState::Authenticated { username, .. } => Ok(username),
            SessionState::Anonymous => Err(AuthError::Unauthorized),
        }
    }

    /// Queue a notice for the next page view of session `id`.
    pub async fn flash(&self, id: SessionId, notice: Notice) {
        let mut session = self.session(id).await;
        session.notices.push(notice);
        self.repo.store(id, session).await;
    }

    /// Drain the pending notices of session `id`.
    pub async fn take_notices(&self, id: SessionId) -> Vec<Notice> {
        let Some(mut session) = self.repo.load(id).await else {
            return Vec::new();
        };
        if session.notices.is_empty() {
            return Vec::new();
        }
        let notices = std::mem::take(&mut session.notices);
        if session.state.is_authenticated() {
            self.repo.store(id, session).await;
        } else {
            self.repo.delete(id).await;
        }
        notices
    }
}
