use async_trait::async_trait;

use super::domain::{Session, SessionId};

/// Repository abstraction for session records.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn load(&self, id: SessionId) -> Option<Session>;
    async fn store(&self, id: SessionId, session: Session);
    async fn delete(&self, id: SessionId);
    async fn count(&self) -> usize;
}

/// Process-local session records, lost on restart.
pub mod memory {
    use super::*;
    use dashmap::DashMap;

    #[derive(Default)]
    pub struct InMemorySessions {
        sessions: DashMap<SessionId, Session>,
    }

    #[async_trait]
    impl SessionRepository for InMemorySessions {
        async fn load(&self, id: SessionId) -> Option<Session> {
            self.sessions.get(&id).map(|s| s.value().clone())
        }

        async fn store(&self, id: SessionId, session: Session) {
            self.sessions.insert(id, session);
        }

        async fn delete(&self, id: SessionId) {
            self.sessions.remove(&id);
        }

        async fn count(&self) -> usize {
            self.sessions.len()
        }
    }
}
