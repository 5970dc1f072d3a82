use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    error::RepositoryError,
    models::session::{Session, SessionId},
    repositories::session_repository::SessionRepository,
};

const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// Process-local session storage. Drafts never leave memory until finalized.
///
/// Sessions idle for longer than the ttl are dropped, lazily on `find` and
/// in bulk on every `create`.
#[derive(Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    idle_ttl: TimeDelta,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_IDLE_TTL)
    }

    pub fn with_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl: TimeDelta::from_std(idle_ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    fn is_stale(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(session.updated_at()) > self.idle_ttl
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self) -> Result<Session, RepositoryError> {
        let session = Session::new(SessionId::new());
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !self.is_stale(s, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "idle sessions evicted");
        }
        sessions.insert(session.id(), session.clone());
        Ok(session)
    }

    async fn find(&self, id: SessionId) -> Result<Option<Session>, RepositoryError> {
        let found = self.sessions.read().await.get(&id).cloned();
        match found {
            Some(session) if self.is_stale(&session, Utc::now()) => {
                self.sessions.write().await.remove(&id);
                debug!(session_id = %id, "idle session expired");
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn save(&self, session: Session) -> Result<(), RepositoryError> {
        self.sessions.write().await.insert(session.id(), session);
        Ok(())
    }
}
