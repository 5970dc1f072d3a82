use tracing::debug;

use crate::{
    domain::{
        error::DomainError,
        models::session::{Session, SessionId},
        repositories::session_repository::SessionRepository,
    },
    usecase::step_form::load_session,
};

/// Navigation shell operations
pub struct SessionUsecase<S: SessionRepository> {
    session_repository: S,
}

impl<S: SessionRepository> SessionUsecase<S> {
    pub fn new(session_repository: S) -> Self {
        Self { session_repository }
    }

    pub async fn start(&self) -> Result<Session, DomainError> {
        let session = self.session_repository.create().await?;
        debug!(session_id = %session.id(), "session started");
        Ok(session)
    }

    pub async fn get(&self, id: SessionId) -> Result<Session, DomainError> {
        load_session(&self.session_repository, id).await
    }

    /// Unknown page names leave the session where it is.
    pub async fn navigate(&self, id: SessionId, page: &str) -> Result<Session, DomainError> {
        let mut session = load_session(&self.session_repository, id).await?;
        if session.navigate(page) {
            self.session_repository.save(session.clone()).await?;
        } else {
            debug!(session_id = %id, page, "ignoring unknown page");
        }
        Ok(session)
    }
}
