use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::session::{Session, SessionId},
};

/// Holds navigation shells and their drafts between requests
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self) -> Result<Session, RepositoryError>;
    async fn find(&self, id: SessionId) -> Result<Option<Session>, RepositoryError>;
    async fn save(&self, session: Session) -> Result<(), RepositoryError>;
}
