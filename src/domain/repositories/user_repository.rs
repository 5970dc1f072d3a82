use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        personal::Document,
        records::{NewProfile, ProfileId},
    },
};

/// Person records (`usuarios`), shared by customers and providers
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, profile: &NewProfile) -> Result<ProfileId, RepositoryError>;
    async fn find_by_document(
        &self,
        document: &Document,
    ) -> Result<Option<ProfileId>, RepositoryError>;
}
