use async_trait::async_trait;

use crate::domain::{
    error::{RepositoryError, UniqueField},
    models::{
        catalog::{CategoryId, ServiceId},
        records::{NewAttachment, NewProvider, ProviderId},
    },
};

#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn insert_provider(&self, provider: &NewProvider) -> Result<ProviderId, RepositoryError>;

    /// Exact-match lookup on a unique profile column.
    /// `Err(RepositoryError::NotFound)` and `Ok(None)` both mean the value is free.
    async fn find_by_unique_field(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<ProviderId>, RepositoryError>;

    async fn link_categories(
        &self,
        provider_id: &ProviderId,
        category_ids: &[CategoryId],
    ) -> Result<(), RepositoryError>;

    async fn link_services(
        &self,
        provider_id: &ProviderId,
        service_ids: &[ServiceId],
    ) -> Result<(), RepositoryError>;

    async fn has_service_link(
        &self,
        provider_id: &ProviderId,
        service_id: &ServiceId,
    ) -> Result<bool, RepositoryError>;

    async fn insert_attachments(
        &self,
        provider_id: &ProviderId,
        attachments: &[NewAttachment],
    ) -> Result<(), RepositoryError>;
}
