use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::catalog::{Category, Service},
};

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;
    /// Ordered by name
    async fn list_services(&self) -> Result<Vec<Service>, RepositoryError>;
    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, RepositoryError>;
    async fn create_service(&self, name: &str) -> Result<Service, RepositoryError>;
}
