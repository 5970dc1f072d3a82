use tracing::warn;

use crate::domain::{
    error::DomainError,
    models::catalog::{Catalog, Category, CategoryId, Service},
    repositories::catalog_repository::CatalogRepository,
};

/// Fetch both lists the professional step chooses from.
pub async fn load_catalog<C: CatalogRepository>(catalog_repository: &C) -> Result<Catalog, DomainError> {
    let categories = catalog_repository.list_categories().await?;
    let services = catalog_repository.list_services().await?;

    if categories.is_empty() {
        warn!("no professional areas registered");
    }
    if services.is_empty() {
        warn!("no services registered");
    }
    Ok(Catalog::new(categories, services))
}

pub struct CatalogUsecase<C: CatalogRepository> {
    catalog_repository: C,
}

impl<C: CatalogRepository> CatalogUsecase<C> {
    pub fn new(catalog_repository: C) -> Self {
        Self { catalog_repository }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, DomainError> {
        let categories = self.catalog_repository.list_categories().await?;
        if categories.is_empty() {
            warn!("no professional areas registered");
        }
        Ok(categories)
    }

    /// Services offered under the selected categories
    pub async fn services(&self, selected: &[CategoryId]) -> Result<Vec<Service>, DomainError> {
        let catalog = load_catalog(&self.catalog_repository).await?;
        Ok(catalog.services_for(selected).into_iter().cloned().collect())
    }
}
