use serde::Serialize;
use tracing::info;

use crate::{
    domain::{
        error::DomainError,
        models::{catalog::Service, session::{Page, SessionId}},
        repositories::{
            catalog_repository::CatalogRepository, provider_repository::ProviderRepository,
            session_repository::SessionRepository,
        },
    },
    usecase::step_form::load_session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    Linked,
    AlreadyLinked,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkResult {
    pub outcome: LinkOutcome,
    pub service: Service,
}

/// Attach a service, by name, to the provider registered in this session
pub struct LinkServiceUsecase<S, C, P>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    session_repository: S,
    catalog_repository: C,
    provider_repository: P,
}

impl<S, C, P> LinkServiceUsecase<S, C, P>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    pub fn new(session_repository: S, catalog_repository: C, provider_repository: P) -> Self {
        Self {
            session_repository,
            catalog_repository,
            provider_repository,
        }
    }

    pub async fn link(&self, id: SessionId, service_name: &str) -> Result<LinkResult, DomainError> {
        let mut session = load_session(&self.session_repository, id).await?;
        let Some(provider_id) = session.provider_id().cloned() else {
            session.go_to(Page::Cadastro);
            self.session_repository.save(session).await?;
            return Err(DomainError::ProviderRequired);
        };

        let name = service_name.trim();
        if name.is_empty() {
            return Err(DomainError::MissingFields(vec!["nome"]));
        }

        let service = match self.catalog_repository.find_service_by_name(name).await? {
            Some(service) => service,
            None => self.catalog_repository.create_service(name).await?,
        };

        if self
            .provider_repository
            .has_service_link(&provider_id, &service.id)
            .await?
        {
            return Ok(LinkResult {
                outcome: LinkOutcome::AlreadyLinked,
                service,
            });
        }

        self.provider_repository
            .link_services(&provider_id, std::slice::from_ref(&service.id))
            .await?;
        info!(%provider_id, service = %service.nome, "service linked");

        Ok(LinkResult {
            outcome: LinkOutcome::Linked,
            service,
        })
    }
}
