use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        error::DomainError,
        formatters::non_blank,
        models::{
            professional::{ExperienceBucket, ProfessionalData, Selection},
            session::{Page, Session, SessionId},
        },
        repositories::{
            catalog_repository::CatalogRepository, session_repository::SessionRepository,
        },
    },
    usecase::{
        catalog_usecase::load_catalog,
        step_form::{self, StepForm, load_session},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Category,
    Service,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessionalInput {
    pub tempo_trabalho: Option<String>,
    pub cnpj_ctps_url: Option<String>,
}

pub struct ProfessionalStepUsecase<S: SessionRepository, C: CatalogRepository> {
    session_repository: S,
    catalog_repository: C,
}

impl<S: SessionRepository, C: CatalogRepository> ProfessionalStepUsecase<S, C> {
    pub fn new(session_repository: S, catalog_repository: C) -> Self {
        Self {
            session_repository,
            catalog_repository,
        }
    }

    /// Add or remove one category or service from the working selection.
    pub async fn toggle(
        &self,
        id: SessionId,
        kind: SelectionKind,
        item_id: &str,
    ) -> Result<Selection, DomainError> {
        let mut session = load_session(&self.session_repository, id).await?;
        let catalog = load_catalog(&self.catalog_repository).await?;

        match kind {
            SelectionKind::Category => session.selection.toggle_category(item_id, &catalog)?,
            SelectionKind::Service => session.selection.toggle_service(item_id, &catalog)?,
        }
        session.touch();

        let selection = session.selection.clone();
        self.session_repository.save(session).await?;
        Ok(selection)
    }

    pub async fn advance(
        &self,
        id: SessionId,
        input: ProfessionalInput,
    ) -> Result<Session, DomainError> {
        step_form::advance(&self.session_repository, self, id, input).await
    }
}

impl<S: SessionRepository, C: CatalogRepository> StepForm for ProfessionalStepUsecase<S, C> {
    type Input = ProfessionalInput;
    type Fragment = ProfessionalData;

    const NEXT: Page = Page::CadastroPerfil;

    fn collect(
        &self,
        input: ProfessionalInput,
        session: &Session,
    ) -> Result<ProfessionalData, DomainError> {
        if !session.selection.is_complete() {
            return Err(DomainError::SelectionRequired);
        }
        let experience = non_blank(input.tempo_trabalho.as_deref())
            .map(|label| ExperienceBucket::parse(&label))
            .transpose()?;

        Ok(ProfessionalData {
            selection: session.selection.clone(),
            experience,
            supporting_document_url: non_blank(input.cnpj_ctps_url.as_deref()),
        })
    }

    fn persist(&self, fragment: ProfessionalData, session: &mut Session) {
        session.draft.set_professional(fragment);
    }
}
