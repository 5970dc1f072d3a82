use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{
    draft::RegistrationDraft, professional::Selection, records::ProviderId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Pages the navigation shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Inicio,
    Cadastro,
    CadastroProfissional,
    CadastroPerfil,
    Entrar,
    ComoFuncionamos,
    Concluido,
}

impl Page {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "inicio" => Some(Page::Inicio),
            "cadastro" => Some(Page::Cadastro),
            "cadastro-profissional" => Some(Page::CadastroProfissional),
            "cadastro-perfil" => Some(Page::CadastroPerfil),
            "entrar" => Some(Page::Entrar),
            "como-funcionamos" => Some(Page::ComoFuncionamos),
            "concluido" => Some(Page::Concluido),
            _ => None,
        }
    }
}

/// Navigation shell state plus the draft it owns
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    current_page: Page,
    pub draft: RegistrationDraft,
    /// Working selection of the professional step, kept between toggles
    pub selection: Selection,
    provider_id: Option<ProviderId>,
    updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            current_page: Page::Inicio,
            draft: RegistrationDraft::default(),
            selection: Selection::default(),
            provider_id: None,
            updated_at: Utc::now(),
        }
    }

    /// Move to the named page. Unknown names leave the page unchanged.
    pub fn navigate(&mut self, name: &str) -> bool {
        match Page::parse(name) {
            Some(page) => {
                self.go_to(page);
                true
            }
            None => false,
        }
    }

    pub fn go_to(&mut self, page: Page) {
        self.current_page = page;
        self.touch();
    }

    pub fn set_provider_id(&mut self, provider_id: ProviderId) {
        self.provider_id = Some(provider_id);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn provider_id(&self) -> Option<&ProviderId> {
        self.provider_id.as_ref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
