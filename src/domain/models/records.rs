use serde::{Deserialize, Serialize};

use crate::domain::models::{
    personal::{Document, Gender},
    professional::ExperienceBucket,
    profile::{Availability, Language},
};

/// Identity issued by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountId(pub String);

/// Row id in the `usuarios` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Row id in the `prestadores` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderId(pub String);

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub account_id: Option<AccountId>,
    pub full_name: String,
    pub document: Document,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub email: String,
}

/// Provider row, already normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProvider {
    pub profile_id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub document: Document,
    pub gender: Option<Gender>,
    pub email: String,
    pub experience: Option<ExperienceBucket>,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub social_handle: Option<String>,
    pub linkedin_url: Option<String>,
    pub availability: Vec<Availability>,
    pub languages: Vec<Language>,
    pub phone: Option<String>,
    pub professional_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// RG or birth certificate
    Rg,
    /// CNPJ card or work record
    CnpjCtps,
    Galeria,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Rg => "rg",
            AttachmentKind::CnpjCtps => "cnpj_ctps",
            AttachmentKind::Galeria => "galeria",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub kind: AttachmentKind,
    pub url: String,
}
