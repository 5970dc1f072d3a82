use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::models::draft::Fragment;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Por favor, preencha todos os campos obrigatórios: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Por favor, insira um CPF válido com 11 dígitos")]
    InvalidCpf,

    #[error("Por favor, insira um CPF (11 dígitos) ou CNPJ (14 dígitos) válido")]
    InvalidDocument,

    #[error("Por favor, insira um email válido")]
    InvalidEmail,

    #[error("Telefone inválido (10 ou 11 dígitos)")]
    InvalidPhone,

    #[error("A senha deve ter no mínimo 6 caracteres")]
    WeakPassword,

    #[error("Valor inválido para {field}: {value}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("Nickname não pode conter espaços")]
    NicknameHasWhitespace,

    #[error("Este {0} já está em uso")]
    Unavailable(UniqueField),

    #[error("Erro ao validar {0}")]
    AvailabilityCheckFailed(UniqueField),

    #[error("Por favor, selecione pelo menos uma Área e um Serviço Prestado")]
    SelectionRequired,

    #[error("Selecione a área do serviço primeiro")]
    CategoryNotSelected,

    #[error("Opção desconhecida: {0}")]
    UnknownOption(String),

    #[error("Dados do cadastro incompletos: {}", fragments_label(.0))]
    IncompleteDraft(Vec<Fragment>),

    #[error("Email ou CPF já cadastrado no sistema.")]
    DuplicateRegistration,

    #[error("Tabela não encontrada. Verifique a configuração do banco.")]
    StorageMisconfigured,

    #[error("Sem permissão para salvar. Verifique as configurações de segurança.")]
    StoragePermissionDenied,

    #[error("Por favor, aguarde alguns segundos antes de tentar novamente.")]
    RateLimited,

    #[error("Por favor, faça o cadastro como prestador primeiro")]
    ProviderRequired,

    #[error("Session not found")]
    SessionNotFound,
}

fn fragments_label(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Failures reported by the remote sign-up endpoint
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Too many sign-up attempts")]
    RateLimited,

    #[error("Email rejected by the auth service: {0}")]
    InvalidEmail(String),

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("{0}")]
    Other(String),
}

/// Profile fields that must be unique across providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniqueField {
    #[serde(rename = "nickname")]
    Nickname,
    #[serde(rename = "email_profissional")]
    ProfessionalEmail,
    #[serde(rename = "telefone")]
    Phone,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UniqueField::Nickname => "nickname",
            UniqueField::ProfessionalEmail => "email",
            UniqueField::Phone => "telefone",
        };
        f.write_str(label)
    }
}
