use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, formatters};

const MIN_PASSWORD_LEN: usize = 6;

/// Plain password held only until it is handed to the sign-up call.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::WeakPassword);
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Digit-only CPF (11) or CNPJ (14)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document(String);

impl Document {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        if !formatters::is_valid_document(raw) {
            return Err(DomainError::InvalidDocument);
        }
        Ok(Self(formatters::unformat_document(raw)))
    }

    pub fn cpf(raw: &str) -> Result<Self, DomainError> {
        if !formatters::is_valid_cpf(raw) {
            return Err(DomainError::InvalidCpf);
        }
        Ok(Self(formatters::unformat_cpf(raw)))
    }

    #[cfg(test)]
    pub fn is_cnpj(&self) -> bool {
        self.0.len() == 14
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if !formatters::is_valid_email(trimmed) {
            return Err(DomainError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Masculino,
    Feminino,
    Outro,
    NaoInformar,
}

impl Gender {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "masculino" => Ok(Gender::Masculino),
            "feminino" => Ok(Gender::Feminino),
            "outro" => Ok(Gender::Outro),
            "nao-informar" => Ok(Gender::NaoInformar),
            other => Err(DomainError::InvalidChoice {
                field: "genero",
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculino => "masculino",
            Gender::Feminino => "feminino",
            Gender::Outro => "outro",
            Gender::NaoInformar => "nao-informar",
        }
    }
}

/// First step of the provider registration
#[derive(Debug, Clone)]
pub struct PersonalData {
    pub first_name: String,
    pub last_name: String,
    pub document: Document,
    pub gender: Option<Gender>,
    pub id_document_url: Option<String>,
    pub email: Email,
    pub password: Password,
}

impl PersonalData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One-shot registration of a customer account
#[derive(Debug, Clone)]
pub struct BasicUserData {
    pub full_name: String,
    pub cpf: Document,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub email: Email,
    pub password: Password,
}
