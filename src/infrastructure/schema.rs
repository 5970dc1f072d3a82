use std::{fmt, future::Future, str::FromStr};

use tracing::warn;

use crate::domain::error::RepositoryError;

/// Declared layout of the remote tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Singular link tables, `cpf` document column, services without area
    V1,
    V2,
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(SchemaVersion::V1),
            "v2" | "2" => Ok(SchemaVersion::V2),
            other => Err(format!("unknown schema version: {other}")),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => f.write_str("v1"),
            SchemaVersion::V2 => f.write_str("v2"),
        }
    }
}

/// Table and column names for one schema version
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub version: SchemaVersion,
    pub users: &'static str,
    pub user_document: &'static str,
    pub user_account: Option<&'static str>,
    pub providers: &'static str,
    pub provider_user_fk: &'static str,
    pub provider_categories: &'static str,
    pub provider_services: &'static str,
    pub attachments: &'static str,
    pub categories: &'static str,
    pub services: &'static str,
    pub services_have_area: bool,
}

const V1: Schema = Schema {
    version: SchemaVersion::V1,
    users: "usuarios",
    user_document: "cpf",
    user_account: None,
    providers: "prestadores",
    provider_user_fk: "user_id",
    provider_categories: "prestador_area",
    provider_services: "prestador_servico",
    attachments: "anexos",
    categories: "areas",
    services: "servicos",
    services_have_area: false,
};

const V2: Schema = Schema {
    version: SchemaVersion::V2,
    users: "usuarios",
    user_document: "documento",
    user_account: Some("auth_id"),
    providers: "prestadores",
    provider_user_fk: "usuario_id",
    provider_categories: "prestador_areas",
    provider_services: "prestador_servicos",
    attachments: "prestador_anexos",
    categories: "areas_profissionais",
    services: "servicos_prestados",
    services_have_area: true,
};

impl SchemaVersion {
    pub fn schema(self) -> &'static Schema {
        match self {
            SchemaVersion::V1 => &V1,
            SchemaVersion::V2 => &V2,
        }
    }
}

/// Primary schema plus the one version a schema-shaped failure may retry against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaSet {
    pub primary: SchemaVersion,
    pub fallback: Option<SchemaVersion>,
}

impl SchemaSet {
    pub fn new(primary: SchemaVersion, fallback: Option<SchemaVersion>) -> Self {
        // retrying against the same layout can only fail the same way
        let fallback = fallback.filter(|f| *f != primary);
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &'static Schema {
        self.primary.schema()
    }

    /// Runs `op` against the primary schema. A `SchemaMismatch` is retried
    /// exactly once against the fallback version, when one is configured.
    pub async fn run<T, F, Fut>(&self, what: &str, op: F) -> Result<T, RepositoryError>
    where
        F: Fn(&'static Schema) -> Fut,
        Fut: Future<Output = Result<T, RepositoryError>>,
    {
        match op(self.primary.schema()).await {
            Err(RepositoryError::SchemaMismatch(detail)) => match self.fallback {
                Some(fallback) => {
                    warn!(
                        what,
                        primary = %self.primary,
                        %fallback,
                        detail,
                        "schema mismatch, retrying against fallback schema"
                    );
                    op(fallback.schema()).await
                }
                None => Err(RepositoryError::SchemaMismatch(detail)),
            },
            other => other,
        }
    }
}

impl Default for SchemaSet {
    fn default() -> Self {
        Self::new(SchemaVersion::V2, None)
    }
}
