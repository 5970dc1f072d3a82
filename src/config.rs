use std::{net::SocketAddr, time::Duration};

use thiserror::Error;

use crate::infrastructure::schema::{SchemaSet, SchemaVersion};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FALLBACK_EMAIL_DOMAIN: &str = "presta.ai";
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub bind_addr: SocketAddr,
    pub schemas: SchemaSet,
    pub fallback_email_domain: String,
    pub uniqueness_debounce: Duration,
    /// Idle time after which a registration session is dropped
    pub session_ttl: Duration,
    pub log_level: String,
}

impl AppConfig {
    /// Reads the process environment, with `.env` loaded first when present
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let supabase_url = required("SUPABASE_URL")?;
        let supabase_anon_key = required("SUPABASE_ANON_KEY")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let primary = match get("SCHEMA_VERSION") {
            Some(raw) => parse_version("SCHEMA_VERSION", &raw)?,
            None => SchemaVersion::V2,
        };
        let fallback = get("SCHEMA_FALLBACK_VERSION")
            .map(|raw| parse_version("SCHEMA_FALLBACK_VERSION", &raw))
            .transpose()?;

        let debounce_ms = match get("UNIQUENESS_DEBOUNCE_MS") {
            Some(raw) => parse_u64("UNIQUENESS_DEBOUNCE_MS", &raw)?,
            None => DEFAULT_DEBOUNCE_MS,
        };
        let session_ttl_secs = match get("SESSION_TTL_SECS") {
            Some(raw) => parse_u64("SESSION_TTL_SECS", &raw)?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        if session_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "SESSION_TTL_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            bind_addr,
            schemas: SchemaSet::new(primary, fallback),
            fallback_email_domain: get("FALLBACK_EMAIL_DOMAIN")
                .unwrap_or_else(|| DEFAULT_FALLBACK_EMAIL_DOMAIN.to_string()),
            uniqueness_debounce: Duration::from_millis(debounce_ms),
            session_ttl: Duration::from_secs(session_ttl_secs),
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

fn parse_version(name: &'static str, raw: &str) -> Result<SchemaVersion, ConfigError> {
    raw.parse()
        .map_err(|reason| ConfigError::Invalid { name, reason })
}
