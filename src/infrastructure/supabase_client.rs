use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::error::RepositoryError;

/// Row-level access to named remote tables
#[async_trait]
pub trait TableGateway: Send + Sync {
    /// Bulk insert, returning the stored rows
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, RepositoryError>;

    /// Rows whose columns equal every given value
    async fn select_by_field(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Value>, RepositoryError>;

    async fn select_all(
        &self,
        table: &str,
        columns: &str,
        order: &str,
    ) -> Result<Vec<Value>, RepositoryError>;
}

/// HTTP client for a Supabase project (PostgREST tables and GoTrue auth)
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

#[async_trait]
impl TableGateway for SupabaseClient {
    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, RepositoryError> {
        debug!(table, count = rows.len(), "insert");
        let response = self
            .request(Method::POST, self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await
            .map_err(transport_error)?;
        read_rows(response).await
    }

    async fn select_by_field(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Value>, RepositoryError> {
        debug!(table, ?filters, "select");
        let conditions: Vec<(&str, String)> = filters
            .iter()
            .map(|(field, value)| (*field, format!("eq.{value}")))
            .collect();
        let response = self
            .request(Method::GET, self.rest_url(table))
            .query(&[("select", columns)])
            .query(&conditions)
            .send()
            .await
            .map_err(transport_error)?;
        read_rows(response).await
    }

    async fn select_all(
        &self,
        table: &str,
        columns: &str,
        order: &str,
    ) -> Result<Vec<Value>, RepositoryError> {
        debug!(table, "select all");
        let response = self
            .request(Method::GET, self.rest_url(table))
            .query(&[("select", columns), ("order", order)])
            .send()
            .await
            .map_err(transport_error)?;
        read_rows(response).await
    }
}

/// PostgREST error payload
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RestErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

pub(crate) fn classify_rest_error(status: StatusCode, body: &RestErrorBody) -> RepositoryError {
    let code = body.code.as_deref().unwrap_or_default();
    let message = body.message.clone().unwrap_or_default();
    let detail = match &body.details {
        Some(details) => format!("{code}: {message} ({details})"),
        None => format!("{code}: {message}"),
    };

    if status == StatusCode::TOO_MANY_REQUESTS || message.contains("For security purposes") {
        return RepositoryError::RateLimited;
    }
    match code {
        "23505" => RepositoryError::Conflict(detail),
        "PGRST116" => RepositoryError::NotFound,
        "42703" | "PGRST204" | "42P01" | "PGRST205" => RepositoryError::SchemaMismatch(detail),
        "42501" => RepositoryError::PermissionDenied(detail),
        _ if message.contains("permission") || message.contains("row-level") => {
            RepositoryError::PermissionDenied(detail)
        }
        _ => RepositoryError::DatabaseError(format!("{status} {detail}")),
    }
}

async fn read_rows(response: Response) -> Result<Vec<Value>, RepositoryError> {
    let status = response.status();
    let text = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        let body = serde_json::from_str::<RestErrorBody>(&text).unwrap_or(RestErrorBody {
            message: Some(text),
            ..Default::default()
        });
        return Err(classify_rest_error(status, &body));
    }

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| RepositoryError::DatabaseError(format!("invalid response body: {e}")))?;
    Ok(match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        row => vec![row],
    })
}

fn transport_error(e: reqwest::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

/// Row id as a string; PostgREST returns uuids as strings and serials as numbers
pub(crate) fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
