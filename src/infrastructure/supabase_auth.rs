use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    domain::{
        error::AccountError,
        models::{personal::Password, records::AccountId},
        services::account_service::AccountService,
    },
    infrastructure::supabase_client::SupabaseClient,
};

/// GoTrue sign-up
#[derive(Clone)]
pub struct SupabaseAccountService {
    client: SupabaseClient,
}

impl SupabaseAccountService {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountService for SupabaseAccountService {
    async fn sign_up(&self, email: &str, password: &Password) -> Result<AccountId, AccountError> {
        let response = self
            .client
            .request(Method::POST, self.client.auth_url("signup"))
            .json(&json!({ "email": email, "password": password.expose() }))
            .send()
            .await
            .map_err(|e| AccountError::Other(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AccountError::Other(e.to_string()))?;

        if !status.is_success() {
            // gateways in front of GoTrue may answer in plain text or html
            let error = serde_json::from_str::<AuthErrorBody>(&text).unwrap_or_else(|_| {
                AuthErrorBody {
                    error_code: None,
                    msg: Some(text.trim().to_string()).filter(|m| !m.is_empty()),
                }
            });
            let classified = classify_auth_error(status, &error);
            warn!(%status, error = %classified, "sign-up rejected");
            return Err(classified);
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| AccountError::Other(format!("invalid sign-up response: {e}")))?;

        // with email confirmation on, GoTrue answers with the bare user object
        let id = body
            .pointer("/user/id")
            .or_else(|| body.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| AccountError::Other("sign-up response without user id".into()))?;
        debug!(account_id = id, "sign-up accepted");
        Ok(AccountId(id.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default, alias = "message", alias = "error_description")]
    pub msg: Option<String>,
}

pub(crate) fn classify_auth_error(status: StatusCode, body: &AuthErrorBody) -> AccountError {
    let code = body.error_code.as_deref().unwrap_or_default();
    let message = body.msg.clone().unwrap_or_else(|| status.to_string());
    let lowered = message.to_lowercase();

    if status == StatusCode::TOO_MANY_REQUESTS
        || code.starts_with("over_")
        || message.contains("For security purposes")
    {
        return AccountError::RateLimited;
    }
    if code == "user_already_exists"
        || code == "email_exists"
        || lowered.contains("already registered")
    {
        return AccountError::AlreadyRegistered;
    }
    if code == "email_address_invalid"
        || (lowered.contains("email") && lowered.contains("invalid"))
    {
        return AccountError::InvalidEmail(message);
    }
    AccountError::Other(message)
}
