use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::error::{AccountError, DomainError, RepositoryError};

/// json body for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `DomainError` rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

pub fn status_of(error: &DomainError) -> StatusCode {
    match error {
        DomainError::MissingFields(_)
        | DomainError::InvalidCpf
        | DomainError::InvalidDocument
        | DomainError::InvalidEmail
        | DomainError::InvalidPhone
        | DomainError::WeakPassword
        | DomainError::InvalidChoice { .. }
        | DomainError::NicknameHasWhitespace
        | DomainError::SelectionRequired
        | DomainError::CategoryNotSelected
        | DomainError::UnknownOption(_)
        | DomainError::IncompleteDraft(_) => StatusCode::UNPROCESSABLE_ENTITY,

        DomainError::Unavailable(_) | DomainError::DuplicateRegistration => StatusCode::CONFLICT,
        DomainError::ProviderRequired => StatusCode::FORBIDDEN,
        DomainError::SessionNotFound => StatusCode::NOT_FOUND,
        DomainError::RateLimited => StatusCode::TOO_MANY_REQUESTS,

        DomainError::AvailabilityCheckFailed(_)
        | DomainError::StorageMisconfigured
        | DomainError::StoragePermissionDenied => StatusCode::BAD_GATEWAY,

        DomainError::Repository(e) => match e {
            RepositoryError::Conflict(_) => StatusCode::CONFLICT,
            RepositoryError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::BAD_GATEWAY,
        },
        DomainError::Account(e) => match e {
            AccountError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AccountError::AlreadyRegistered => StatusCode::CONFLICT,
            AccountError::InvalidEmail(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AccountError::Other(_) => StatusCode::BAD_GATEWAY,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            warn!(%status, error = %self.0, "request failed upstream");
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
