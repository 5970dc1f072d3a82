use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        models::{
            draft::{FinalizationState, Fragment},
            session::SessionId,
        },
        repositories::{
            catalog_repository::CatalogRepository, provider_repository::ProviderRepository,
            session_repository::SessionRepository, user_repository::UserRepository,
        },
        services::account_service::AccountService,
    },
    presentation::error::ApiError,
    usecase::{
        finalize_registration_usecase::{FinalizeRegistrationUsecase, FinalizeResult},
        link_service_usecase::{LinkResult, LinkServiceUsecase},
    },
};

// Request

#[derive(Serialize, Deserialize)]
pub struct LinkServiceRequest {
    pub nome: String,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct FinalizationResponse {
    pub ready: bool,
    pub missing: Vec<Fragment>,
}

impl From<&FinalizationState> for FinalizationResponse {
    fn from(state: &FinalizationState) -> Self {
        let missing = match state {
            FinalizationState::Ready(_) => Vec::new(),
            FinalizationState::Incomplete { missing } => missing.clone(),
        };
        Self {
            ready: state.is_ready(),
            missing,
        }
    }
}

/* Router Function and Handler Function */

/// Router for submitting a finished draft and for post-registration links
pub fn create_registration_router<S, U, P, A, C>(
    finalize_service: FinalizeRegistrationUsecase<S, U, P, A>,
    link_service: LinkServiceUsecase<S, C, P>,
) -> Router
where
    S: SessionRepository + 'static,
    U: UserRepository + 'static,
    P: ProviderRepository + 'static,
    A: AccountService + 'static,
    C: CatalogRepository + 'static,
{
    let state = RegistrationState {
        finalize_service: Arc::new(finalize_service),
        link_service: Arc::new(link_service),
    };

    Router::new()
        .route(
            "/sessions/{id}/finalization",
            get(finalization::<S, U, P, A, C>),
        )
        .route("/sessions/{id}/finalize", post(finalize::<S, U, P, A, C>))
        .route(
            "/sessions/{id}/services/link",
            post(link_to_service::<S, U, P, A, C>),
        )
        .with_state(state)
}

pub struct RegistrationState<S, U, P, A, C>
where
    S: SessionRepository,
    U: UserRepository,
    P: ProviderRepository,
    A: AccountService,
    C: CatalogRepository,
{
    pub finalize_service: Arc<FinalizeRegistrationUsecase<S, U, P, A>>,
    pub link_service: Arc<LinkServiceUsecase<S, C, P>>,
}

impl<S, U, P, A, C> Clone for RegistrationState<S, U, P, A, C>
where
    S: SessionRepository,
    U: UserRepository,
    P: ProviderRepository,
    A: AccountService,
    C: CatalogRepository,
{
    fn clone(&self) -> Self {
        Self {
            finalize_service: Arc::clone(&self.finalize_service),
            link_service: Arc::clone(&self.link_service),
        }
    }
}

// handler function

async fn finalization<S, U, P, A, C>(
    State(state): State<RegistrationState<S, U, P, A, C>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinalizationResponse>, ApiError>
where
    S: SessionRepository,
    U: UserRepository,
    P: ProviderRepository,
    A: AccountService,
    C: CatalogRepository,
{
    let finalization = state
        .finalize_service
        .state(SessionId::from_uuid(id))
        .await?;
    Ok(Json((&finalization).into()))
}

async fn finalize<S, U, P, A, C>(
    State(state): State<RegistrationState<S, U, P, A, C>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinalizeResult>, ApiError>
where
    S: SessionRepository,
    U: UserRepository,
    P: ProviderRepository,
    A: AccountService,
    C: CatalogRepository,
{
    let result = state
        .finalize_service
        .finalize(SessionId::from_uuid(id))
        .await?;
    Ok(Json(result))
}

async fn link_to_service<S, U, P, A, C>(
    State(state): State<RegistrationState<S, U, P, A, C>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkServiceRequest>,
) -> Result<Json<LinkResult>, ApiError>
where
    S: SessionRepository,
    U: UserRepository,
    P: ProviderRepository,
    A: AccountService,
    C: CatalogRepository,
{
    let result = state
        .link_service
        .link(SessionId::from_uuid(id), &payload.nome)
        .await?;
    Ok(Json(result))
}
