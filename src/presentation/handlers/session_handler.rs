use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        error::UniqueField,
        models::{
            draft::Fragment,
            professional::Selection,
            records::ProviderId,
            session::{Page, Session, SessionId},
        },
        repositories::{
            catalog_repository::CatalogRepository, provider_repository::ProviderRepository,
            session_repository::SessionRepository,
        },
    },
    presentation::error::ApiError,
    usecase::{
        personal_step_usecase::{PersonalInput, PersonalStepUsecase},
        professional_step_usecase::{ProfessionalInput, ProfessionalStepUsecase, SelectionKind},
        profile_step_usecase::{AvailabilityStatus, ProfileInput, ProfileStepUsecase},
        session_usecase::SessionUsecase,
    },
};

// Request

#[derive(Serialize, Deserialize)]
pub struct NavigateRequest {
    pub page: String,
}

#[derive(Serialize, Deserialize)]
pub struct ToggleRequest {
    pub kind: SelectionKind,
    pub id: String,
}

#[derive(Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub field: UniqueField,
    #[serde(default)]
    pub value: String,
}

// Response

/// json for the navigation shell
#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub current_page: Page,
    /// Draft fragments saved so far
    pub completed_steps: Vec<Fragment>,
    pub selection: Selection,
    pub provider_id: Option<ProviderId>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: *session.id().as_uuid(),
            current_page: session.current_page(),
            completed_steps: session.draft.present(),
            selection: session.selection.clone(),
            provider_id: session.provider_id().cloned(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub field: UniqueField,
    pub status: AvailabilityStatus,
}

/* Router Function and Handler Function */

/// Router for the shell and the three registration steps
pub fn create_session_router<S, C, P>(
    session_service: SessionUsecase<S>,
    personal_service: PersonalStepUsecase<S>,
    professional_service: ProfessionalStepUsecase<S, C>,
    profile_service: ProfileStepUsecase<S, P>,
) -> Router
where
    S: SessionRepository + 'static,
    C: CatalogRepository + 'static,
    P: ProviderRepository + 'static,
{
    let state = SessionState {
        session_service: Arc::new(session_service),
        personal_service: Arc::new(personal_service),
        professional_service: Arc::new(professional_service),
        profile_service: Arc::new(profile_service),
    };

    Router::new()
        .route("/sessions", post(start::<S, C, P>))
        .route("/sessions/{id}", get(show::<S, C, P>))
        .route("/sessions/{id}/navigate", post(navigate::<S, C, P>))
        .route("/sessions/{id}/personal", post(save_personal::<S, C, P>))
        .route(
            "/sessions/{id}/professional/selection",
            post(toggle_selection::<S, C, P>),
        )
        .route(
            "/sessions/{id}/professional",
            post(save_professional::<S, C, P>),
        )
        .route("/sessions/{id}/profile", post(save_profile::<S, C, P>))
        .route(
            "/sessions/{id}/profile/availability",
            get(check_availability::<S, C, P>),
        )
        .with_state(state)
}

pub struct SessionState<S, C, P>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    pub session_service: Arc<SessionUsecase<S>>,
    pub personal_service: Arc<PersonalStepUsecase<S>>,
    pub professional_service: Arc<ProfessionalStepUsecase<S, C>>,
    pub profile_service: Arc<ProfileStepUsecase<S, P>>,
}

impl<S, C, P> Clone for SessionState<S, C, P>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    fn clone(&self) -> Self {
        Self {
            session_service: Arc::clone(&self.session_service),
            personal_service: Arc::clone(&self.personal_service),
            professional_service: Arc::clone(&self.professional_service),
            profile_service: Arc::clone(&self.profile_service),
        }
    }
}

// handler function

async fn start<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let session = state.session_service.start().await?;
    Ok((StatusCode::CREATED, Json((&session).into())))
}

async fn show<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let session = state.session_service.get(SessionId::from_uuid(id)).await?;
    Ok(Json((&session).into()))
}

async fn navigate<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<SessionResponse>, ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let session = state
        .session_service
        .navigate(SessionId::from_uuid(id), &payload.page)
        .await?;
    Ok(Json((&session).into()))
}

async fn save_personal<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PersonalInput>,
) -> Result<Json<SessionResponse>, ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let session = state
        .personal_service
        .advance(SessionId::from_uuid(id), payload)
        .await?;
    Ok(Json((&session).into()))
}

async fn toggle_selection<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<Selection>, ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let selection = state
        .professional_service
        .toggle(SessionId::from_uuid(id), payload.kind, &payload.id)
        .await?;
    Ok(Json(selection))
}

async fn save_professional<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfessionalInput>,
) -> Result<Json<SessionResponse>, ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let session = state
        .professional_service
        .advance(SessionId::from_uuid(id), payload)
        .await?;
    Ok(Json((&session).into()))
}

async fn save_profile<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfileInput>,
) -> Result<Json<SessionResponse>, ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let session = state
        .profile_service
        .advance(SessionId::from_uuid(id), payload)
        .await?;
    Ok(Json((&session).into()))
}

async fn check_availability<S, C, P>(
    State(state): State<SessionState<S, C, P>>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError>
where
    S: SessionRepository,
    C: CatalogRepository,
    P: ProviderRepository,
{
    let status = state
        .profile_service
        .check_availability(SessionId::from_uuid(id), query.field, &query.value)
        .await?;
    Ok(Json(AvailabilityResponse {
        field: query.field,
        status,
    }))
}
