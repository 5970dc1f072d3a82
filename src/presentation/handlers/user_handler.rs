use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        repositories::user_repository::UserRepository, services::account_service::AccountService,
    },
    presentation::error::ApiError,
    usecase::register_user_usecase::{BasicUserInput, RegisterUserUsecase},
};

// Response

/// json for register response
#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub account_id: String,
    pub profile_id: String,
}

/* Router Function and Handler Function */

// User Router

/// function return Router object
/// Suppose to be nested by main router
pub fn create_user_router<U, A>(register_service: RegisterUserUsecase<U, A>) -> Router
where
    U: UserRepository + 'static,
    A: AccountService + 'static,
{
    let state = UserState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/users", post(register::<U, A>))
        .with_state(state)
}

pub struct UserState<U: UserRepository, A: AccountService> {
    pub register_service: Arc<RegisterUserUsecase<U, A>>,
}

impl<U: UserRepository, A: AccountService> Clone for UserState<U, A> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
        }
    }
}

// handler function

/// handler function for basic (customer) sign-up
async fn register<U: UserRepository, A: AccountService>(
    State(state): State<UserState<U, A>>,
    Json(payload): Json<BasicUserInput>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let registered = state.register_service.create_user(payload).await?;
    let response = RegisterResponse {
        account_id: registered.account_id.0,
        profile_id: registered.profile_id.0,
    };
    Ok((StatusCode::CREATED, Json(response)))
}
