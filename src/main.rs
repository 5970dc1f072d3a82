mod config;
mod domain;
mod infrastructure;
mod logging;
mod presentation;
mod usecase;

use std::time::Duration;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::AppConfig,
    domain::{
        repositories::{
            catalog_repository::CatalogRepository, provider_repository::ProviderRepository,
            session_repository::SessionRepository, user_repository::UserRepository,
        },
        services::account_service::AccountService,
    },
    infrastructure::{
        catalog_repository::SupabaseCatalogRepository,
        provider_repository::SupabaseProviderRepository, session_store::InMemorySessionRepository,
        supabase_auth::SupabaseAccountService, supabase_client::SupabaseClient,
        user_repository::SupabaseUserRepository,
    },
    presentation::handlers::{
        catalog_handler::create_catalog_router, registration_handler::create_registration_router,
        session_handler::create_session_router, user_handler::create_user_router,
    },
    usecase::{
        catalog_usecase::CatalogUsecase, finalize_registration_usecase::FinalizeRegistrationUsecase,
        link_service_usecase::LinkServiceUsecase, personal_step_usecase::PersonalStepUsecase,
        professional_step_usecase::ProfessionalStepUsecase,
        profile_step_usecase::ProfileStepUsecase, register_user_usecase::RegisterUserUsecase,
        session_usecase::SessionUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_level);
    info!(
        schema = %config.schemas.primary,
        fallback = ?config.schemas.fallback,
        "configuration loaded"
    );

    let supabase = SupabaseClient::new(&config.supabase_url, &config.supabase_anon_key)?;
    let app = create_app(
        InMemorySessionRepository::with_ttl(config.session_ttl),
        SupabaseUserRepository::new(supabase.clone(), config.schemas),
        SupabaseProviderRepository::new(supabase.clone(), config.schemas),
        SupabaseCatalogRepository::new(supabase.clone(), config.schemas),
        SupabaseAccountService::new(supabase),
        config.fallback_email_domain.clone(),
        config.uniqueness_debounce,
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Wires every usecase onto the shared repositories and nests the routers under `/api`
fn create_app<S, U, P, C, A>(
    sessions: S,
    users: U,
    providers: P,
    catalog: C,
    accounts: A,
    fallback_email_domain: String,
    uniqueness_debounce: Duration,
) -> Router
where
    S: SessionRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    P: ProviderRepository + Clone + 'static,
    C: CatalogRepository + Clone + 'static,
    A: AccountService + Clone + 'static,
{
    let session_router = create_session_router(
        SessionUsecase::new(sessions.clone()),
        PersonalStepUsecase::new(sessions.clone()),
        ProfessionalStepUsecase::new(sessions.clone(), catalog.clone()),
        ProfileStepUsecase::new(sessions.clone(), providers.clone(), uniqueness_debounce),
    );
    let registration_router = create_registration_router(
        FinalizeRegistrationUsecase::new(
            sessions.clone(),
            users.clone(),
            providers.clone(),
            accounts.clone(),
            fallback_email_domain,
        ),
        LinkServiceUsecase::new(sessions, catalog.clone(), providers),
    );
    let user_router = create_user_router(RegisterUserUsecase::new(users, accounts));
    let catalog_router = create_catalog_router(CatalogUsecase::new(catalog));

    Router::new()
        .route("/", get(|| async { "presta-api" }))
        .nest(
            "/api",
            session_router
                .merge(registration_router)
                .merge(user_router)
                .merge(catalog_router),
        )
        .layer(TraceLayer::new_for_http())
}
