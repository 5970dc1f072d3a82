pub mod catalog_repository;
pub mod provider_repository;
pub mod schema;
pub mod session_store;
pub mod supabase_auth;
pub mod supabase_client;
pub mod user_repository;

#[cfg(test)]
pub mod fake_gateway;
