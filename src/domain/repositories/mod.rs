pub mod catalog_repository;
pub mod provider_repository;
pub mod session_repository;
pub mod user_repository;
