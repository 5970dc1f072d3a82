pub mod catalog_handler;
pub mod registration_handler;
pub mod session_handler;
pub mod user_handler;
