pub mod error;
pub mod formatters;
pub mod models;
pub mod repositories;
pub mod services;
