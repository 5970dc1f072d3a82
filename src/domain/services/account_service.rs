use async_trait::async_trait;

use crate::domain::{
    error::AccountError,
    models::{personal::Password, records::AccountId},
};

/// Delegated sign-up against the hosted auth service
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn sign_up(&self, email: &str, password: &Password) -> Result<AccountId, AccountError>;
}
