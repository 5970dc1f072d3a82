use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    domain::{
        error::{AccountError, DomainError, RepositoryError},
        formatters::format_date_to_db,
        models::{
            personal::{BasicUserData, Document, Email, Password},
            records::{AccountId, NewProfile, ProfileId},
        },
        repositories::user_repository::UserRepository,
        services::account_service::AccountService,
    },
    usecase::personal_step_usecase::missing_fields,
};

/// Customer sign-up form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicUserInput {
    #[serde(default)]
    pub nome_completo: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub data_nascimento: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUser {
    pub account_id: AccountId,
    pub profile_id: ProfileId,
}

pub struct RegisterUserUsecase<U: UserRepository, A: AccountService> {
    user_repository: U,
    account_service: A,
}

impl<U: UserRepository, A: AccountService> RegisterUserUsecase<U, A> {
    pub fn new(user_repository: U, account_service: A) -> Self {
        Self {
            user_repository,
            account_service,
        }
    }

    pub async fn create_user(&self, input: BasicUserInput) -> Result<RegisteredUser, DomainError> {
        let user = validate(input)?;

        let account_id = self
            .account_service
            .sign_up(user.email.as_str(), &user.password)
            .await
            .map_err(|e| match e {
                AccountError::RateLimited => DomainError::RateLimited,
                other => DomainError::Account(other),
            })?;
        info!(account_id = %account_id.0, "account created");

        let profile = NewProfile {
            account_id: Some(account_id.clone()),
            full_name: user.full_name,
            document: user.cpf,
            birth_date: Some(user.birth_date),
            email: user.email.as_str().to_string(),
        };
        let profile_id = self
            .user_repository
            .insert_user(&profile)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to store user row");
                match e {
                    RepositoryError::Conflict(_) => DomainError::DuplicateRegistration,
                    RepositoryError::SchemaMismatch(_) => DomainError::StorageMisconfigured,
                    RepositoryError::PermissionDenied(_) => DomainError::StoragePermissionDenied,
                    other => DomainError::Repository(other),
                }
            })?;

        Ok(RegisteredUser {
            account_id,
            profile_id,
        })
    }
}

fn validate(input: BasicUserInput) -> Result<BasicUserData, DomainError> {
    let missing = missing_fields(&[
        ("nome_completo", input.nome_completo.as_str()),
        ("cpf", input.cpf.as_str()),
        ("data_nascimento", input.data_nascimento.as_str()),
        ("email", input.email.as_str()),
        ("senha", input.senha.as_str()),
    ]);
    if !missing.is_empty() {
        return Err(DomainError::MissingFields(missing));
    }

    let cpf = Document::cpf(&input.cpf)?;
    let email = Email::new(&input.email)?;
    let password = Password::new(input.senha)?;

    Ok(BasicUserData {
        full_name: input.nome_completo.trim().to_string(),
        cpf,
        birth_date: format_date_to_db(&input.data_nascimento),
        email,
        password,
    })
}
