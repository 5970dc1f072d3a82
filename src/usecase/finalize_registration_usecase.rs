use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::{
    domain::{
        error::{AccountError, DomainError, RepositoryError},
        formatters::{normalize_email, normalize_phone, normalize_social_handle, normalize_url},
        models::{
            draft::{CompleteDraft, FinalizationState},
            personal::PersonalData,
            records::{
                AccountId, AttachmentKind, NewAttachment, NewProfile, NewProvider, ProfileId,
                ProviderId,
            },
            session::{Page, SessionId},
        },
        repositories::{
            provider_repository::ProviderRepository, session_repository::SessionRepository,
            user_repository::UserRepository,
        },
        services::account_service::AccountService,
    },
    usecase::step_form::load_session,
};

#[derive(Debug, Clone, Serialize)]
pub struct FinalizeResult {
    pub account_id: Option<AccountId>,
    pub profile_id: ProfileId,
    pub provider_id: ProviderId,
    /// Best-effort writes that did not go through
    pub warnings: Vec<String>,
}

pub struct FinalizeRegistrationUsecase<S, U, P, A>
where
    S: SessionRepository,
    U: UserRepository,
    P: ProviderRepository,
    A: AccountService,
{
    session_repository: S,
    user_repository: U,
    provider_repository: P,
    account_service: A,
    fallback_email_domain: String,
}

impl<S, U, P, A> FinalizeRegistrationUsecase<S, U, P, A>
where
    S: SessionRepository,
    U: UserRepository,
    P: ProviderRepository,
    A: AccountService,
{
    pub fn new(
        session_repository: S,
        user_repository: U,
        provider_repository: P,
        account_service: A,
        fallback_email_domain: String,
    ) -> Self {
        Self {
            session_repository,
            user_repository,
            provider_repository,
            account_service,
            fallback_email_domain,
        }
    }

    pub async fn state(&self, id: SessionId) -> Result<FinalizationState, DomainError> {
        let session = load_session(&self.session_repository, id).await?;
        Ok(session.draft.state())
    }

    /// Submit the whole draft. Fragments are cleared only when every fatal
    /// step succeeded; otherwise they stay for another attempt.
    pub async fn finalize(&self, id: SessionId) -> Result<FinalizeResult, DomainError> {
        let mut session = load_session(&self.session_repository, id).await?;
        let draft = match session.draft.state() {
            FinalizationState::Ready(draft) => *draft,
            FinalizationState::Incomplete { missing } => {
                warn!(session_id = %id, ?missing, "finalize called on incomplete draft");
                return Err(DomainError::IncompleteDraft(missing));
            }
        };

        let result = self.submit(&draft).await.inspect_err(|e| {
            error!(session_id = %id, error = %e, "registration failed, draft kept");
        })?;

        session.draft.clear();
        session.selection = Default::default();
        session.set_provider_id(result.provider_id.clone());
        session.go_to(Page::Concluido);
        self.session_repository.save(session).await?;

        info!(
            session_id = %id,
            provider_id = %result.provider_id,
            warnings = result.warnings.len(),
            "provider registered"
        );
        Ok(result)
    }

    async fn submit(&self, draft: &CompleteDraft) -> Result<FinalizeResult, DomainError> {
        let account_id = self.create_account(&draft.personal).await?;
        let profile_id = self
            .insert_profile(&draft.personal, account_id.clone())
            .await?;

        let provider = build_provider(profile_id.clone(), draft);
        let provider_id = self.provider_repository.insert_provider(&provider).await?;

        let mut warnings = Vec::new();
        let selection = &draft.professional.selection;
        if !selection.category_ids.is_empty() {
            let result = self
                .provider_repository
                .link_categories(&provider_id, &selection.category_ids)
                .await;
            best_effort("category links", result, &mut warnings);
        }
        if !selection.service_ids.is_empty() {
            let result = self
                .provider_repository
                .link_services(&provider_id, &selection.service_ids)
                .await;
            best_effort("service links", result, &mut warnings);
        }

        let attachments = collect_attachments(draft);
        if !attachments.is_empty() {
            let result = self
                .provider_repository
                .insert_attachments(&provider_id, &attachments)
                .await;
            best_effort("attachments", result, &mut warnings);
        }

        Ok(FinalizeResult {
            account_id,
            profile_id,
            provider_id,
            warnings,
        })
    }

    /// `Ok(None)` when the email already has an account.
    async fn create_account(
        &self,
        personal: &PersonalData,
    ) -> Result<Option<AccountId>, DomainError> {
        let email = personal.email.as_str();
        match self.account_service.sign_up(email, &personal.password).await {
            Ok(account_id) => Ok(Some(account_id)),
            Err(AccountError::InvalidEmail(reason)) => {
                let fallback = format!(
                    "{}@{}",
                    personal.document.as_str(),
                    self.fallback_email_domain
                );
                warn!(%reason, "sign-up rejected email, retrying with document address");
                match self
                    .account_service
                    .sign_up(&fallback, &personal.password)
                    .await
                {
                    Ok(account_id) => Ok(Some(account_id)),
                    Err(e) => account_failure(e),
                }
            }
            Err(e) => account_failure(e),
        }
    }

    /// Insert the person row, adopting the stored one when the document is
    /// already registered.
    async fn insert_profile(
        &self,
        personal: &PersonalData,
        account_id: Option<AccountId>,
    ) -> Result<ProfileId, DomainError> {
        let profile = NewProfile {
            account_id,
            full_name: personal.full_name(),
            document: personal.document.clone(),
            birth_date: None,
            email: personal.email.as_str().to_lowercase(),
        };

        match self.user_repository.insert_user(&profile).await {
            Ok(profile_id) => Ok(profile_id),
            Err(RepositoryError::Conflict(detail)) => {
                debug!(%detail, "profile exists, looking it up by document");
                self.user_repository
                    .find_by_document(&personal.document)
                    .await?
                    .ok_or(DomainError::Repository(RepositoryError::Conflict(detail)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn account_failure(error: AccountError) -> Result<Option<AccountId>, DomainError> {
    match error {
        AccountError::AlreadyRegistered => {
            info!("account already registered, continuing");
            Ok(None)
        }
        AccountError::RateLimited => Err(DomainError::RateLimited),
        other => Err(DomainError::Account(other)),
    }
}

/// Duplicates count as done; anything else is logged and reported.
fn best_effort(what: &str, result: Result<(), RepositoryError>, warnings: &mut Vec<String>) {
    match result {
        Ok(()) => {}
        Err(RepositoryError::Conflict(_)) => debug!(what, "already stored"),
        Err(e) => {
            warn!(what, error = %e, "best-effort write skipped");
            warnings.push(format!("{what}: {e}"));
        }
    }
}

fn build_provider(profile_id: ProfileId, draft: &CompleteDraft) -> NewProvider {
    let personal = &draft.personal;
    let profile = &draft.profile;
    NewProvider {
        profile_id,
        first_name: personal.first_name.clone(),
        last_name: personal.last_name.clone(),
        document: personal.document.clone(),
        gender: personal.gender,
        email: personal.email.as_str().trim().to_lowercase(),
        experience: draft.professional.experience,
        nickname: profile.nickname.clone(),
        avatar_url: normalize_url(profile.avatar_url.as_deref()),
        bio: profile.bio.clone(),
        social_handle: normalize_social_handle(profile.social_handle.as_deref()),
        linkedin_url: normalize_url(profile.linkedin_url.as_deref()),
        availability: profile.availability.clone(),
        languages: profile.languages.clone(),
        phone: normalize_phone(profile.phone.as_deref()),
        professional_email: normalize_email(profile.professional_email.as_deref()),
    }
}

fn collect_attachments(draft: &CompleteDraft) -> Vec<NewAttachment> {
    let documents = [
        (AttachmentKind::Rg, draft.personal.id_document_url.as_deref()),
        (
            AttachmentKind::CnpjCtps,
            draft.professional.supporting_document_url.as_deref(),
        ),
    ];
    let gallery = draft
        .profile
        .gallery_urls
        .iter()
        .map(|url| (AttachmentKind::Galeria, url.as_deref()));

    documents
        .into_iter()
        .chain(gallery)
        .filter_map(|(kind, url)| normalize_url(url).map(|url| NewAttachment { kind, url }))
        .collect()
}
