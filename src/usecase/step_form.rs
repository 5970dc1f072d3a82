use async_trait::async_trait;
use tracing::info;

use crate::domain::{
    error::DomainError,
    models::session::{Page, Session, SessionId},
    repositories::session_repository::SessionRepository,
};

/// One page of the provider registration.
///
/// Advancing runs `collect` (local checks, no I/O), then `validate` (remote
/// checks), then `persist`, and only then moves the shell to `NEXT`. A failure
/// at any stage leaves the session untouched.
#[async_trait]
pub trait StepForm: Send + Sync {
    type Input: Send + 'static;
    type Fragment: Send + Sync + 'static;

    const NEXT: Page;

    fn collect(&self, input: Self::Input, session: &Session)
    -> Result<Self::Fragment, DomainError>;

    async fn validate(
        &self,
        _session: &Session,
        _fragment: &Self::Fragment,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    fn persist(&self, fragment: Self::Fragment, session: &mut Session);
}

pub async fn load_session<S: SessionRepository>(
    sessions: &S,
    id: SessionId,
) -> Result<Session, DomainError> {
    sessions
        .find(id)
        .await?
        .ok_or(DomainError::SessionNotFound)
}

pub async fn advance<S, F>(
    sessions: &S,
    form: &F,
    id: SessionId,
    input: F::Input,
) -> Result<Session, DomainError>
where
    S: SessionRepository,
    F: StepForm,
{
    let mut session = load_session(sessions, id).await?;

    let fragment = form.collect(input, &session)?;
    form.validate(&session, &fragment).await?;
    form.persist(fragment, &mut session);
    session.go_to(F::NEXT);

    sessions.save(session.clone()).await?;
    info!(session_id = %id, next = ?F::NEXT, "registration step saved");
    Ok(session)
}
