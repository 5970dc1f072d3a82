use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    domain::{
        error::{DomainError, RepositoryError, UniqueField},
        formatters::{self, non_blank},
        models::{
            profile::{Availability, Language, ProfileData},
            session::{Page, Session, SessionId},
        },
        repositories::{
            provider_repository::ProviderRepository, session_repository::SessionRepository,
        },
    },
    usecase::{
        debounce::Debouncer,
        step_form::{self, StepForm, load_session},
    },
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    pub nickname: Option<String>,
    pub foto_url: Option<String>,
    pub descricao: Option<String>,
    pub galeria_1: Option<String>,
    pub galeria_2: Option<String>,
    pub rede_social: Option<String>,
    pub linkedin: Option<String>,
    #[serde(default)]
    pub disponibilidade: Vec<String>,
    #[serde(default)]
    pub idiomas: Vec<String>,
    pub telefone: Option<String>,
    pub email_profissional: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    /// A newer check for the same field arrived during the debounce window
    Superseded,
}

pub struct ProfileStepUsecase<S: SessionRepository, P: ProviderRepository> {
    session_repository: S,
    provider_repository: P,
    debouncer: Debouncer,
}

impl<S: SessionRepository, P: ProviderRepository> ProfileStepUsecase<S, P> {
    pub fn new(session_repository: S, provider_repository: P, debounce_window: Duration) -> Self {
        Self {
            session_repository,
            provider_repository,
            debouncer: Debouncer::new(debounce_window),
        }
    }

    pub async fn advance(&self, id: SessionId, input: ProfileInput) -> Result<Session, DomainError> {
        step_form::advance(&self.session_repository, self, id, input).await
    }

    /// Live uniqueness check fired while the user types.
    pub async fn check_availability(
        &self,
        id: SessionId,
        field: UniqueField,
        value: &str,
    ) -> Result<AvailabilityStatus, DomainError> {
        load_session(&self.session_repository, id).await?;

        let Some(value) = lookup_value(field, value)? else {
            return Ok(AvailabilityStatus::Available);
        };

        if !self.debouncer.settle(&format!("{id}:{field}")).await {
            debug!(session_id = %id, %field, "availability check superseded");
            return Ok(AvailabilityStatus::Superseded);
        }

        match self.ensure_unique(field, &value).await {
            Ok(()) => Ok(AvailabilityStatus::Available),
            Err(DomainError::Unavailable(_)) => Ok(AvailabilityStatus::Taken),
            Err(e) => Err(e),
        }
    }

    /// Passes only when the lookup positively reports no row.
    async fn ensure_unique(&self, field: UniqueField, value: &str) -> Result<(), DomainError> {
        match self
            .provider_repository
            .find_by_unique_field(field, value)
            .await
        {
            Ok(None) | Err(RepositoryError::NotFound) => Ok(()),
            Ok(Some(_)) => Err(DomainError::Unavailable(field)),
            Err(e) => {
                warn!(%field, error = %e, "uniqueness lookup failed");
                Err(DomainError::AvailabilityCheckFailed(field))
            }
        }
    }
}

/// Normalize a value the way it is stored, rejecting malformed input.
/// Blank input has nothing to check.
fn lookup_value(field: UniqueField, raw: &str) -> Result<Option<String>, DomainError> {
    let Some(value) = non_blank(Some(raw)) else {
        return Ok(None);
    };
    match field {
        UniqueField::Nickname => {
            if value.chars().any(char::is_whitespace) {
                return Err(DomainError::NicknameHasWhitespace);
            }
            Ok(Some(value))
        }
        UniqueField::ProfessionalEmail => {
            if !formatters::is_valid_email(&value) {
                return Err(DomainError::InvalidEmail);
            }
            Ok(formatters::normalize_email(Some(&value)))
        }
        UniqueField::Phone => {
            if !formatters::is_valid_phone(&value) {
                return Err(DomainError::InvalidPhone);
            }
            Ok(formatters::normalize_phone(Some(&value)))
        }
    }
}

fn parse_unique<T, F>(codes: &[String], parse: F) -> Result<Vec<T>, DomainError>
where
    T: Eq + std::hash::Hash + Copy,
    F: Fn(&str) -> Result<T, DomainError>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(codes.len());
    for code in codes {
        let value = parse(code)?;
        if seen.insert(value) {
            out.push(value);
        }
    }
    Ok(out)
}

#[async_trait]
impl<S: SessionRepository, P: ProviderRepository> StepForm for ProfileStepUsecase<S, P> {
    type Input = ProfileInput;
    type Fragment = ProfileData;

    const NEXT: Page = Page::Concluido;

    fn collect(&self, input: ProfileInput, _session: &Session) -> Result<ProfileData, DomainError> {
        let nickname = lookup_value(UniqueField::Nickname, input.nickname.as_deref().unwrap_or(""))?;
        let professional_email = lookup_value(
            UniqueField::ProfessionalEmail,
            input.email_profissional.as_deref().unwrap_or(""),
        )?;
        let phone = lookup_value(UniqueField::Phone, input.telefone.as_deref().unwrap_or(""))?;

        Ok(ProfileData {
            nickname,
            avatar_url: non_blank(input.foto_url.as_deref()),
            bio: non_blank(input.descricao.as_deref()),
            gallery_urls: [
                non_blank(input.galeria_1.as_deref()),
                non_blank(input.galeria_2.as_deref()),
            ],
            social_handle: non_blank(input.rede_social.as_deref()),
            linkedin_url: non_blank(input.linkedin.as_deref()),
            availability: parse_unique(&input.disponibilidade, Availability::parse)?,
            languages: parse_unique(&input.idiomas, Language::parse)?,
            phone,
            professional_email,
        })
    }

    async fn validate(&self, _session: &Session, fragment: &ProfileData) -> Result<(), DomainError> {
        let checks = [
            (UniqueField::Nickname, &fragment.nickname),
            (UniqueField::ProfessionalEmail, &fragment.professional_email),
            (UniqueField::Phone, &fragment.phone),
        ];
        for (field, value) in checks {
            if let Some(value) = value {
                self.ensure_unique(field, value).await?;
            }
        }
        Ok(())
    }

    fn persist(&self, fragment: ProfileData, session: &mut Session) {
        session.draft.set_profile(fragment);
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use super::*;
    use crate::{
        domain::models::draft::Fragment,
        infrastructure::session_store::InMemorySessionRepository,
        usecase::mocks::MockProviderRepository,
    };

    async fn setup(
        providers: MockProviderRepository,
    ) -> (
        InMemorySessionRepository,
        SessionId,
        ProfileStepUsecase<InMemorySessionRepository, MockProviderRepository>,
    ) {
        let store = InMemorySessionRepository::new();
        let session = store.create().await.unwrap();
        let usecase = ProfileStepUsecase::new(store.clone(), providers, Duration::ZERO);
        (store, session.id(), usecase)
    }

    fn input() -> ProfileInput {
        ProfileInput {
            nickname: Some("joaosilva".into()),
            foto_url: Some("exemplo.com/foto.jpg".into()),
            descricao: Some("Eletricista com 10 anos de experiência".into()),
            galeria_1: Some("https://exemplo.com/obra1.jpg".into()),
            galeria_2: None,
            rede_social: Some("joaoservicos".into()),
            linkedin: None,
            disponibilidade: vec!["seg-sex-08-18".into(), "plantao-24h".into(), "seg-sex-08-18".into()],
            idiomas: vec!["pt".into()],
            telefone: Some("(11) 98765-4321".into()),
            email_profissional: Some("Contato@JoaoServicos.com".into()),
        }
    }

    #[tokio::test]
    async fn test_advance_checks_uniqueness_and_saves() {
        let providers = MockProviderRepository::default();
        let (_, id, usecase) = setup(providers.clone()).await;

        let session = usecase.advance(id, input()).await.unwrap();

        assert_eq!(session.current_page(), Page::Concluido);
        assert_eq!(session.draft.present(), vec![Fragment::Profile]);
        let profile = session.draft.profile().unwrap();
        assert_eq!(profile.phone.as_deref(), Some("11987654321"));
        assert_eq!(
            profile.availability,
            vec![Availability::WeekdaysEightToSix, Availability::OnCall24h]
        );
        assert_eq!(
            providers.lookups(),
            vec![
                (UniqueField::Nickname, "joaosilva".to_string()),
                (UniqueField::ProfessionalEmail, "contato@joaoservicos.com".to_string()),
                (UniqueField::Phone, "11987654321".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_taken_nickname_blocks_advance() {
        let providers = MockProviderRepository {
            taken: HashMap::from([(UniqueField::Nickname, "joaosilva".to_string())]),
            ..MockProviderRepository::default()
        };
        let (store, id, usecase) = setup(providers).await;

        let result = usecase.advance(id, input()).await;

        assert!(matches!(
            result,
            Err(DomainError::Unavailable(UniqueField::Nickname))
        ));
        assert!(store.find(id).await.unwrap().unwrap().draft.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_error_fails_closed() {
        let providers = MockProviderRepository {
            lookup_error: Some(RepositoryError::DatabaseError("timeout".into())),
            ..MockProviderRepository::default()
        };
        let (_, id, usecase) = setup(providers).await;

        let result = usecase.advance(id, input()).await;
        assert!(matches!(
            result,
            Err(DomainError::AvailabilityCheckFailed(UniqueField::Nickname))
        ));
    }

    #[tokio::test]
    async fn test_not_found_error_passes() {
        let providers = MockProviderRepository {
            lookup_error: Some(RepositoryError::NotFound),
            ..MockProviderRepository::default()
        };
        let (_, id, usecase) = setup(providers).await;
        assert!(usecase.advance(id, input()).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_profile_skips_lookups() {
        let providers = MockProviderRepository::default();
        let (_, id, usecase) = setup(providers.clone()).await;

        let session = usecase.advance(id, ProfileInput::default()).await.unwrap();

        assert_eq!(session.draft.profile(), Some(&ProfileData::default()));
        assert!(providers.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_local_format_errors() {
        let (_, id, usecase) = setup(MockProviderRepository::default()).await;
        let cases = [
            (
                ProfileInput {
                    nickname: Some("joao silva".into()),
                    ..input()
                },
                "nickname",
            ),
            (
                ProfileInput {
                    email_profissional: Some("contato@".into()),
                    ..input()
                },
                "email",
            ),
            (
                ProfileInput {
                    telefone: Some("1234".into()),
                    ..input()
                },
                "phone",
            ),
            (
                ProfileInput {
                    idiomas: vec!["klingon".into()],
                    ..input()
                },
                "language",
            ),
        ];
        for (input, label) in cases {
            assert!(usecase.advance(id, input).await.is_err(), "{label}");
        }
    }

    #[tokio::test]
    async fn test_check_availability() {
        let providers = MockProviderRepository {
            taken: HashMap::from([(UniqueField::Phone, "11987654321".to_string())]),
            ..MockProviderRepository::default()
        };
        let (_, id, usecase) = setup(providers).await;

        let taken = usecase
            .check_availability(id, UniqueField::Phone, "(11) 98765-4321")
            .await
            .unwrap();
        assert_eq!(taken, AvailabilityStatus::Taken);

        let free = usecase
            .check_availability(id, UniqueField::Nickname, "maria")
            .await
            .unwrap();
        assert_eq!(free, AvailabilityStatus::Available);

        let blank = usecase
            .check_availability(id, UniqueField::Nickname, "  ")
            .await
            .unwrap();
        assert_eq!(blank, AvailabilityStatus::Available);
    }

    #[tokio::test]
    async fn test_check_availability_superseded() {
        let store = InMemorySessionRepository::new();
        let session = store.create().await.unwrap();
        let usecase = Arc::new(ProfileStepUsecase::new(
            store,
            MockProviderRepository::default(),
            Duration::from_millis(50),
        ));
        let id = session.id();

        let first = {
            let usecase = usecase.clone();
            tokio::spawn(async move {
                usecase
                    .check_availability(id, UniqueField::Nickname, "joa")
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = usecase
            .check_availability(id, UniqueField::Nickname, "joao")
            .await
            .unwrap();

        assert_eq!(first.await.unwrap().unwrap(), AvailabilityStatus::Superseded);
        assert_eq!(second, AvailabilityStatus::Available);
    }
}
