//! Hand-written doubles for the repository and account traits.
//!
//! Each mock records what it was asked to write so tests can assert on the
//! exact remote calls a workflow made.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::domain::{
    error::{AccountError, RepositoryError, UniqueField},
    models::{
        catalog::{Category, CategoryId, Service, ServiceId},
        personal::{Document, Password},
        records::{AccountId, NewAttachment, NewProfile, NewProvider, ProfileId, ProviderId},
    },
    repositories::{
        catalog_repository::CatalogRepository, provider_repository::ProviderRepository,
        user_repository::UserRepository,
    },
    services::account_service::AccountService,
};

pub const ACCOUNT_ID: &str = "00000000-0000-0000-0000-0000000000aa";
pub const PROFILE_ID: &str = "profile-1";
pub const EXISTING_PROFILE_ID: &str = "profile-existing";
pub const PROVIDER_ID: &str = "provider-1";

#[derive(Clone, Default)]
pub struct MockAccountService {
    /// Scripted replies, consumed in order; `Ok(ACCOUNT_ID)` once exhausted
    pub replies: Arc<Mutex<VecDeque<Result<AccountId, AccountError>>>>,
    pub emails: Arc<Mutex<Vec<String>>>,
}

impl MockAccountService {
    pub fn replying(replies: Vec<Result<AccountId, AccountError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            emails: Arc::default(),
        }
    }

    pub fn emails(&self) -> Vec<String> {
        self.emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountService for MockAccountService {
    async fn sign_up(&self, email: &str, _password: &Password) -> Result<AccountId, AccountError> {
        self.emails.lock().unwrap().push(email.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AccountId(ACCOUNT_ID.to_string())))
    }
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    pub insert_error: Option<RepositoryError>,
    /// Document digits already stored remotely
    pub existing_documents: Vec<String>,
    pub inserted: Arc<Mutex<Vec<NewProfile>>>,
}

impl MockUserRepository {
    pub fn failing(error: RepositoryError) -> Self {
        Self {
            insert_error: Some(error),
            ..Self::default()
        }
    }

    pub fn inserted(&self) -> Vec<NewProfile> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert_user(&self, profile: &NewProfile) -> Result<ProfileId, RepositoryError> {
        if let Some(error) = &self.insert_error {
            return Err(error.clone());
        }
        self.inserted.lock().unwrap().push(profile.clone());
        Ok(ProfileId(PROFILE_ID.to_string()))
    }

    async fn find_by_document(
        &self,
        document: &Document,
    ) -> Result<Option<ProfileId>, RepositoryError> {
        if self
            .existing_documents
            .iter()
            .any(|d| d == document.as_str())
        {
            Ok(Some(ProfileId(EXISTING_PROFILE_ID.to_string())))
        } else {
            Ok(None)
        }
    }
}

#[derive(Clone, Default)]
pub struct MockProviderRepository {
    pub insert_error: Option<RepositoryError>,
    pub link_error: Option<RepositoryError>,
    pub attachment_error: Option<RepositoryError>,
    /// Error returned by every uniqueness lookup, if any
    pub lookup_error: Option<RepositoryError>,
    pub taken: HashMap<UniqueField, String>,
    pub providers: Arc<Mutex<Vec<NewProvider>>>,
    pub category_links: Arc<Mutex<Vec<(ProviderId, CategoryId)>>>,
    pub service_links: Arc<Mutex<Vec<(ProviderId, ServiceId)>>>,
    pub attachments: Arc<Mutex<Vec<(ProviderId, NewAttachment)>>>,
    pub lookups: Arc<Mutex<Vec<(UniqueField, String)>>>,
}

impl MockProviderRepository {
    pub fn providers(&self) -> Vec<NewProvider> {
        self.providers.lock().unwrap().clone()
    }

    pub fn category_links(&self) -> Vec<(ProviderId, CategoryId)> {
        self.category_links.lock().unwrap().clone()
    }

    pub fn service_links(&self) -> Vec<(ProviderId, ServiceId)> {
        self.service_links.lock().unwrap().clone()
    }

    pub fn attachments(&self) -> Vec<(ProviderId, NewAttachment)> {
        self.attachments.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<(UniqueField, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderRepository for MockProviderRepository {
    async fn insert_provider(&self, provider: &NewProvider) -> Result<ProviderId, RepositoryError> {
        if let Some(error) = &self.insert_error {
            return Err(error.clone());
        }
        self.providers.lock().unwrap().push(provider.clone());
        Ok(ProviderId(PROVIDER_ID.to_string()))
    }

    async fn find_by_unique_field(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<ProviderId>, RepositoryError> {
        self.lookups
            .lock()
            .unwrap()
            .push((field, value.to_string()));
        if let Some(error) = &self.lookup_error {
            return Err(error.clone());
        }
        match self.taken.get(&field) {
            Some(taken) if taken == value => Ok(Some(ProviderId("someone-else".to_string()))),
            _ => Ok(None),
        }
    }

    async fn link_categories(
        &self,
        provider_id: &ProviderId,
        category_ids: &[CategoryId],
    ) -> Result<(), RepositoryError> {
        if let Some(error) = &self.link_error {
            return Err(error.clone());
        }
        let mut links = self.category_links.lock().unwrap();
        links.extend(category_ids.iter().map(|id| (provider_id.clone(), id.clone())));
        Ok(())
    }

    async fn link_services(
        &self,
        provider_id: &ProviderId,
        service_ids: &[ServiceId],
    ) -> Result<(), RepositoryError> {
        if let Some(error) = &self.link_error {
            return Err(error.clone());
        }
        let mut links = self.service_links.lock().unwrap();
        links.extend(service_ids.iter().map(|id| (provider_id.clone(), id.clone())));
        Ok(())
    }

    async fn has_service_link(
        &self,
        provider_id: &ProviderId,
        service_id: &ServiceId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .service_links
            .lock()
            .unwrap()
            .iter()
            .any(|(p, s)| p == provider_id && s == service_id))
    }

    async fn insert_attachments(
        &self,
        provider_id: &ProviderId,
        attachments: &[NewAttachment],
    ) -> Result<(), RepositoryError> {
        if let Some(error) = &self.attachment_error {
            return Err(error.clone());
        }
        let mut stored = self.attachments.lock().unwrap();
        stored.extend(attachments.iter().map(|a| (provider_id.clone(), a.clone())));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockCatalogRepository {
    pub categories: Vec<Category>,
    pub services: Arc<Mutex<Vec<Service>>>,
    pub error: Option<RepositoryError>,
}

impl MockCatalogRepository {
    /// Two areas (`A`, `B`), one service in each and one without an area
    pub fn sample() -> Self {
        Self {
            categories: vec![
                Category {
                    id: "A".into(),
                    nome: "Reformas".into(),
                },
                Category {
                    id: "B".into(),
                    nome: "Limpeza".into(),
                },
            ],
            services: Arc::new(Mutex::new(vec![
                Service {
                    id: "S1".into(),
                    nome: "Pedreiro".into(),
                    area_id: Some("A".into()),
                },
                Service {
                    id: "S2".into(),
                    nome: "Diarista".into(),
                    area_id: Some("B".into()),
                },
                Service {
                    id: "S3".into(),
                    nome: "Vidraceiro".into(),
                    area_id: None,
                },
            ])),
            error: None,
        }
    }

    pub fn services(&self) -> Vec<Service> {
        self.services.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.categories.clone()),
        }
    }

    async fn list_services(&self) -> Result<Vec<Service>, RepositoryError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.services()),
        }
    }

    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, RepositoryError> {
        Ok(self.services().into_iter().find(|s| s.nome == name))
    }

    async fn create_service(&self, name: &str) -> Result<Service, RepositoryError> {
        let mut services = self.services.lock().unwrap();
        let service = Service {
            id: format!("S{}", services.len() + 1),
            nome: name.to_string(),
            area_id: None,
        };
        services.push(service.clone());
        Ok(service)
    }
}
