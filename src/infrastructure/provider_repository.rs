use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    domain::{
        error::{RepositoryError, UniqueField},
        models::{
            catalog::{CategoryId, ServiceId},
            records::{NewAttachment, NewProvider, ProviderId},
        },
        repositories::provider_repository::ProviderRepository,
    },
    infrastructure::{
        schema::{Schema, SchemaSet},
        supabase_client::{TableGateway, row_id},
    },
};

#[derive(Clone)]
pub struct SupabaseProviderRepository<G: TableGateway> {
    gateway: G,
    schemas: SchemaSet,
}

impl<G: TableGateway> SupabaseProviderRepository<G> {
    pub fn new(gateway: G, schemas: SchemaSet) -> Self {
        Self { gateway, schemas }
    }
}

fn provider_row(s: &Schema, provider: &NewProvider) -> Value {
    let mut row = json!({
        "nome": provider.first_name,
        "sobrenome": provider.last_name,
        "genero": provider.gender.map(|g| g.as_str()),
        "email": provider.email,
        "tempo_experiencia": provider.experience.map(|e| e.label()),
        "nickname": provider.nickname,
        "foto_url": provider.avatar_url,
        "descricao": provider.bio,
        "rede_social": provider.social_handle,
        "linkedin": provider.linkedin_url,
        "disponibilidade": provider.availability.iter().map(|a| a.code()).collect::<Vec<_>>(),
        "idiomas": provider.languages.iter().map(|l| l.code()).collect::<Vec<_>>(),
        "telefone": provider.phone,
        "email_profissional": provider.professional_email,
    });
    row[s.provider_user_fk] = json!(provider.profile_id.0);
    row[s.user_document] = json!(provider.document.as_str());
    row
}

fn link_rows(provider_id: &ProviderId, column: &str, ids: &[String]) -> Vec<Value> {
    ids.iter()
        .map(|id| json!({ "prestador_id": provider_id.0, column: id }))
        .collect()
}

fn unique_column(field: UniqueField) -> &'static str {
    match field {
        UniqueField::Nickname => "nickname",
        UniqueField::ProfessionalEmail => "email_profissional",
        UniqueField::Phone => "telefone",
    }
}

#[async_trait]
impl<G: TableGateway> ProviderRepository for SupabaseProviderRepository<G> {
    async fn insert_provider(&self, provider: &NewProvider) -> Result<ProviderId, RepositoryError> {
        let gateway = &self.gateway;
        self.schemas
            .run("insert provider", |s| async move {
                let rows = gateway
                    .insert(s.providers, vec![provider_row(s, provider)])
                    .await?;
                rows.first()
                    .and_then(row_id)
                    .map(ProviderId)
                    .ok_or_else(|| RepositoryError::DatabaseError("insert returned no id".into()))
            })
            .await
    }

    async fn find_by_unique_field(
        &self,
        field: UniqueField,
        value: &str,
    ) -> Result<Option<ProviderId>, RepositoryError> {
        let rows = self
            .gateway
            .select_by_field(
                self.schemas.primary().providers,
                "id",
                &[(unique_column(field), value)],
            )
            .await?;
        Ok(rows.first().and_then(row_id).map(ProviderId))
    }

    async fn link_categories(
        &self,
        provider_id: &ProviderId,
        category_ids: &[CategoryId],
    ) -> Result<(), RepositoryError> {
        if category_ids.is_empty() {
            return Ok(());
        }
        let gateway = &self.gateway;
        self.schemas
            .run("link categories", |s| async move {
                gateway
                    .insert(
                        s.provider_categories,
                        link_rows(provider_id, "area_id", category_ids),
                    )
                    .await
                    .map(|_| ())
            })
            .await
    }

    async fn link_services(
        &self,
        provider_id: &ProviderId,
        service_ids: &[ServiceId],
    ) -> Result<(), RepositoryError> {
        if service_ids.is_empty() {
            return Ok(());
        }
        let gateway = &self.gateway;
        self.schemas
            .run("link services", |s| async move {
                gateway
                    .insert(
                        s.provider_services,
                        link_rows(provider_id, "servico_id", service_ids),
                    )
                    .await
                    .map(|_| ())
            })
            .await
    }

    async fn has_service_link(
        &self,
        provider_id: &ProviderId,
        service_id: &ServiceId,
    ) -> Result<bool, RepositoryError> {
        let gateway = &self.gateway;
        let found = self
            .schemas
            .run("find service link", |s| async move {
                gateway
                    .select_by_field(
                        s.provider_services,
                        "id",
                        &[
                            ("prestador_id", provider_id.0.as_str()),
                            ("servico_id", service_id.as_str()),
                        ],
                    )
                    .await
            })
            .await;

        match found {
            Ok(rows) => Ok(!rows.is_empty()),
            Err(RepositoryError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn insert_attachments(
        &self,
        provider_id: &ProviderId,
        attachments: &[NewAttachment],
    ) -> Result<(), RepositoryError> {
        if attachments.is_empty() {
            return Ok(());
        }
        let rows: Vec<Value> = attachments
            .iter()
            .map(|a| {
                json!({
                    "prestador_id": provider_id.0,
                    "tipo": a.kind.as_str(),
                    "url": a.url,
                })
            })
            .collect();
        let gateway = &self.gateway;
        let rows = &rows;
        self.schemas
            .run("insert attachments", |s| async move {
                gateway.insert(s.attachments, rows.clone()).await.map(|_| ())
            })
            .await
    }
}
