use async_trait::async_trait;
use serde_json::json;

use crate::{
    domain::{
        error::RepositoryError,
        models::{
            personal::Document,
            records::{NewProfile, ProfileId},
        },
        repositories::user_repository::UserRepository,
    },
    infrastructure::{
        schema::SchemaSet,
        supabase_client::{TableGateway, row_id},
    },
};

#[derive(Clone)]
pub struct SupabaseUserRepository<G: TableGateway> {
    gateway: G,
    schemas: SchemaSet,
}

impl<G: TableGateway> SupabaseUserRepository<G> {
    pub fn new(gateway: G, schemas: SchemaSet) -> Self {
        Self { gateway, schemas }
    }
}

#[async_trait]
impl<G: TableGateway> UserRepository for SupabaseUserRepository<G> {
    async fn insert_user(&self, profile: &NewProfile) -> Result<ProfileId, RepositoryError> {
        let gateway = &self.gateway;
        self.schemas
            .run("insert user", |s| async move {
                let mut row = json!({
                    "nome_completo": profile.full_name,
                    "data_nascimento": profile.birth_date,
                    "email": profile.email,
                });
                row[s.user_document] = json!(profile.document.as_str());
                if let (Some(column), Some(account)) = (s.user_account, &profile.account_id) {
                    row[column] = json!(account.0);
                }

                let rows = gateway.insert(s.users, vec![row]).await?;
                rows.first()
                    .and_then(row_id)
                    .map(ProfileId)
                    .ok_or_else(|| RepositoryError::DatabaseError("insert returned no id".into()))
            })
            .await
    }

    async fn find_by_document(
        &self,
        document: &Document,
    ) -> Result<Option<ProfileId>, RepositoryError> {
        let gateway = &self.gateway;
        let found = self
            .schemas
            .run("find user by document", |s| async move {
                gateway
                    .select_by_field(s.users, "id", &[(s.user_document, document.as_str())])
                    .await
            })
            .await;

        match found {
            Ok(rows) => Ok(rows.first().and_then(row_id).map(ProfileId)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
