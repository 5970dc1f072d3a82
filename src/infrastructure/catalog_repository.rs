use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    domain::{
        error::RepositoryError,
        models::catalog::{Category, Service},
        repositories::catalog_repository::CatalogRepository,
    },
    infrastructure::{
        schema::{Schema, SchemaSet},
        supabase_client::{TableGateway, row_id},
    },
};

#[derive(Clone)]
pub struct SupabaseCatalogRepository<G: TableGateway> {
    gateway: G,
    schemas: SchemaSet,
}

impl<G: TableGateway> SupabaseCatalogRepository<G> {
    pub fn new(gateway: G, schemas: SchemaSet) -> Self {
        Self { gateway, schemas }
    }
}

fn service_columns(s: &Schema) -> &'static str {
    if s.services_have_area {
        "id,nome,area_id"
    } else {
        "id,nome"
    }
}

fn name_of(row: &Value) -> Option<String> {
    row.get("nome").and_then(Value::as_str).map(str::to_string)
}

fn to_category(row: &Value) -> Option<Category> {
    Some(Category {
        id: row_id(row)?,
        nome: name_of(row)?,
    })
}

fn to_service(row: &Value) -> Option<Service> {
    let area_id = match row.get("area_id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    };
    Some(Service {
        id: row_id(row)?,
        nome: name_of(row)?,
        area_id,
    })
}

#[async_trait]
impl<G: TableGateway> CatalogRepository for SupabaseCatalogRepository<G> {
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let gateway = &self.gateway;
        let rows = self
            .schemas
            .run("list categories", |s| async move {
                gateway.select_all(s.categories, "id,nome", "nome").await
            })
            .await?;
        Ok(rows.iter().filter_map(to_category).collect())
    }

    async fn list_services(&self) -> Result<Vec<Service>, RepositoryError> {
        let gateway = &self.gateway;
        let rows = self
            .schemas
            .run("list services", |s| async move {
                gateway.select_all(s.services, service_columns(s), "nome").await
            })
            .await?;
        Ok(rows.iter().filter_map(to_service).collect())
    }

    async fn find_service_by_name(&self, name: &str) -> Result<Option<Service>, RepositoryError> {
        let gateway = &self.gateway;
        let found = self
            .schemas
            .run("find service", |s| async move {
                gateway
                    .select_by_field(s.services, service_columns(s), &[("nome", name)])
                    .await
            })
            .await;

        match found {
            Ok(rows) => Ok(rows.first().and_then(to_service)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_service(&self, name: &str) -> Result<Service, RepositoryError> {
        let gateway = &self.gateway;
        let rows = self
            .schemas
            .run("create service", |s| async move {
                gateway.insert(s.services, vec![json!({ "nome": name })]).await
            })
            .await?;
        rows.first()
            .and_then(to_service)
            .ok_or_else(|| RepositoryError::DatabaseError("insert returned no service".into()))
    }
}
