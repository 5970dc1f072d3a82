use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        formatters::{
            format_cnpj, format_cpf, format_date, format_document, format_phone,
            strip_non_digits, unformat_cnpj, unformat_cpf, unformat_document, unformat_phone,
        },
        models::catalog::{Category, CategoryId, Service},
        repositories::catalog_repository::CatalogRepository,
    },
    presentation::error::ApiError,
    usecase::catalog_usecase::CatalogUsecase,
};

// Request

#[derive(Serialize, Deserialize)]
pub struct ServicesQuery {
    /// Comma separated category ids
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Cpf,
    Cnpj,
    Document,
    Date,
    Phone,
}

#[derive(Serialize, Deserialize)]
pub struct FormatRequest {
    pub kind: FormatKind,
    #[serde(default)]
    pub value: String,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct FormatResponse {
    pub formatted: String,
    pub digits: String,
}

impl FormatResponse {
    fn of(kind: FormatKind, value: &str) -> Self {
        let (formatted, digits) = match kind {
            FormatKind::Cpf => (format_cpf(value), unformat_cpf(value)),
            FormatKind::Cnpj => (format_cnpj(value), unformat_cnpj(value)),
            FormatKind::Document => (format_document(value), unformat_document(value)),
            FormatKind::Phone => (format_phone(value), unformat_phone(value)),
            FormatKind::Date => {
                let formatted = format_date(value);
                let digits = strip_non_digits(&formatted);
                (formatted, digits)
            }
        };
        Self { formatted, digits }
    }
}

/* Router Function and Handler Function */

/// Catalog listing and the stateless input masks
pub fn create_catalog_router<C: CatalogRepository + 'static>(
    catalog_service: CatalogUsecase<C>,
) -> Router {
    let state = CatalogState {
        catalog_service: Arc::new(catalog_service),
    };

    Router::new()
        .route("/categories", get(categories::<C>))
        .route("/services", get(services::<C>))
        .route("/format", post(format))
        .with_state(state)
}

pub struct CatalogState<C: CatalogRepository> {
    pub catalog_service: Arc<CatalogUsecase<C>>,
}

impl<C: CatalogRepository> Clone for CatalogState<C> {
    fn clone(&self) -> Self {
        Self {
            catalog_service: Arc::clone(&self.catalog_service),
        }
    }
}

// handler function

async fn categories<C: CatalogRepository>(
    State(state): State<CatalogState<C>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.catalog_service.categories().await?))
}

async fn services<C: CatalogRepository>(
    State(state): State<CatalogState<C>>,
    Query(query): Query<ServicesQuery>,
) -> Result<Json<Vec<Service>>, ApiError> {
    let selected: Vec<CategoryId> = query
        .category
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    Ok(Json(state.catalog_service.services(&selected).await?))
}

async fn format(Json(payload): Json<FormatRequest>) -> Json<FormatResponse> {
    Json(FormatResponse::of(payload.kind, &payload.value))
}
