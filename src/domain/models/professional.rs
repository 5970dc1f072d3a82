use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::catalog::{Catalog, CategoryId, ServiceId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBucket {
    #[serde(rename = "Menos de 1 ano")]
    LessThanOne,
    #[serde(rename = "1 a 3 anos")]
    OneToThree,
    #[serde(rename = "3 a 5 anos")]
    ThreeToFive,
    #[serde(rename = "5 a 10 anos")]
    FiveToTen,
    #[serde(rename = "Mais de 10 anos")]
    MoreThanTen,
}

impl ExperienceBucket {
    pub const ALL: [ExperienceBucket; 5] = [
        ExperienceBucket::LessThanOne,
        ExperienceBucket::OneToThree,
        ExperienceBucket::ThreeToFive,
        ExperienceBucket::FiveToTen,
        ExperienceBucket::MoreThanTen,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceBucket::LessThanOne => "Menos de 1 ano",
            ExperienceBucket::OneToThree => "1 a 3 anos",
            ExperienceBucket::ThreeToFive => "3 a 5 anos",
            ExperienceBucket::FiveToTen => "5 a 10 anos",
            ExperienceBucket::MoreThanTen => "Mais de 10 anos",
        }
    }

    pub fn parse(label: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label() == label)
            .ok_or_else(|| DomainError::InvalidChoice {
                field: "tempo_trabalho",
                value: label.to_string(),
            })
    }
}

/// Categories and services picked on the professional step.
///
/// Insertion order is kept so the client sees its picks in the order made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub category_ids: Vec<CategoryId>,
    pub service_ids: Vec<ServiceId>,
}

impl Selection {
    /// Add or remove a category. Removing it also drops every selected
    /// service that belongs to it.
    pub fn toggle_category(&mut self, id: &str, catalog: &Catalog) -> Result<(), DomainError> {
        if catalog.category(id).is_none() {
            return Err(DomainError::UnknownOption(id.to_string()));
        }
        if let Some(pos) = self.category_ids.iter().position(|c| c == id) {
            self.category_ids.remove(pos);
            self.service_ids.retain(|service_id| {
                catalog
                    .service(service_id)
                    .and_then(|s| s.area_id.as_deref())
                    != Some(id)
            });
        } else {
            self.category_ids.push(id.to_string());
        }
        Ok(())
    }

    /// Add or remove a service. A service scoped to a category can only be
    /// added while that category is selected.
    pub fn toggle_service(&mut self, id: &str, catalog: &Catalog) -> Result<(), DomainError> {
        let service = catalog
            .service(id)
            .ok_or_else(|| DomainError::UnknownOption(id.to_string()))?;

        if let Some(pos) = self.service_ids.iter().position(|s| s == id) {
            self.service_ids.remove(pos);
            return Ok(());
        }

        if self.category_ids.is_empty() {
            return Err(DomainError::CategoryNotSelected);
        }
        if let Some(area) = &service.area_id {
            if !self.category_ids.contains(area) {
                return Err(DomainError::CategoryNotSelected);
            }
        }
        self.service_ids.push(id.to_string());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        !self.category_ids.is_empty() && !self.service_ids.is_empty()
    }
}

/// Second step of the provider registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionalData {
    pub selection: Selection,
    pub experience: Option<ExperienceBucket>,
    pub supporting_document_url: Option<String>,
}
