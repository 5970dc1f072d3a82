use serde::{Deserialize, Serialize};

pub type CategoryId = String;
pub type ServiceId = String;

/// Professional area ("área profissional")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub nome: String,
}

/// A service offered under an optional category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub nome: String,
    pub area_id: Option<CategoryId>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub services: Vec<Service>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, services: Vec<Service>) -> Self {
        Self {
            categories,
            services,
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Services offered for the given categories. Services without a category
    /// are listed whenever at least one category is selected.
    pub fn services_for<'a>(&'a self, selected: &[CategoryId]) -> Vec<&'a Service> {
        if selected.is_empty() {
            return Vec::new();
        }
        self.services
            .iter()
            .filter(|s| match &s.area_id {
                Some(area) => selected.contains(area),
                None => true,
            })
            .collect()
    }
}
