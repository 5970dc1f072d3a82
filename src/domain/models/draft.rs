use serde::{Deserialize, Serialize};

use crate::domain::models::{
    personal::PersonalData, professional::ProfessionalData, profile::ProfileData,
};

/// The three independently saved parts of a provider registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragment {
    Personal,
    Professional,
    Profile,
}

impl Fragment {
    pub fn key(&self) -> &'static str {
        match self {
            Fragment::Personal => "prestadorDadosPessoais",
            Fragment::Professional => "prestadorDadosProfissionais",
            Fragment::Profile => "prestadorDadosPerfil",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    personal: Option<PersonalData>,
    professional: Option<ProfessionalData>,
    profile: Option<ProfileData>,
}

/// A draft with every fragment present
#[derive(Debug, Clone)]
pub struct CompleteDraft {
    pub personal: PersonalData,
    pub professional: ProfessionalData,
    pub profile: ProfileData,
}

#[derive(Debug, Clone)]
pub enum FinalizationState {
    Incomplete { missing: Vec<Fragment> },
    Ready(Box<CompleteDraft>),
}

impl FinalizationState {
    pub fn is_ready(&self) -> bool {
        matches!(self, FinalizationState::Ready(_))
    }
}

impl RegistrationDraft {
    pub fn set_personal(&mut self, personal: PersonalData) {
        self.personal = Some(personal);
    }

    pub fn set_professional(&mut self, professional: ProfessionalData) {
        self.professional = Some(professional);
    }

    pub fn set_profile(&mut self, profile: ProfileData) {
        self.profile = Some(profile);
    }

    pub fn personal(&self) -> Option<&PersonalData> {
        self.personal.as_ref()
    }

    pub fn professional(&self) -> Option<&ProfessionalData> {
        self.professional.as_ref()
    }

    pub fn profile(&self) -> Option<&ProfileData> {
        self.profile.as_ref()
    }

    pub fn present(&self) -> Vec<Fragment> {
        let mut present = Vec::with_capacity(3);
        if self.personal.is_some() {
            present.push(Fragment::Personal);
        }
        if self.professional.is_some() {
            present.push(Fragment::Professional);
        }
        if self.profile.is_some() {
            present.push(Fragment::Profile);
        }
        present
    }

    pub fn missing(&self) -> Vec<Fragment> {
        let present = self.present();
        [Fragment::Personal, Fragment::Professional, Fragment::Profile]
            .into_iter()
            .filter(|f| !present.contains(f))
            .collect()
    }

    pub fn state(&self) -> FinalizationState {
        match (&self.personal, &self.professional, &self.profile) {
            (Some(personal), Some(professional), Some(profile)) => {
                FinalizationState::Ready(Box::new(CompleteDraft {
                    personal: personal.clone(),
                    professional: professional.clone(),
                    profile: profile.clone(),
                }))
            }
            _ => FinalizationState::Incomplete {
                missing: self.missing(),
            },
        }
    }

    /// Drop every fragment at once.
    pub fn clear(&mut self) {
        self.personal = None;
        self.professional = None;
        self.profile = None;
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}
