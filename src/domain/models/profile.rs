use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Weekly availability windows a provider can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "seg-sex-08-18")]
    WeekdaysEightToSix,
    #[serde(rename = "seg-sex-09-17")]
    WeekdaysNineToFive,
    #[serde(rename = "seg-sex-07-19")]
    WeekdaysSevenToSeven,
    #[serde(rename = "seg-sab-08-18")]
    MonSatEightToSix,
    #[serde(rename = "seg-sab-09-17")]
    MonSatNineToFive,
    #[serde(rename = "sab-dom-09-13")]
    WeekendNineToOne,
    #[serde(rename = "sab-dom-08-12")]
    WeekendEightToNoon,
    #[serde(rename = "todos-dias-08-18")]
    DailyEightToSix,
    #[serde(rename = "todos-dias-09-17")]
    DailyNineToFive,
    #[serde(rename = "seg-qua-08-12")]
    MonWedMornings,
    #[serde(rename = "ter-qui-14-18")]
    TueThuAfternoons,
    #[serde(rename = "plantao-24h")]
    OnCall24h,
}

impl Availability {
    pub const ALL: [Availability; 12] = [
        Availability::WeekdaysEightToSix,
        Availability::WeekdaysNineToFive,
        Availability::WeekdaysSevenToSeven,
        Availability::MonSatEightToSix,
        Availability::MonSatNineToFive,
        Availability::WeekendNineToOne,
        Availability::WeekendEightToNoon,
        Availability::DailyEightToSix,
        Availability::DailyNineToFive,
        Availability::MonWedMornings,
        Availability::TueThuAfternoons,
        Availability::OnCall24h,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Availability::WeekdaysEightToSix => "seg-sex-08-18",
            Availability::WeekdaysNineToFive => "seg-sex-09-17",
            Availability::WeekdaysSevenToSeven => "seg-sex-07-19",
            Availability::MonSatEightToSix => "seg-sab-08-18",
            Availability::MonSatNineToFive => "seg-sab-09-17",
            Availability::WeekendNineToOne => "sab-dom-09-13",
            Availability::WeekendEightToNoon => "sab-dom-08-12",
            Availability::DailyEightToSix => "todos-dias-08-18",
            Availability::DailyNineToFive => "todos-dias-09-17",
            Availability::MonWedMornings => "seg-qua-08-12",
            Availability::TueThuAfternoons => "ter-qui-14-18",
            Availability::OnCall24h => "plantao-24h",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::WeekdaysEightToSix => "Segunda a Sexta, 08:00 às 18:00",
            Availability::WeekdaysNineToFive => "Segunda a Sexta, 09:00 às 17:00",
            Availability::WeekdaysSevenToSeven => "Segunda a Sexta, 07:00 às 19:00",
            Availability::MonSatEightToSix => "Segunda a Sábado, 08:00 às 18:00",
            Availability::MonSatNineToFive => "Segunda a Sábado, 09:00 às 17:00",
            Availability::WeekendNineToOne => "Sábado e Domingo, 09:00 às 13:00",
            Availability::WeekendEightToNoon => "Sábado e Domingo, 08:00 às 12:00",
            Availability::DailyEightToSix => "Todos os dias, 08:00 às 18:00",
            Availability::DailyNineToFive => "Todos os dias, 09:00 às 17:00",
            Availability::MonWedMornings => "Segunda e Quarta, 08:00 às 12:00",
            Availability::TueThuAfternoons => "Terça e Quinta, 14:00 às 18:00",
            Availability::OnCall24h => "Plantão 24 horas",
        }
    }

    pub fn parse(code: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|a| a.code() == code)
            .ok_or_else(|| DomainError::InvalidChoice {
                field: "disponibilidade",
                value: code.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    En,
    Es,
    Fr,
    De,
    It,
    Ja,
    Zh,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::Pt,
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Ja,
        Language::Zh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Zh => "zh",
        }
    }

    pub fn parse(code: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| DomainError::InvalidChoice {
                field: "idiomas",
                value: code.to_string(),
            })
    }
}

/// Toggle `value` in a multi-select list.
pub fn toggle<T: PartialEq>(items: &mut Vec<T>, value: T) {
    if let Some(pos) = items.iter().position(|item| *item == value) {
        items.remove(pos);
    } else {
        items.push(value);
    }
}

/// Third step of the provider registration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileData {
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub gallery_urls: [Option<String>; 2],
    pub social_handle: Option<String>,
    pub linkedin_url: Option<String>,
    pub availability: Vec<Availability>,
    pub languages: Vec<Language>,
    /// Digits only
    pub phone: Option<String>,
    pub professional_email: Option<String>,
}
