use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{DurationCategory, TravelPurpose};

/// Data-collection steps in the order the wizard presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Destination,
    Nationality,
    Purpose,
    Duration,
    PersonalInfo,
    Contact,
}

impl WizardStep {
    pub const COUNT: usize = 6;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Destination,
            Self::Nationality,
            Self::Purpose,
            Self::Duration,
            Self::PersonalInfo,
            Self::Contact,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Destination => 0,
            Self::Nationality => 1,
            Self::Purpose => 2,
            Self::Duration => 3,
            Self::PersonalInfo => 4,
            Self::Contact => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Destination => "Destination",
            Self::Nationality => "Nationality",
            Self::Purpose => "Purpose of Travel",
            Self::Duration => "Length of Stay",
            Self::PersonalInfo => "Personal Information",
            Self::Contact => "Contact Details",
        }
    }
}

/// One field group submitted for a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardStepInput {
    Destination {
        destination: String,
    },
    Nationality {
        nationality: String,
        #[serde(default)]
        applying_from: Option<String>,
        #[serde(default)]
        usa_visa_status: Option<String>,
    },
    Purpose {
        purpose: TravelPurpose,
    },
    Duration {
        duration: DurationCategory,
    },
    PersonalInfo {
        name: String,
        #[serde(default)]
        additional_needs: BTreeSet<String>,
    },
    Contact {
        email: String,
        phone: String,
    },
}

impl WizardStepInput {
    pub const fn step(&self) -> WizardStep {
        match self {
            Self::Destination { .. } => WizardStep::Destination,
            Self::Nationality { .. } => WizardStep::Nationality,
            Self::Purpose { .. } => WizardStep::Purpose,
            Self::Duration { .. } => WizardStep::Duration,
            Self::PersonalInfo { .. } => WizardStep::PersonalInfo,
            Self::Contact { .. } => WizardStep::Contact,
        }
    }
}

/// Options offered on the personal information step's checklist.
pub const ADDITIONAL_NEEDS_OPTIONS: &[&str] = &[
    "Travel insurance",
    "Flight reservation",
    "Hotel booking",
    "Document translation",
    "Appointment scheduling",
    "Airport transfer",
];

/// Informational banner attached to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepNotice {
    pub step: WizardStep,
    pub title: String,
    pub detail: String,
}

pub(crate) fn schengen_short_stay_notice() -> StepNotice {
    StepNotice {
        step: WizardStep::Nationality,
        title: "Schengen short-stay visa".to_string(),
        detail: "One Schengen visa covers up to 90 days in any 180-day period across all member \
                 countries. Apply through the consulate of your main destination, or of your \
                 first point of entry if no country is your main destination."
            .to_string(),
    }
}
