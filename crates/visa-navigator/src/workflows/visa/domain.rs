use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Why the traveller is making the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelPurpose {
    Tourism,
    Business,
    Family,
    Conference,
    Medical,
    Transit,
}

impl TravelPurpose {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Tourism,
            Self::Business,
            Self::Family,
            Self::Conference,
            Self::Medical,
            Self::Transit,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tourism => "Tourism",
            Self::Business => "Business",
            Self::Family => "Family Visit",
            Self::Conference => "Conference",
            Self::Medical => "Medical Treatment",
            Self::Transit => "Transit",
        }
    }
}

/// Length and entry pattern of the intended stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationCategory {
    ShortSingle,
    ShortMultiple,
    LongStay,
    Transit,
}

impl DurationCategory {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ShortSingle,
            Self::ShortMultiple,
            Self::LongStay,
            Self::Transit,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ShortSingle => "Short stay, single entry",
            Self::ShortMultiple => "Short stay, multiple entry",
            Self::LongStay => "Long stay (over 90 days)",
            Self::Transit => "Airport transit",
        }
    }

    /// Transit is routed through the short-stay tables.
    pub const fn stay_kind(self) -> StayKind {
        match self {
            Self::LongStay => StayKind::LongStay,
            Self::ShortSingle | Self::ShortMultiple | Self::Transit => StayKind::ShortStay,
        }
    }
}

/// Which routing table a duration category consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StayKind {
    ShortStay,
    LongStay,
}

impl StayKind {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::ShortStay => "short-stay",
            Self::LongStay => "long-stay",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ShortStay => "Short-Stay Visa",
            Self::LongStay => "Long-Stay Visa",
        }
    }
}

/// Details gathered on the personal information step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub additional_needs: BTreeSet<String>,
}

/// Details gathered on the contact step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// Form object accumulated across the wizard, one field group per step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardFormData {
    pub destination: String,
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applying_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usa_visa_status: Option<String>,
    pub purpose: Option<TravelPurpose>,
    pub duration: Option<DurationCategory>,
    pub personal_info: PersonalInfo,
    pub contact: ContactInfo,
}

impl WizardFormData {
    /// Country the application is lodged from, defaulting to the home country.
    pub fn applying_from(&self) -> &str {
        self.applying_from
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(self.nationality.as_str())
    }
}

/// Lowercase the destination and join its words with hyphens.
pub fn normalize_destination(destination: &str) -> String {
    destination
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
