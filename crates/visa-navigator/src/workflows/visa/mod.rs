//! Destination-aware visa routing, advisory eligibility, and the application wizard.

pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod router;
pub mod routing;
pub mod service;
pub mod session;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{VisaPage, VisaPageCatalog};
pub use domain::{
    normalize_destination, ContactInfo, DurationCategory, PersonalInfo, StayKind, TravelPurpose,
    WizardFormData,
};
pub use eligibility::{
    check_eligibility, EligibilityAssessment, EligibilityRule, EligibilityRules,
    EligibilityVerdict,
};
pub use router::visa_router;
pub use routing::{resolve_route, RouteKind, RouteResolution, RouteTable};
pub use service::{VisaWizardService, WizardServiceError};
pub use session::{
    SessionId, SessionStoreError, WizardSession, WizardSessionStore, WizardSessionView,
};
pub use wizard::{
    StepNotice, VisaWizard, WizardError, WizardOutcome, WizardProgress, WizardStep,
    WizardStepInput, ADDITIONAL_NEEDS_OPTIONS,
};
