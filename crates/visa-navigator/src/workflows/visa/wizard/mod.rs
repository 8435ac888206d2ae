//! Linear visa application wizard.
//!
//! The wizard accumulates a single [`WizardFormData`] one step at a time. Movement is strictly
//! forward or back; stepping back keeps what was already entered. Once every step has been
//! filled the wizard is consumed by [`VisaWizard::complete`], which hands the collected tuple to
//! the route resolver and the eligibility rules.

mod steps;

pub use steps::{StepNotice, WizardStep, WizardStepInput, ADDITIONAL_NEEDS_OPTIONS};

use serde::{Deserialize, Serialize};

use super::domain::{normalize_destination, StayKind, WizardFormData};
use super::eligibility::{EligibilityRule, EligibilityRules, EligibilityVerdict};
use super::routing::{RouteResolution, RouteTable};

/// Errors raised when the wizard is driven out of sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("expected input for the {expected:?} step, received {found:?}")]
    StepMismatch {
        expected: WizardStep,
        found: WizardStep,
    },
    #[error("every step has been filled; complete the wizard or go back")]
    NoPendingStep,
    #[error("{field} is required on the {step:?} step")]
    MissingField {
        step: WizardStep,
        field: &'static str,
    },
    #[error("already at the first step")]
    AtFirstStep,
    #[error("wizard is incomplete; next step is {next:?}")]
    Incomplete { next: WizardStep },
}

/// Snapshot of how far through the wizard a traveller is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardProgress {
    pub current_step: Option<WizardStep>,
    pub completed_steps: usize,
    pub total_steps: usize,
    pub ready: bool,
}

/// One-shot decision produced when the wizard completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardOutcome {
    pub route: RouteResolution,
    pub eligibility: EligibilityVerdict,
    pub eligibility_rule: EligibilityRule,
    pub form: WizardFormData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaWizard {
    form: WizardFormData,
    cursor: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flow: Option<StayKind>,
}

impl VisaWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wizard mounted from a short-stay or long-stay landing page.
    pub fn for_flow(flow: StayKind) -> Self {
        Self {
            flow: Some(flow),
            ..Self::default()
        }
    }

    pub fn form(&self) -> &WizardFormData {
        &self.form
    }

    /// The step awaiting input, or `None` once every step is filled.
    pub fn current_step(&self) -> Option<WizardStep> {
        WizardStep::from_index(self.cursor)
    }

    pub fn is_ready(&self) -> bool {
        self.cursor >= WizardStep::COUNT
    }

    /// Flow type fixed at mount time. A wizard mounted without one runs the short-stay flow.
    pub fn flow(&self) -> StayKind {
        self.flow.unwrap_or(StayKind::ShortStay)
    }

    pub fn progress(&self) -> WizardProgress {
        WizardProgress {
            current_step: self.current_step(),
            completed_steps: self.cursor.min(WizardStep::COUNT),
            total_steps: WizardStep::COUNT,
            ready: self.is_ready(),
        }
    }

    /// Record the current step's input and move forward.
    pub fn advance(&mut self, input: WizardStepInput) -> Result<Option<WizardStep>, WizardError> {
        let expected = self.current_step().ok_or(WizardError::NoPendingStep)?;
        let found = input.step();
        if expected != found {
            return Err(WizardError::StepMismatch { expected, found });
        }

        match input {
            WizardStepInput::Destination { destination } => {
                require(WizardStep::Destination, "destination", &destination)?;
                self.form.destination = destination.trim().to_string();
            }
            WizardStepInput::Nationality {
                nationality,
                applying_from,
                usa_visa_status,
            } => {
                require(WizardStep::Nationality, "nationality", &nationality)?;
                self.form.nationality = nationality.trim().to_string();
                self.form.applying_from = non_blank(applying_from);
                self.form.usa_visa_status = non_blank(usa_visa_status);
            }
            WizardStepInput::Purpose { purpose } => {
                self.form.purpose = Some(purpose);
            }
            WizardStepInput::Duration { duration } => {
                self.form.duration = Some(duration);
            }
            WizardStepInput::PersonalInfo {
                name,
                additional_needs,
            } => {
                self.form.personal_info.name = name.trim().to_string();
                self.form.personal_info.additional_needs = additional_needs
                    .into_iter()
                    .map(|need| need.trim().to_string())
                    .filter(|need| !need.is_empty())
                    .collect();
            }
            WizardStepInput::Contact { email, phone } => {
                self.form.contact.email = email.trim().to_string();
                self.form.contact.phone = phone.trim().to_string();
            }
        }

        self.cursor += 1;
        Ok(self.current_step())
    }

    /// Step back, keeping previously entered values.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        if self.cursor == 0 {
            return Err(WizardError::AtFirstStep);
        }
        self.cursor = self.cursor.min(WizardStep::COUNT) - 1;
        WizardStep::from_index(self.cursor).ok_or(WizardError::AtFirstStep)
    }

    /// Banners to show alongside the current step.
    pub fn notices(&self) -> Vec<StepNotice> {
        let mut notices = Vec::new();
        if self.current_step() == Some(WizardStep::Nationality)
            && normalize_destination(&self.form.destination) == "schengen-area"
            && self.flow() == StayKind::ShortStay
        {
            notices.push(steps::schengen_short_stay_notice());
        }
        notices
    }

    pub fn complete(self) -> Result<WizardOutcome, WizardError> {
        self.complete_with(RouteTable::shared(), &EligibilityRules)
    }

    /// Consume the wizard and resolve its route and eligibility verdict.
    pub fn complete_with(
        self,
        table: &RouteTable,
        rules: &EligibilityRules,
    ) -> Result<WizardOutcome, WizardError> {
        if let Some(next) = self.current_step() {
            return Err(WizardError::Incomplete { next });
        }
        let duration = self.form.duration.ok_or(WizardError::Incomplete {
            next: WizardStep::Duration,
        })?;

        let route = table.explain(&self.form.destination, duration);
        let assessment = rules.evaluate(
            &self.form.nationality,
            self.form.applying_from(),
            self.form.usa_visa_status.as_deref(),
        );

        Ok(WizardOutcome {
            route,
            eligibility: assessment.verdict,
            eligibility_rule: assessment.rule,
            form: self.form,
        })
    }
}

fn require(step: WizardStep, field: &'static str, value: &str) -> Result<(), WizardError> {
    if value.trim().is_empty() {
        return Err(WizardError::MissingField { step, field });
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::visa::domain::{DurationCategory, TravelPurpose};
    use crate::workflows::visa::routing::RouteKind;

    fn destination(value: &str) -> WizardStepInput {
        WizardStepInput::Destination {
            destination: value.to_string(),
        }
    }

    fn nationality(value: &str) -> WizardStepInput {
        WizardStepInput::Nationality {
            nationality: value.to_string(),
            applying_from: None,
            usa_visa_status: None,
        }
    }

    fn fill(wizard: &mut VisaWizard, duration: DurationCategory) {
        wizard
            .advance(WizardStepInput::Purpose {
                purpose: TravelPurpose::Tourism,
            })
            .expect("purpose accepted");
        wizard
            .advance(WizardStepInput::Duration { duration })
            .expect("duration accepted");
        wizard
            .advance(WizardStepInput::PersonalInfo {
                name: "Ana Souza".to_string(),
                additional_needs: ["Travel insurance".to_string()].into_iter().collect(),
            })
            .expect("personal info accepted");
        wizard
            .advance(WizardStepInput::Contact {
                email: "ana@example.com".to_string(),
                phone: "+55 11 5555 0101".to_string(),
            })
            .expect("contact accepted");
    }

    #[test]
    fn starts_at_destination_with_empty_form() {
        let wizard = VisaWizard::new();
        assert_eq!(wizard.current_step(), Some(WizardStep::Destination));
        assert_eq!(wizard.form(), &WizardFormData::default());
        assert!(!wizard.progress().ready);
    }

    #[test]
    fn rejects_input_for_another_step() {
        let mut wizard = VisaWizard::new();
        let err = wizard.advance(nationality("Brazil")).expect_err("out of order");
        assert_eq!(
            err,
            WizardError::StepMismatch {
                expected: WizardStep::Destination,
                found: WizardStep::Nationality,
            }
        );
        assert_eq!(wizard.current_step(), Some(WizardStep::Destination));
    }

    #[test]
    fn blank_destination_is_rejected() {
        let mut wizard = VisaWizard::new();
        let err = wizard.advance(destination("   ")).expect_err("blank rejected");
        assert!(matches!(err, WizardError::MissingField { field: "destination", .. }));
    }

    #[test]
    fn back_preserves_values() {
        let mut wizard = VisaWizard::new();
        wizard.advance(destination("Germany")).expect("destination");
        wizard.advance(nationality("Brazil")).expect("nationality");

        assert_eq!(wizard.back(), Ok(WizardStep::Nationality));
        assert_eq!(wizard.back(), Ok(WizardStep::Destination));
        assert_eq!(wizard.back(), Err(WizardError::AtFirstStep));
        assert_eq!(wizard.form().destination, "Germany");
        assert_eq!(wizard.form().nationality, "Brazil");
    }

    #[test]
    fn schengen_banner_only_for_short_stay_flow() {
        let mut wizard = VisaWizard::for_flow(StayKind::ShortStay);
        wizard.advance(destination("Schengen Area")).expect("destination");
        let notices = wizard.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].step, WizardStep::Nationality);

        let mut long_stay = VisaWizard::for_flow(StayKind::LongStay);
        long_stay
            .advance(destination("Schengen Area"))
            .expect("destination");
        assert!(long_stay.notices().is_empty());

        let mut other = VisaWizard::for_flow(StayKind::ShortStay);
        other.advance(destination("Japan")).expect("destination");
        assert!(other.notices().is_empty());
    }

    #[test]
    fn default_flow_banner_does_not_depend_on_history() {
        let mut wizard = VisaWizard::new();
        wizard.advance(destination("Schengen Area")).expect("destination");
        let first_visit = wizard.notices();
        assert_eq!(first_visit.len(), 1);

        wizard.advance(nationality("Brazil")).expect("nationality");
        wizard
            .advance(WizardStepInput::Purpose {
                purpose: TravelPurpose::Tourism,
            })
            .expect("purpose");
        wizard
            .advance(WizardStepInput::Duration {
                duration: DurationCategory::LongStay,
            })
            .expect("duration");
        for _ in 0..3 {
            wizard.back().expect("back");
        }

        assert_eq!(wizard.current_step(), Some(WizardStep::Nationality));
        assert_eq!(wizard.notices(), first_visit);
        assert_eq!(wizard.flow(), StayKind::ShortStay);
    }

    #[test]
    fn complete_requires_every_step() {
        let mut wizard = VisaWizard::new();
        wizard.advance(destination("Germany")).expect("destination");
        let err = wizard.complete().expect_err("incomplete");
        assert_eq!(
            err,
            WizardError::Incomplete {
                next: WizardStep::Nationality
            }
        );
    }

    #[test]
    fn completed_wizard_resolves_route_and_verdict() {
        let mut wizard = VisaWizard::new();
        wizard.advance(destination("Germany")).expect("destination");
        wizard.advance(nationality("Brazil")).expect("nationality");
        fill(&mut wizard, DurationCategory::ShortSingle);

        assert!(wizard.is_ready());
        assert_eq!(
            wizard.advance(destination("France")),
            Err(WizardError::NoPendingStep)
        );

        let outcome = wizard.complete().expect("completes");
        assert_eq!(outcome.route.path, "/visas/germany-short-stay");
        assert_eq!(outcome.route.kind, RouteKind::CountryPage);
        assert!(outcome.eligibility.eligible);
        assert_eq!(outcome.eligibility_rule, EligibilityRule::DefaultApplication);
        assert_eq!(outcome.form.personal_info.additional_needs.len(), 1);
    }

    #[test]
    fn back_from_ready_returns_to_contact() {
        let mut wizard = VisaWizard::new();
        wizard.advance(destination("Austria")).expect("destination");
        wizard.advance(nationality("India")).expect("nationality");
        fill(&mut wizard, DurationCategory::ShortMultiple);

        assert_eq!(wizard.back(), Ok(WizardStep::Contact));
        assert_eq!(wizard.form().contact.email, "ana@example.com");
    }

    #[test]
    fn usa_visitor_visa_holder_is_flagged_on_completion() {
        let mut wizard = VisaWizard::new();
        wizard.advance(destination("France")).expect("destination");
        wizard
            .advance(WizardStepInput::Nationality {
                nationality: "Mexico".to_string(),
                applying_from: Some("USA".to_string()),
                usa_visa_status: Some("B1/B2".to_string()),
            })
            .expect("nationality");
        fill(&mut wizard, DurationCategory::LongStay);

        let outcome = wizard.complete().expect("completes");
        assert_eq!(outcome.route.path, "/visas/france-long-stay");
        assert!(!outcome.eligibility.eligible);
        assert_eq!(outcome.eligibility_rule, EligibilityRule::UsaVisitorVisaHolder);
    }
}
