mod rules;

use serde::{Deserialize, Serialize};

/// Advisory verdict computed fresh for every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub message: String,
    pub recommendation: String,
}

/// The rule that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityRule {
    UsaVisitorVisaHolder,
    VisaExempt,
    DefaultApplication,
}

/// Verdict paired with the rule that fired, for audit views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub rule: EligibilityRule,
    pub verdict: EligibilityVerdict,
}

/// Stateless evaluator over the fixed advisory rules.
///
/// Only one rule ever declares a traveller ineligible (B1/B2 holders applying from the
/// United States); everything else is optimistically eligible. This is a known gap, not a
/// complete eligibility policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct EligibilityRules;

impl EligibilityRules {
    pub fn evaluate(
        &self,
        nationality: &str,
        applying_from: &str,
        usa_visa_status: Option<&str>,
    ) -> EligibilityAssessment {
        if rules::is_usa(applying_from) && usa_visa_status.is_some_and(rules::is_b1_b2) {
            return EligibilityAssessment {
                rule: EligibilityRule::UsaVisitorVisaHolder,
                verdict: verdict(
                    false,
                    rules::USA_B1_B2_MESSAGE,
                    rules::USA_B1_B2_RECOMMENDATION,
                ),
            };
        }

        if rules::is_visa_exempt(nationality) {
            return EligibilityAssessment {
                rule: EligibilityRule::VisaExempt,
                verdict: verdict(
                    true,
                    rules::VISA_EXEMPT_MESSAGE,
                    rules::VISA_EXEMPT_RECOMMENDATION,
                ),
            };
        }

        EligibilityAssessment {
            rule: EligibilityRule::DefaultApplication,
            verdict: verdict(true, rules::DEFAULT_MESSAGE, rules::DEFAULT_RECOMMENDATION),
        }
    }
}

fn verdict(eligible: bool, message: &str, recommendation: &str) -> EligibilityVerdict {
    EligibilityVerdict {
        eligible,
        message: message.to_string(),
        recommendation: recommendation.to_string(),
    }
}

pub fn check_eligibility(
    nationality: &str,
    applying_from: &str,
    usa_visa_status: Option<&str>,
) -> EligibilityVerdict {
    EligibilityRules
        .evaluate(nationality, applying_from, usa_visa_status)
        .verdict
}
