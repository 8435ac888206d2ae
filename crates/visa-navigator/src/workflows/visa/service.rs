use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use super::catalog::VisaPageCatalog;
use super::domain::{DurationCategory, StayKind};
use super::eligibility::{EligibilityAssessment, EligibilityRules};
use super::routing::{RouteResolution, RouteTable};
use super::session::{SessionId, SessionStoreError, WizardSession, WizardSessionStore};
use super::wizard::{WizardError, WizardOutcome, WizardStepInput};

/// Service composing the route table, eligibility rules, and session store.
pub struct VisaWizardService<S> {
    store: Arc<S>,
    table: &'static RouteTable,
    rules: EligibilityRules,
    catalog: Arc<VisaPageCatalog>,
    session_ttl: Duration,
}

impl<S> VisaWizardService<S>
where
    S: WizardSessionStore + 'static,
{
    pub fn new(store: Arc<S>, session_ttl: Duration) -> Self {
        Self {
            store,
            table: RouteTable::shared(),
            rules: EligibilityRules,
            catalog: Arc::new(VisaPageCatalog::standard()),
            session_ttl,
        }
    }

    pub fn catalog(&self) -> &VisaPageCatalog {
        &self.catalog
    }

    pub fn resolve_route(&self, destination: &str, duration: DurationCategory) -> RouteResolution {
        self.table.explain(destination, duration)
    }

    pub fn check_eligibility(
        &self,
        nationality: &str,
        applying_from: &str,
        usa_visa_status: Option<&str>,
    ) -> EligibilityAssessment {
        self.rules
            .evaluate(nationality, applying_from, usa_visa_status)
    }

    /// Open a new wizard session.
    pub fn start(&self, flow: Option<StayKind>) -> Result<WizardSession, WizardServiceError> {
        let session = WizardSession::start(flow, Utc::now(), self.session_ttl);
        let stored = self.store.insert(session)?;
        info!(session_id = %stored.id.0, ?flow, "visa wizard session started");
        Ok(stored)
    }

    pub fn get(&self, id: &SessionId) -> Result<WizardSession, WizardServiceError> {
        self.live_session(id)
    }

    /// Apply the current step's input and persist the advanced session.
    pub fn advance(
        &self,
        id: &SessionId,
        input: WizardStepInput,
    ) -> Result<WizardSession, WizardServiceError> {
        let mut session = self.live_session(id)?;
        let step = input.step();
        let next = session.wizard.advance(input)?;
        session.touch(Utc::now(), self.session_ttl);
        let session = self.store.update(session)?;
        debug!(session_id = %id.0, ?step, ?next, "wizard step recorded");
        Ok(session)
    }

    pub fn back(&self, id: &SessionId) -> Result<WizardSession, WizardServiceError> {
        let mut session = self.live_session(id)?;
        let step = session.wizard.back()?;
        session.touch(Utc::now(), self.session_ttl);
        let session = self.store.update(session)?;
        debug!(session_id = %id.0, ?step, "wizard stepped back");
        Ok(session)
    }

    /// Resolve the outcome and end the session.
    ///
    /// Removing the session from the store claims it, so only one caller completes a given
    /// session. An incomplete wizard is put back untouched.
    pub fn complete(&self, id: &SessionId) -> Result<WizardOutcome, WizardServiceError> {
        self.live_session(id)?;
        let claimed = self
            .store
            .remove(id)?
            .ok_or(WizardServiceError::Store(SessionStoreError::NotFound))?;

        let outcome = match claimed.wizard.clone().complete_with(self.table, &self.rules) {
            Ok(outcome) => outcome,
            Err(error) => {
                self.store.insert(claimed)?;
                return Err(error.into());
            }
        };
        info!(
            session_id = %id.0,
            route = %outcome.route.path,
            eligible = outcome.eligibility.eligible,
            "visa wizard completed"
        );
        Ok(outcome)
    }

    pub fn purge_expired(&self) -> Result<usize, WizardServiceError> {
        let purged = self.store.purge_expired(Utc::now())?;
        if purged > 0 {
            info!(purged, "expired wizard sessions removed");
        }
        Ok(purged)
    }

    fn live_session(&self, id: &SessionId) -> Result<WizardSession, WizardServiceError> {
        let session = self
            .store
            .fetch(id)?
            .ok_or(WizardServiceError::Store(SessionStoreError::NotFound))?;

        if session.is_expired(Utc::now()) {
            self.store.remove(id)?;
            debug!(session_id = %id.0, "expired wizard session dropped");
            return Err(WizardServiceError::Expired);
        }

        Ok(session)
    }
}

/// Error raised by the wizard service.
#[derive(Debug, thiserror::Error)]
pub enum WizardServiceError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error("wizard session expired")]
    Expired,
}
