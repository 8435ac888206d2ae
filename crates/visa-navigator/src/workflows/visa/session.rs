use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{StayKind, WizardFormData};
use super::wizard::{StepNotice, VisaWizard, WizardProgress};

/// Identifier wrapper for wizard sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// A traveller's in-progress wizard with an explicit lifetime.
///
/// Created when the wizard starts, removed when it completes, and treated as gone once
/// `expires_at` passes. `revision` counts stored writes so stale copies cannot overwrite
/// newer progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSession {
    pub id: SessionId,
    pub wizard: VisaWizard,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub revision: u64,
}

impl WizardSession {
    pub fn start(flow: Option<StayKind>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let wizard = match flow {
            Some(flow) => VisaWizard::for_flow(flow),
            None => VisaWizard::new(),
        };

        Self {
            id: SessionId::generate(),
            wizard,
            created_at: now,
            expires_at: now + ttl,
            revision: 0,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Push the expiry forward after activity.
    pub fn touch(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.expires_at = now + ttl;
    }

    pub fn view(&self) -> WizardSessionView {
        WizardSessionView {
            session_id: self.id.clone(),
            progress: self.wizard.progress(),
            notices: self.wizard.notices(),
            form: self.wizard.form().clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Session state exposed to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSessionView {
    pub session_id: SessionId,
    pub progress: WizardProgress,
    pub notices: Vec<StepNotice>,
    pub form: WizardFormData,
    pub expires_at: DateTime<Utc>,
}

/// Storage abstraction so sessions can live in memory or an external cache.
pub trait WizardSessionStore: Send + Sync {
    fn insert(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError>;
    /// Replace a stored session. Fails with `Conflict` unless the stored revision matches
    /// `session.revision`; on success the returned copy carries the bumped revision.
    fn update(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError>;
    /// Take the session out of the store. Only one caller ever receives `Some`.
    fn remove(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError>;
    /// Drop every session expired at `now`, returning how many were removed.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session was changed by another request")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expires_after_ttl() {
        let now = Utc::now();
        let session = WizardSession::start(None, now, Duration::minutes(30));
        assert!(!session.is_expired(now + Duration::minutes(29)));
        assert!(session.is_expired(now + Duration::minutes(30)));
    }

    #[test]
    fn touch_extends_expiry() {
        let now = Utc::now();
        let mut session = WizardSession::start(Some(StayKind::ShortStay), now, Duration::minutes(5));
        let later = now + Duration::minutes(4);
        session.touch(later, Duration::minutes(5));
        assert!(!session.is_expired(now + Duration::minutes(8)));
        assert_eq!(session.wizard.flow(), StayKind::ShortStay);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
