use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::workflows::visa::domain::{DurationCategory, TravelPurpose};
use crate::workflows::visa::session::{
    SessionId, SessionStoreError, WizardSession, WizardSessionStore,
};
use crate::workflows::visa::wizard::WizardStepInput;
use crate::workflows::visa::{visa_router, VisaWizardService};

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    sessions: Arc<Mutex<HashMap<SessionId, WizardSession>>>,
}

impl MemorySessions {
    pub(super) fn len(&self) -> usize {
        self.sessions.lock().expect("session mutex poisoned").len()
    }
}

impl WizardSessionStore for MemorySessions {
    fn insert(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, mut session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let existing = guard
            .get_mut(&session.id)
            .ok_or(SessionStoreError::NotFound)?;
        if existing.revision != session.revision {
            return Err(SessionStoreError::Conflict);
        }
        session.revision += 1;
        *existing = session.clone();
        Ok(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.remove(id))
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired(now));
        Ok(before - guard.len())
    }
}

pub(super) struct UnavailableSessions;

impl WizardSessionStore for UnavailableSessions {
    fn insert(&self, _session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        Err(SessionStoreError::Unavailable("cache offline".to_string()))
    }

    fn update(&self, _session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        Err(SessionStoreError::Unavailable("cache offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("cache offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("cache offline".to_string()))
    }

    fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        Err(SessionStoreError::Unavailable("cache offline".to_string()))
    }
}

/// Serves reads from a pinned snapshot, as a request that loaded the session earlier would
/// see it. Writes go to the shared map.
pub(super) struct StaleReads {
    sessions: MemorySessions,
    pinned: Mutex<Option<WizardSession>>,
}

impl StaleReads {
    pub(super) fn new(sessions: MemorySessions) -> Self {
        Self {
            sessions,
            pinned: Mutex::new(None),
        }
    }

    pub(super) fn pin(&self, session: WizardSession) {
        *self.pinned.lock().expect("pin mutex poisoned") = Some(session);
    }
}

impl WizardSessionStore for StaleReads {
    fn insert(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        self.sessions.insert(session)
    }

    fn update(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        self.sessions.update(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        let pinned = self.pinned.lock().expect("pin mutex poisoned");
        match pinned.as_ref() {
            Some(session) if &session.id == id => Ok(Some(session.clone())),
            _ => self.sessions.fetch(id),
        }
    }

    fn remove(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        self.sessions.remove(id)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        self.sessions.purge_expired(now)
    }
}

pub(super) fn build_service() -> (VisaWizardService<MemorySessions>, MemorySessions) {
    let store = MemorySessions::default();
    let service = VisaWizardService::new(Arc::new(store.clone()), Duration::minutes(30));
    (service, store)
}

pub(super) fn expiring_service() -> (VisaWizardService<MemorySessions>, MemorySessions) {
    let store = MemorySessions::default();
    let service = VisaWizardService::new(Arc::new(store.clone()), Duration::zero());
    (service, store)
}

pub(super) fn router_with_service(service: VisaWizardService<MemorySessions>) -> axum::Router {
    visa_router(Arc::new(service))
}

/// Inputs for a Brazilian tourist heading to Germany, in step order.
pub(super) fn germany_short_stay_inputs() -> Vec<WizardStepInput> {
    vec![
        WizardStepInput::Destination {
            destination: "Germany".to_string(),
        },
        WizardStepInput::Nationality {
            nationality: "Brazil".to_string(),
            applying_from: None,
            usa_visa_status: None,
        },
        WizardStepInput::Purpose {
            purpose: TravelPurpose::Tourism,
        },
        WizardStepInput::Duration {
            duration: DurationCategory::ShortSingle,
        },
        WizardStepInput::PersonalInfo {
            name: "Ana Souza".to_string(),
            additional_needs: ["Hotel booking".to_string()].into_iter().collect(),
        },
        WizardStepInput::Contact {
            email: "ana@example.com".to_string(),
            phone: "+55 11 5555 0101".to_string(),
        },
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
