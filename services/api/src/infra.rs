use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use visa_navigator::workflows::visa::{
    DurationCategory, SessionId, SessionStoreError, StayKind, TravelPurpose, WizardSession,
    WizardSessionStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, WizardSession>>>,
}

impl InMemorySessionStore {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, WizardSession>>, SessionStoreError>
    {
        self.sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session mutex poisoned".to_string()))
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or_default()
    }
}

impl WizardSessionStore for InMemorySessionStore {
    fn insert(&self, session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&session.id) {
            return Err(SessionStoreError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, mut session: WizardSession) -> Result<WizardSession, SessionStoreError> {
        let mut guard = self.lock()?;
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
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<Option<WizardSession>, SessionStoreError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(id))
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired(now));
        Ok(before - guard.len())
    }
}

/// Parse a CLI value through the same serde names the HTTP API accepts.
fn parse_wire_name<T: DeserializeOwned>(raw: &str, what: &str) -> Result<T, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    serde_json::from_value(Value::String(normalized))
        .map_err(|error| format!("invalid {what}: {error}"))
}

pub(crate) fn parse_duration(raw: &str) -> Result<DurationCategory, String> {
    parse_wire_name(raw, "duration")
}

pub(crate) fn parse_purpose(raw: &str) -> Result<TravelPurpose, String> {
    parse_wire_name(raw, "travel purpose")
}

pub(crate) fn parse_stay_kind(raw: &str) -> Result<StayKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "short" => Ok(StayKind::ShortStay),
        "long" => Ok(StayKind::LongStay),
        _ => parse_wire_name(raw, "stay kind"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parses_cli_enums() {
        assert_eq!(parse_duration("Long-Stay"), Ok(DurationCategory::LongStay));
        assert_eq!(parse_duration(" transit "), Ok(DurationCategory::Transit));
        assert!(parse_duration("weekend").is_err());
        assert_eq!(parse_purpose("medical"), Ok(TravelPurpose::Medical));
        assert!(parse_purpose("holiday").is_err());
        assert_eq!(parse_stay_kind("short"), Ok(StayKind::ShortStay));
        assert_eq!(parse_stay_kind("long-stay"), Ok(StayKind::LongStay));
    }

    #[test]
    fn cli_names_match_wire_names() {
        for duration in DurationCategory::ordered() {
            let wire = serde_json::to_value(duration).expect("duration encodes");
            let name = wire.as_str().expect("string name");
            assert_eq!(parse_duration(name), Ok(duration));
        }
        for purpose in TravelPurpose::ordered() {
            let wire = serde_json::to_value(purpose).expect("purpose encodes");
            let name = wire.as_str().expect("string name");
            assert_eq!(parse_purpose(name), Ok(purpose));
        }
    }

    #[test]
    fn stale_update_is_a_conflict() {
        let store = InMemorySessionStore::default();
        let session = store
            .insert(WizardSession::start(None, Utc::now(), Duration::minutes(5)))
            .expect("insert");

        let updated = store.update(session.clone()).expect("first update");
        assert_eq!(updated.revision, 1);
        assert!(matches!(
            store.update(session),
            Err(SessionStoreError::Conflict)
        ));
        assert!(store.update(updated).is_ok());
    }

    #[test]
    fn store_purges_expired_sessions() {
        let store = InMemorySessionStore::default();
        let now = Utc::now();
        store
            .insert(WizardSession::start(None, now, Duration::minutes(1)))
            .expect("insert");
        store
            .insert(WizardSession::start(None, now, Duration::minutes(60)))
            .expect("insert");

        let purged = store
            .purge_expired(now + Duration::minutes(5))
            .expect("purge");
        assert_eq!(purged, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_requires_existing_session() {
        let store = InMemorySessionStore::default();
        let session = WizardSession::start(None, Utc::now(), Duration::minutes(1));
        assert!(matches!(
            store.update(session),
            Err(SessionStoreError::NotFound)
        ));
    }
}
