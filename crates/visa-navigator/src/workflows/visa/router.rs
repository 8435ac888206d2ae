use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::VisaPage;
use super::domain::{DurationCategory, StayKind, TravelPurpose};
use super::eligibility::{EligibilityRule, EligibilityVerdict};
use super::routing::RouteResolution;
use super::service::{VisaWizardService, WizardServiceError};
use super::session::{SessionId, SessionStoreError, WizardSessionStore};
use super::wizard::WizardStepInput;

#[derive(Debug, Deserialize)]
pub(crate) struct RouteRequest {
    #[serde(default)]
    pub(crate) nationality: String,
    pub(crate) destination: String,
    #[serde(default)]
    pub(crate) purpose: Option<TravelPurpose>,
    pub(crate) duration: DurationCategory,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    #[serde(default)]
    pub(crate) nationality: String,
    #[serde(default)]
    pub(crate) applying_from: String,
    #[serde(default)]
    pub(crate) usa_visa_status: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityResponse {
    #[serde(flatten)]
    pub(crate) verdict: EligibilityVerdict,
    pub(crate) rule: EligibilityRule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StartSessionRequest {
    #[serde(default)]
    pub(crate) flow: Option<StayKind>,
}

/// Router builder exposing routing, eligibility, and wizard endpoints.
pub fn visa_router<S>(service: Arc<VisaWizardService<S>>) -> Router
where
    S: WizardSessionStore + 'static,
{
    Router::new()
        .route("/api/v1/visa/route", post(route_handler::<S>))
        .route("/api/v1/visa/eligibility", post(eligibility_handler::<S>))
        .route("/api/v1/visa/pages", get(pages_handler::<S>))
        .route("/api/v1/visa/wizard", post(start_handler::<S>))
        .route("/api/v1/visa/wizard/:session_id", get(session_handler::<S>))
        .route(
            "/api/v1/visa/wizard/:session_id/steps",
            post(step_handler::<S>),
        )
        .route("/api/v1/visa/wizard/:session_id/back", post(back_handler::<S>))
        .route(
            "/api/v1/visa/wizard/:session_id/complete",
            post(complete_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn route_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
    Json(request): Json<RouteRequest>,
) -> Json<RouteResolution>
where
    S: WizardSessionStore + 'static,
{
    tracing::debug!(
        nationality = %request.nationality,
        destination = %request.destination,
        purpose = ?request.purpose,
        duration = ?request.duration,
        "resolving visa route"
    );
    Json(service.resolve_route(&request.destination, request.duration))
}

pub(crate) async fn eligibility_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
    Json(request): Json<EligibilityRequest>,
) -> Json<EligibilityResponse>
where
    S: WizardSessionStore + 'static,
{
    let assessment = service.check_eligibility(
        &request.nationality,
        &request.applying_from,
        request.usa_visa_status.as_deref(),
    );
    Json(EligibilityResponse {
        verdict: assessment.verdict,
        rule: assessment.rule,
    })
}

pub(crate) async fn pages_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
) -> Json<Vec<VisaPage>>
where
    S: WizardSessionStore + 'static,
{
    Json(service.catalog().pages().to_vec())
}

/// An empty body starts the default wizard; anything else must decode.
pub(crate) async fn start_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
    body: Bytes,
) -> Response
where
    S: WizardSessionStore + 'static,
{
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        StartSessionRequest::default()
    } else {
        match serde_json::from_slice::<StartSessionRequest>(&body) {
            Ok(request) => request,
            Err(error) => {
                let payload = json!({
                    "error": format!("invalid wizard start request: {error}"),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
            }
        }
    };

    match service.start(request.flow) {
        Ok(session) => (StatusCode::CREATED, Json(session.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: WizardSessionStore + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn step_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
    Path(session_id): Path<String>,
    Json(input): Json<WizardStepInput>,
) -> Response
where
    S: WizardSessionStore + 'static,
{
    match service.advance(&SessionId(session_id), input) {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn back_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: WizardSessionStore + 'static,
{
    match service.back(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, Json(session.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_handler<S>(
    State(service): State<Arc<VisaWizardService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: WizardSessionStore + 'static,
{
    match service.complete(&SessionId(session_id)) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: WizardServiceError) -> Response {
    let status = match &error {
        WizardServiceError::Wizard(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WizardServiceError::Expired => StatusCode::GONE,
        WizardServiceError::Store(SessionStoreError::NotFound) => StatusCode::NOT_FOUND,
        WizardServiceError::Store(SessionStoreError::Conflict) => StatusCode::CONFLICT,
        WizardServiceError::Store(SessionStoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
