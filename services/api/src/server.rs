use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing::{info, warn};
use visa_navigator::config::AppConfig;
use visa_navigator::error::AppError;
use visa_navigator::telemetry;
use visa_navigator::workflows::visa::{VisaWizardService, WizardSessionStore};

const SESSION_SWEEP_INTERVAL: StdDuration = StdDuration::from_secs(60);

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let sessions = Arc::new(InMemorySessionStore::default());
    let wizard_service = Arc::new(VisaWizardService::new(
        sessions,
        config.wizard.session_ttl(),
    ));
    spawn_session_sweeper(wizard_service.clone());

    let app = with_operational_routes(wizard_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        session_ttl_minutes = config.wizard.session_ttl_minutes,
        "visa navigator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodically drop wizard sessions whose lifetime has passed.
fn spawn_session_sweeper<S>(service: Arc<VisaWizardService<S>>)
where
    S: WizardSessionStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = service.purge_expired() {
                warn!(error = %err, "failed to purge expired wizard sessions");
            }
        }
    });
}
