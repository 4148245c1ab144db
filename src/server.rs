//! HTTP service assembly: collaborators, routers, and shared layers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::dashboard::{DashboardRouteState, UiContext, dashboard_routes};
use crate::error::{Error, Result, SessionError, SubmissionError};
use crate::onboarding::{
    HttpIngestion, IngestionClient, LoggingIngestion, OnboardingRouteState, StubOAuthConnector,
    WizardDeps, WizardSessions, onboarding_routes,
};
use crate::pricing::pricing_routes;

/// Pick the wizard's collaborators from config.
pub fn wizard_deps(config: &ServiceConfig) -> Result<WizardDeps> {
    config.validate()?;

    let ingestion: Arc<dyn IngestionClient> = match config.ingest_url {
        Some(ref url) => {
            let client = HttpIngestion::new(
                url.clone(),
                config.ingest_token.clone(),
                config.collaborator_timeout,
            )?;
            info!(url = %client.url(), "ICP ingestion over HTTP");
            Arc::new(client)
        }
        None => {
            info!("ICP ingestion not configured; submissions are logged only");
            Arc::new(LoggingIngestion)
        }
    };

    Ok(WizardDeps {
        ingestion,
        oauth: Arc::new(StubOAuthConnector),
        timeout: config.collaborator_timeout,
        policy: config.submission,
    })
}

/// Build the full router: onboarding, dashboard, pricing, and health.
pub fn app(sessions: Arc<WizardSessions>, ui: UiContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(sessions.clone())
        .merge(onboarding_routes(OnboardingRouteState { sessions }))
        .merge(dashboard_routes(DashboardRouteState { ui }))
        .merge(pricing_routes())
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}

async fn health(State(sessions): State<Arc<WizardSessions>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "icp-dashboard",
        "sessions": sessions.count().await
    }))
}

/// Map a service error onto an HTTP status with an `{"error": ...}` body.
pub fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::Session(SessionError::NotFound { .. }) | Error::Pricing(_) => StatusCode::NOT_FOUND,
        Error::Submission(SubmissionError::ValidationFailure { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Error::Submission(SubmissionError::NetworkFailure { .. }) => StatusCode::BAD_GATEWAY,
        Error::Submission(SubmissionError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
        Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({"error": err.to_string()}))).into_response()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;

    #[test]
    fn errors_map_to_statuses() {
        let cases = [
            (
                Error::from(SessionError::NotFound { id: Uuid::nil() }),
                StatusCode::NOT_FOUND,
            ),
            (
                Error::from(SubmissionError::validation("missing companyName")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                Error::from(SubmissionError::network("ingest", "refused")),
                StatusCode::BAD_GATEWAY,
            ),
            (
                Error::from(SubmissionError::Timeout {
                    collaborator: "ingest".to_string(),
                    timeout: Duration::from_secs(1),
                }),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(error_response(&err).status(), expected, "{err}");
        }
    }

    #[test]
    fn deps_default_to_logging_ingestion() {
        let deps = wizard_deps(&ServiceConfig::default()).unwrap();
        assert_eq!(deps.ingestion.name(), "logging");
        assert_eq!(deps.oauth.name(), "linkedin-stub");
    }

    #[test]
    fn deps_use_http_ingestion_when_configured() {
        let config = ServiceConfig {
            ingest_url: Some("http://127.0.0.1:9/icp".to_string()),
            ..ServiceConfig::default()
        };
        let deps = wizard_deps(&config).unwrap();
        assert_eq!(deps.ingestion.name(), "http-ingestion");
    }

    #[test]
    fn deps_reject_invalid_config() {
        let config = ServiceConfig {
            ingest_url: Some("127.0.0.1:9/icp".to_string()),
            ..ServiceConfig::default()
        };
        assert!(matches!(wizard_deps(&config), Err(Error::Config(_))));
    }
}
