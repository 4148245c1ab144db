//! External collaborators of the wizard: ICP ingestion and LinkedIn OAuth.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::model::IcpFormData;
use crate::error::SubmissionError;

/// A finalized ICP snapshot handed to ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpSubmission {
    pub session_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub profile: IcpFormData,
}

impl IcpSubmission {
    pub fn new(session_id: Uuid, profile: IcpFormData) -> Self {
        Self {
            session_id,
            submitted_at: Utc::now(),
            profile,
        }
    }
}

/// Receives finalized ICP snapshots.
#[async_trait]
pub trait IngestionClient: Send + Sync {
    /// Collaborator name used in logs and errors.
    fn name(&self) -> &str;

    /// Accept a snapshot. An error keeps the wizard on the review step.
    async fn ingest(&self, submission: &IcpSubmission) -> Result<(), SubmissionError>;
}

/// Performs the LinkedIn account-connect handshake.
#[async_trait]
pub trait OAuthConnector: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the connected status reported by the provider.
    async fn connect(&self, session_id: Uuid) -> Result<bool, SubmissionError>;
}

/// Ingestion that only logs the snapshot and always succeeds.
#[derive(Debug, Default)]
pub struct LoggingIngestion;

#[async_trait]
impl IngestionClient for LoggingIngestion {
    fn name(&self) -> &str {
        "logging"
    }

    async fn ingest(&self, submission: &IcpSubmission) -> Result<(), SubmissionError> {
        let payload = serde_json::to_string(submission)
            .map_err(|e| SubmissionError::validation(format!("unserializable snapshot: {e}")))?;
        info!(
            session_id = %submission.session_id,
            company = %submission.profile.company_name,
            payload = %payload,
            "Submitting ICP"
        );
        Ok(())
    }
}

/// Ingestion over HTTP: POSTs the snapshot as JSON.
pub struct HttpIngestion {
    client: reqwest::Client,
    url: String,
    token: Option<SecretString>,
    timeout: Duration,
}

impl HttpIngestion {
    pub fn new(
        url: impl Into<String>,
        token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmissionError::network("http-ingestion", e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            token,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IngestionClient for HttpIngestion {
    fn name(&self) -> &str {
        "http-ingestion"
    }

    async fn ingest(&self, submission: &IcpSubmission) -> Result<(), SubmissionError> {
        let mut request = self.client.post(&self.url).json(submission);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SubmissionError::Timeout {
                    collaborator: self.name().to_string(),
                    timeout: self.timeout,
                }
            } else {
                SubmissionError::network(self.name(), e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(session_id = %submission.session_id, %status, "ICP accepted by ingestion");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_rejection(self.name(), status, &body, self.timeout))
    }
}

/// Map a non-success ingestion response onto the error taxonomy.
fn classify_rejection(
    collaborator: &str,
    status: StatusCode,
    body: &str,
    timeout: Duration,
) -> SubmissionError {
    let detail: String = body.chars().take(200).collect();
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            SubmissionError::validation(format!("{collaborator} rejected snapshot ({status}): {detail}"))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => SubmissionError::Timeout {
            collaborator: collaborator.to_string(),
            timeout,
        },
        _ => SubmissionError::network(collaborator, format!("HTTP {status}: {detail}")),
    }
}

/// OAuth stand-in that reports every connect as successful.
#[derive(Debug, Default)]
pub struct StubOAuthConnector;

#[async_trait]
impl OAuthConnector for StubOAuthConnector {
    fn name(&self) -> &str {
        "linkedin-stub"
    }

    async fn connect(&self, session_id: Uuid) -> Result<bool, SubmissionError> {
        info!(session_id = %session_id, "LinkedIn connect (stubbed)");
        Ok(true)
    }
}
