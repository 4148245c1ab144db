//! WizardController: owns one wizard's form state and step pointer.
//!
//! Every local operation is total: bad indexes and blank entries are no-ops,
//! not errors. Only the two collaborator calls (`submit`,
//! `connect_external_account`) can fail, and a failure leaves the step
//! pointer where it was.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::collaborators::{IcpSubmission, IngestionClient, OAuthConnector};
use super::model::{FieldUpdate, IcpFormData, ListField, TempInput};
use super::state::WizardStep;
use super::view::StepView;
use crate::config::SubmissionPolicy;
use crate::error::SubmissionError;

/// External collaborators a controller talks to, shared across sessions.
#[derive(Clone)]
pub struct WizardDeps {
    pub ingestion: Arc<dyn IngestionClient>,
    pub oauth: Arc<dyn OAuthConnector>,
    /// Upper bound on each collaborator call.
    pub timeout: Duration,
    pub policy: SubmissionPolicy,
}

/// An input event dispatched by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    UpdateField(FieldUpdate),
    SetTempInput { field: ListField, value: String },
    AddEntry { field: ListField, value: String },
    CommitTempInput { field: ListField },
    RemoveEntry { field: ListField, index: usize },
    Advance,
    Retreat,
    Skip,
    ConnectLinkedin,
    Submit,
}

/// Everything the presentation layer needs to render the current step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub session_id: Uuid,
    pub position: u8,
    pub step: WizardStep,
    pub form: IcpFormData,
    pub temp_input: TempInput,
    pub view: StepView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Form state plus step pointer for a single mounted wizard.
#[derive(Debug, Clone)]
pub struct WizardController {
    session_id: Uuid,
    step: WizardStep,
    form: IcpFormData,
    temp: TempInput,
    submitted_at: Option<DateTime<Utc>>,
}

impl WizardController {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            step: WizardStep::default(),
            form: IcpFormData::default(),
            temp: TempInput::default(),
            submitted_at: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// 1-based position, 1..=6.
    pub fn position(&self) -> u8 {
        self.step.number()
    }

    pub fn form(&self) -> &IcpFormData {
        &self.form
    }

    pub fn temp_input(&self) -> &TempInput {
        &self.temp
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            session_id: self.session_id,
            position: self.position(),
            step: self.step,
            form: self.form.clone(),
            temp_input: self.temp.clone(),
            view: StepView::build(self.step, &self.form),
            submitted_at: self.submitted_at,
        }
    }

    // ── Form state ──────────────────────────────────────────────────────

    /// Set a scalar field. Always succeeds.
    pub fn update_field(&mut self, update: FieldUpdate) {
        debug!(session_id = %self.session_id, ?update, "Field updated");
        self.form.apply(update);
    }

    /// Replace the in-progress text for a list field.
    pub fn set_temp_input(&mut self, field: ListField, value: impl Into<String>) {
        *self.temp.slot_mut(field) = value.into();
    }

    /// Append the trimmed `raw` value to `field`.
    ///
    /// Blank input is ignored. On success the field's temp slot is cleared.
    /// Returns whether an entry was added.
    pub fn add_list_entry(&mut self, field: ListField, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            debug!(session_id = %self.session_id, %field, "Ignoring blank list entry");
            return false;
        }
        self.form.list_mut(field).push(value.to_string());
        self.temp.slot_mut(field).clear();
        true
    }

    /// Commit the field's temp slot (the "Add" button / Enter key).
    pub fn commit_temp_input(&mut self, field: ListField) -> bool {
        let raw = self.temp.slot(field).to_string();
        self.add_list_entry(field, &raw)
    }

    /// Remove the entry at `index`, shifting later entries down.
    ///
    /// Callers derive `index` from the rendered list, so an out-of-range
    /// index means a stale view; it is logged and ignored.
    pub fn remove_list_entry(&mut self, field: ListField, index: usize) -> Option<String> {
        let list = self.form.list_mut(field);
        if index >= list.len() {
            debug!(
                session_id = %self.session_id,
                %field,
                index,
                len = list.len(),
                "Ignoring out-of-range removal"
            );
            return None;
        }
        Some(list.remove(index))
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Move forward one step. No-op at the terminal step.
    pub fn advance(&mut self) -> WizardStep {
        if let Some(next) = self.step.next() {
            debug_assert!(self.step.can_transition_to(next));
            debug!(session_id = %self.session_id, from = %self.step, to = %next, "Advancing");
            self.step = next;
        }
        self.step
    }

    /// Move back one step. No-op on the first step.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = WizardStep::from_number(self.position().saturating_sub(1)) {
            debug!(session_id = %self.session_id, from = %self.step, to = %prev, "Retreating");
            self.step = prev;
        }
        self.step
    }

    /// Skip the optional LinkedIn step. Identical to `advance` there and a
    /// no-op anywhere else.
    pub fn skip(&mut self) -> WizardStep {
        if !self.step.is_optional() {
            debug!(session_id = %self.session_id, step = %self.step, "Skip ignored on required step");
            return self.step;
        }
        self.advance()
    }

    // ── Collaborator calls ─────────────────────────────────────────────

    /// Run the LinkedIn connect handshake and record the outcome.
    pub async fn connect_external_account(
        &mut self,
        oauth: &dyn OAuthConnector,
        timeout: Duration,
    ) -> Result<bool, SubmissionError> {
        let connected = match tokio::time::timeout(timeout, oauth.connect(self.session_id)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SubmissionError::Timeout {
                    collaborator: oauth.name().to_string(),
                    timeout,
                });
            }
        };

        if connected {
            self.form.linkedin_connected = true;
            info!(session_id = %self.session_id, connector = oauth.name(), "LinkedIn connected");
        } else {
            warn!(session_id = %self.session_id, connector = oauth.name(), "LinkedIn connect declined");
        }
        Ok(connected)
    }

    /// Hand the form snapshot to ingestion and, on success, advance.
    ///
    /// At the terminal step the ICP has already been accepted, so this
    /// returns without calling ingestion again.
    pub async fn submit(
        &mut self,
        ingestion: &dyn IngestionClient,
        policy: SubmissionPolicy,
        timeout: Duration,
    ) -> Result<WizardStep, SubmissionError> {
        if self.step.is_terminal() {
            debug!(session_id = %self.session_id, "Already submitted");
            return Ok(self.step);
        }

        if policy.require_company_info {
            let missing = self.form.missing_company_info();
            if !missing.is_empty() {
                return Err(SubmissionError::validation(format!(
                    "missing required fields: {}",
                    missing.join(", ")
                )));
            }
        }

        let submission = IcpSubmission::new(self.session_id, self.form.clone());
        match tokio::time::timeout(timeout, ingestion.ingest(&submission)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(session_id = %self.session_id, error = %e, "ICP submission failed");
                return Err(e);
            }
            Err(_) => {
                warn!(session_id = %self.session_id, ?timeout, "ICP submission timed out");
                return Err(SubmissionError::Timeout {
                    collaborator: ingestion.name().to_string(),
                    timeout,
                });
            }
        }

        self.submitted_at = Some(submission.submitted_at);
        let step = self.advance();
        info!(
            session_id = %self.session_id,
            ingestion = ingestion.name(),
            step = %step,
            "ICP submitted"
        );
        Ok(step)
    }

    /// Dispatch one presentation-layer event.
    ///
    /// Navigation here follows the rendered buttons: `advance` from Review
    /// is ignored (Review shows Submit, not Next), `submit` anywhere but
    /// Review is ignored, and `retreat` from Success is ignored (Success has
    /// no Back button). The terminal step is only reachable through a
    /// successful submit from Review, and ingestion sees each ICP once.
    pub async fn apply(
        &mut self,
        action: WizardAction,
        deps: &WizardDeps,
    ) -> Result<(), SubmissionError> {
        match action {
            WizardAction::UpdateField(update) => self.update_field(update),
            WizardAction::SetTempInput { field, value } => self.set_temp_input(field, value),
            WizardAction::AddEntry { field, value } => {
                self.add_list_entry(field, &value);
            }
            WizardAction::CommitTempInput { field } => {
                self.commit_temp_input(field);
            }
            WizardAction::RemoveEntry { field, index } => {
                self.remove_list_entry(field, index);
            }
            WizardAction::Advance => {
                if self.step == WizardStep::Review {
                    debug!(session_id = %self.session_id, "Advance from review requires submit");
                } else {
                    self.advance();
                }
            }
            WizardAction::Retreat => {
                if !self.step.is_terminal() {
                    self.retreat();
                }
            }
            WizardAction::Skip => {
                self.skip();
            }
            WizardAction::ConnectLinkedin => {
                self.connect_external_account(deps.oauth.as_ref(), deps.timeout)
                    .await?;
            }
            WizardAction::Submit => {
                if self.step == WizardStep::Review {
                    self.submit(deps.ingestion.as_ref(), deps.policy, deps.timeout)
                        .await?;
                } else {
                    debug!(session_id = %self.session_id, step = %self.step, "Submit only allowed from review");
                }
            }
        }
        Ok(())
    }
}
