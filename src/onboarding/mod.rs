//! ICP onboarding wizard: six-step Ideal Customer Profile setup.
//!
//! The wizard walks a user through company info, target criteria, AI
//! detection settings, an optional LinkedIn connect, and a review. A
//! successful submit hands the finished profile to ingestion and lands on
//! the terminal success step. Each mounted wizard is a `WizardController`
//! held in the `WizardSessions` registry; the presentation layer drives it
//! over REST or WebSocket.

pub mod collaborators;
pub mod controller;
pub mod model;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod view;

pub use collaborators::{
    HttpIngestion, IcpSubmission, IngestionClient, LoggingIngestion, OAuthConnector,
    StubOAuthConnector,
};
pub use controller::{WizardAction, WizardController, WizardDeps, WizardSnapshot};
pub use model::{FieldUpdate, IcpFormData, ListField, TempInput, WizardOptions};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use sessions::{WizardSessions, spawn_pruning_task};
pub use state::WizardStep;
pub use view::{StepView, SUCCESS_REDIRECT};
