//! Per-step render data derived from the wizard state.

use serde::Serialize;

use super::model::IcpFormData;
use super::state::WizardStep;

/// Where the success step sends the user.
pub const SUCCESS_REDIRECT: &str = "/dashboard";

/// Placeholder shown in the review for an empty list.
const EMPTY_LIST: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorStatus {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub number: u8,
    pub label: &'static str,
    pub status: IndicatorStatus,
}

/// The forward button rendered under the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Next,
    SkipAndContinue,
    Submit,
}

impl PrimaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::SkipAndContinue => "Skip & Continue",
            Self::Submit => "Submit",
        }
    }
}

/// Read-only summary rendered on the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub company_name: String,
    pub industry: String,
    pub country: String,
    pub target_job_titles: String,
    pub target_locations: String,
    pub engagement: &'static str,
    pub trigger_events: &'static str,
    pub linkedin_profile_count: usize,
}

impl ReviewSummary {
    pub fn from_form(form: &IcpFormData) -> Self {
        Self {
            company_name: form.company_name.clone(),
            industry: form.industry.clone(),
            country: form.country.clone(),
            target_job_titles: join_or_placeholder(&form.target_job_titles),
            target_locations: join_or_placeholder(&form.target_locations),
            engagement: enabled_label(form.detect_engagement),
            trigger_events: enabled_label(form.detect_trigger_events),
            linkedin_profile_count: form.linkedin_profiles.len(),
        }
    }
}

/// Everything needed to draw the indicator, the step body, and the nav bar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub title: &'static str,
    pub indicator: Vec<StepIndicator>,
    /// 0.0 on the first step, 1.0 on the last.
    pub progress: f32,
    pub can_go_back: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_action: Option<PrimaryAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
}

impl StepView {
    pub fn build(step: WizardStep, form: &IcpFormData) -> Self {
        let current = step.number();
        let indicator = WizardStep::ALL
            .iter()
            .map(|s| StepIndicator {
                number: s.number(),
                label: s.label(),
                status: match s.number().cmp(&current) {
                    std::cmp::Ordering::Less => IndicatorStatus::Completed,
                    std::cmp::Ordering::Equal => IndicatorStatus::Active,
                    std::cmp::Ordering::Greater => IndicatorStatus::Upcoming,
                },
            })
            .collect();

        let primary_action = match step {
            WizardStep::Success => None,
            WizardStep::Review => Some(PrimaryAction::Submit),
            s if s.is_optional() => Some(PrimaryAction::SkipAndContinue),
            _ => Some(PrimaryAction::Next),
        };

        Self {
            title: step_title(step),
            indicator,
            progress: f32::from(current - 1) / f32::from(WizardStep::TOTAL - 1),
            can_go_back: step.prev().is_some(),
            primary_action,
            review: (step == WizardStep::Review).then(|| ReviewSummary::from_form(form)),
            redirect_to: step.is_terminal().then_some(SUCCESS_REDIRECT),
        }
    }
}

fn step_title(step: WizardStep) -> &'static str {
    match step {
        WizardStep::CompanyInfo => "Company Information",
        WizardStep::TargetCriteria => "Target Criteria",
        WizardStep::AiDetection => "AI Detection Settings",
        WizardStep::LinkedIn => "Connect LinkedIn",
        WizardStep::Review => "Review & Submit",
        WizardStep::Success => "Successfully Submitted!",
    }
}

fn join_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        EMPTY_LIST.to_string()
    } else {
        items.join(", ")
    }
}

fn enabled_label(flag: bool) -> &'static str {
    if flag { "Enabled" } else { "Disabled" }
}
