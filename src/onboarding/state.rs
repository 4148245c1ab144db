//! Wizard step sequence: which of the six steps the user is on.

use serde::{Deserialize, Serialize};

/// The steps of the ICP onboarding wizard.
///
/// Progresses linearly: CompanyInfo → TargetCriteria → AiDetection →
/// LinkedIn → Review → Success. Users may step back one at a time, except
/// out of Success, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    CompanyInfo,
    TargetCriteria,
    AiDetection,
    #[serde(rename = "linkedin")]
    LinkedIn,
    Review,
    Success,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        Self::CompanyInfo,
        Self::TargetCriteria,
        Self::AiDetection,
        Self::LinkedIn,
        Self::Review,
        Self::Success,
    ];

    /// Number of steps, terminal included.
    pub const TOTAL: u8 = 6;

    /// 1-based position of this step.
    pub fn number(&self) -> u8 {
        match self {
            Self::CompanyInfo => 1,
            Self::TargetCriteria => 2,
            Self::AiDetection => 3,
            Self::LinkedIn => 4,
            Self::Review => 5,
            Self::Success => 6,
        }
    }

    /// Step at a 1-based position, if in range.
    pub fn from_number(n: u8) -> Option<WizardStep> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WizardStep) -> bool {
        self.next() == Some(target) || self.prev() == Some(target)
    }

    /// Whether this step is terminal (the ICP has been submitted).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether the user may skip this step without filling it in.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::LinkedIn)
    }

    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        Self::from_number(self.number() + 1)
    }

    /// The previous step, if going back is allowed from here.
    pub fn prev(&self) -> Option<WizardStep> {
        if self.is_terminal() {
            return None;
        }
        Self::from_number(self.number() - 1)
    }

    /// Label shown in the step indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyInfo => "Company Info",
            Self::TargetCriteria => "Target Criteria",
            Self::AiDetection => "AI Detection",
            Self::LinkedIn => "LinkedIn",
            Self::Review => "Review",
            Self::Success => "Success",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::CompanyInfo
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CompanyInfo => "company_info",
            Self::TargetCriteria => "target_criteria",
            Self::AiDetection => "ai_detection",
            Self::LinkedIn => "linkedin",
            Self::Review => "review",
            Self::Success => "success",
        };
        write!(f, "{s}")
    }
}
