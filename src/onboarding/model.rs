//! ICP form data, field addressing, and option catalogs.

use serde::{Deserialize, Serialize};

use super::state::WizardStep;

/// Default value of the AI precision slider.
pub const DEFAULT_AI_PRECISION: u8 = 50;
/// Upper bound of the AI precision slider (lower bound is 0).
pub const MAX_AI_PRECISION: u8 = 100;

/// The Ideal Customer Profile being built by the wizard.
///
/// Serialized with the camelCase field names the dashboard front-end uses,
/// which is also the shape handed to ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcpFormData {
    // Company info
    pub company_name: String,
    pub industry: String,
    pub country: String,

    // Target criteria
    pub target_job_titles: Vec<String>,
    pub target_locations: Vec<String>,
    pub target_industry: String,
    pub company_size: String,
    pub company_type: String,
    pub exclude_keywords: Vec<String>,
    /// 0-100; higher means fewer, more precise leads.
    pub ai_precision: u8,

    // AI detection
    pub detect_engagement: bool,
    pub detect_trigger_events: bool,
    pub linkedin_profiles: Vec<String>,

    /// Only ever set by a successful LinkedIn connect.
    pub linkedin_connected: bool,
}

impl Default for IcpFormData {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            industry: String::new(),
            country: String::new(),
            target_job_titles: Vec::new(),
            target_locations: Vec::new(),
            target_industry: String::new(),
            company_size: String::new(),
            company_type: String::new(),
            exclude_keywords: Vec::new(),
            ai_precision: DEFAULT_AI_PRECISION,
            detect_engagement: false,
            detect_trigger_events: false,
            linkedin_profiles: Vec::new(),
            linkedin_connected: false,
        }
    }
}

impl IcpFormData {
    /// Apply a scalar field update. Never fails.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::CompanyName(v) => self.company_name = v,
            FieldUpdate::Industry(v) => self.industry = v,
            FieldUpdate::Country(v) => self.country = v,
            FieldUpdate::TargetIndustry(v) => self.target_industry = v,
            FieldUpdate::CompanySize(v) => self.company_size = v,
            FieldUpdate::CompanyType(v) => self.company_type = v,
            FieldUpdate::AiPrecision(v) => {
                self.ai_precision = v.clamp(0, i64::from(MAX_AI_PRECISION)) as u8;
            }
            FieldUpdate::DetectEngagement(v) => self.detect_engagement = v,
            FieldUpdate::DetectTriggerEvents(v) => self.detect_trigger_events = v,
        }
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::TargetJobTitles => &self.target_job_titles,
            ListField::TargetLocations => &self.target_locations,
            ListField::ExcludeKeywords => &self.exclude_keywords,
            ListField::LinkedinProfiles => &self.linkedin_profiles,
        }
    }

    pub fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::TargetJobTitles => &mut self.target_job_titles,
            ListField::TargetLocations => &mut self.target_locations,
            ListField::ExcludeKeywords => &mut self.exclude_keywords,
            ListField::LinkedinProfiles => &mut self.linkedin_profiles,
        }
    }

    /// Names of the company-info fields that are still empty.
    pub fn missing_company_info(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.company_name.trim().is_empty() {
            missing.push("companyName");
        }
        if self.industry.trim().is_empty() {
            missing.push("industry");
        }
        if self.country.trim().is_empty() {
            missing.push("country");
        }
        missing
    }
}

/// A write to one scalar field of [`IcpFormData`].
///
/// `linkedinConnected` is deliberately absent: it is only set by the
/// connect handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    CompanyName(String),
    Industry(String),
    Country(String),
    TargetIndustry(String),
    CompanySize(String),
    CompanyType(String),
    /// Clamped into 0..=100 on apply.
    AiPrecision(i64),
    DetectEngagement(bool),
    DetectTriggerEvents(bool),
}

/// The tag-list fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListField {
    TargetJobTitles,
    TargetLocations,
    ExcludeKeywords,
    LinkedinProfiles,
}

impl ListField {
    pub const ALL: [ListField; 4] = [
        Self::TargetJobTitles,
        Self::TargetLocations,
        Self::ExcludeKeywords,
        Self::LinkedinProfiles,
    ];
}

impl std::fmt::Display for ListField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TargetJobTitles => "targetJobTitles",
            Self::TargetLocations => "targetLocations",
            Self::ExcludeKeywords => "excludeKeywords",
            Self::LinkedinProfiles => "linkedinProfiles",
        };
        write!(f, "{s}")
    }
}

/// In-progress text for each tag-list field, before it is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempInput {
    pub target_job_title: String,
    pub target_location: String,
    pub exclude_keyword: String,
    pub linkedin_profile: String,
}

impl TempInput {
    pub fn slot(&self, field: ListField) -> &str {
        match field {
            ListField::TargetJobTitles => &self.target_job_title,
            ListField::TargetLocations => &self.target_location,
            ListField::ExcludeKeywords => &self.exclude_keyword,
            ListField::LinkedinProfiles => &self.linkedin_profile,
        }
    }

    pub fn slot_mut(&mut self, field: ListField) -> &mut String {
        match field {
            ListField::TargetJobTitles => &mut self.target_job_title,
            ListField::TargetLocations => &mut self.target_location,
            ListField::ExcludeKeywords => &mut self.exclude_keyword,
            ListField::LinkedinProfiles => &mut self.linkedin_profile,
        }
    }
}

pub const INDUSTRIES: &[&str] = &[
    "Technology",
    "SaaS",
    "Healthcare",
    "Finance",
    "E-commerce",
    "Education",
    "Manufacturing",
    "Real Estate",
];

pub const COUNTRIES: &[&str] = &[
    "United States",
    "Canada",
    "United Kingdom",
    "Germany",
    "France",
    "Australia",
    "India",
    "Singapore",
];

pub const COMPANY_SIZES: &[&str] = &[
    "1-10",
    "11-50",
    "51-200",
    "201-500",
    "501-1000",
    "1001-5000",
    "5000+",
];

pub const COMPANY_TYPES: &[&str] = &[
    "Private Company",
    "Public Company",
    "Startup",
    "Non-profit",
    "Government",
    "Agency",
];

/// Select-box options and step labels for the presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardOptions {
    pub industries: &'static [&'static str],
    pub countries: &'static [&'static str],
    pub company_sizes: &'static [&'static str],
    pub company_types: &'static [&'static str],
    pub steps: Vec<&'static str>,
}

impl WizardOptions {
    pub fn catalog() -> Self {
        Self {
            industries: INDUSTRIES,
            countries: COUNTRIES,
            company_sizes: COMPANY_SIZES,
            company_types: COMPANY_TYPES,
            steps: WizardStep::ALL.iter().map(|s| s.label()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_matches_mount_state() {
        let form = IcpFormData::default();
        assert!(form.company_name.is_empty());
        assert!(form.target_job_titles.is_empty());
        assert_eq!(form.ai_precision, 50);
        assert!(!form.detect_engagement);
        assert!(!form.detect_trigger_events);
        assert!(!form.linkedin_connected);
    }

    #[test]
    fn form_serializes_with_front_end_field_names() {
        let form = IcpFormData {
            company_name: "Acme".to_string(),
            target_job_titles: vec!["CEO".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["targetJobTitles"][0], "CEO");
        assert_eq!(json["aiPrecision"], 50);
        assert_eq!(json["linkedinConnected"], false);
    }

    #[test]
    fn field_update_wire_format() {
        let update: FieldUpdate =
            serde_json::from_str(r#"{"field": "companyName", "value": "Acme"}"#).unwrap();
        assert_eq!(update, FieldUpdate::CompanyName("Acme".to_string()));

        let update: FieldUpdate =
            serde_json::from_str(r#"{"field": "detectEngagement", "value": true}"#).unwrap();
        assert_eq!(update, FieldUpdate::DetectEngagement(true));

        // linkedinConnected cannot be written directly.
        assert!(
            serde_json::from_str::<FieldUpdate>(r#"{"field": "linkedinConnected", "value": true}"#)
                .is_err()
        );
    }

    #[test]
    fn ai_precision_is_clamped() {
        let mut form = IcpFormData::default();
        form.apply(FieldUpdate::AiPrecision(140));
        assert_eq!(form.ai_precision, 100);
        form.apply(FieldUpdate::AiPrecision(-3));
        assert_eq!(form.ai_precision, 0);
        form.apply(FieldUpdate::AiPrecision(73));
        assert_eq!(form.ai_precision, 73);
    }

    #[test]
    fn temp_slots_map_to_their_lists() {
        let mut temp = TempInput::default();
        for (i, field) in ListField::ALL.into_iter().enumerate() {
            *temp.slot_mut(field) = format!("value {i}");
        }
        assert_eq!(temp.target_job_title, "value 0");
        assert_eq!(temp.target_location, "value 1");
        assert_eq!(temp.exclude_keyword, "value 2");
        assert_eq!(temp.linkedin_profile, "value 3");
        assert_eq!(temp.slot(ListField::ExcludeKeywords), "value 2");
    }

    #[test]
    fn missing_company_info_lists_blank_fields() {
        let mut form = IcpFormData::default();
        assert_eq!(
            form.missing_company_info(),
            vec!["companyName", "industry", "country"]
        );
        form.company_name = "Acme".to_string();
        form.country = "  ".to_string();
        assert_eq!(form.missing_company_info(), vec!["industry", "country"]);
    }

    #[test]
    fn options_catalog_lists_all_steps() {
        let options = WizardOptions::catalog();
        assert_eq!(options.industries.len(), 8);
        assert_eq!(options.company_sizes.last(), Some(&"5000+"));
        assert_eq!(
            options.steps,
            vec![
                "Company Info",
                "Target Criteria",
                "AI Detection",
                "LinkedIn",
                "Review",
                "Success"
            ]
        );
    }
}
