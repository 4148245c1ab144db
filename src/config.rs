//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::dashboard::shell::{Theme, UiContext};
use crate::error::ConfigError;

/// Service configuration, built from `ICP_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to bind the HTTP/WebSocket server to.
    pub bind: String,
    pub port: u16,
    /// Ingestion endpoint. When unset, submissions are only logged.
    pub ingest_url: Option<String>,
    /// Bearer token sent to the ingestion endpoint.
    pub ingest_token: Option<SecretString>,
    /// Upper bound on any single collaborator call (ingestion, OAuth).
    pub collaborator_timeout: Duration,
    /// Mounted wizards untouched for this long are unmounted.
    pub session_idle_timeout: Duration,
    pub submission: SubmissionPolicy,
    /// Default UI context handed to the dashboard shell.
    pub ui: UiContext,
    /// Directory for rolling log files. Logs go to stderr only when unset.
    pub log_dir: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            ingest_url: None,
            ingest_token: None,
            collaborator_timeout: Duration::from_secs(10),
            session_idle_timeout: Duration::from_secs(3600), // 1 hour
            submission: SubmissionPolicy::default(),
            ui: UiContext::default(),
            log_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Build config from environment variables, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = std::env::var("ICP_BIND").unwrap_or(defaults.bind);

        let port: u16 = std::env::var("ICP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let ingest_url = std::env::var("ICP_INGEST_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let ingest_token = std::env::var("ICP_INGEST_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        let collaborator_timeout = std::env::var("ICP_COLLABORATOR_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.collaborator_timeout);

        let session_idle_timeout = std::env::var("ICP_SESSION_IDLE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.session_idle_timeout);

        let require_company_info = env_flag("ICP_REQUIRE_COMPANY_INFO").unwrap_or(false);

        let theme = std::env::var("ICP_THEME")
            .ok()
            .and_then(|s| s.parse::<Theme>().ok())
            .unwrap_or_default();

        let sidebar_collapsed = env_flag("ICP_SIDEBAR_COLLAPSED").unwrap_or(false);

        let log_dir = std::env::var("ICP_LOG_DIR").ok().filter(|s| !s.is_empty());

        Self {
            bind,
            port,
            ingest_url,
            ingest_token,
            collaborator_timeout,
            session_idle_timeout,
            submission: SubmissionPolicy {
                require_company_info,
            },
            ui: UiContext {
                theme,
                sidebar_collapsed,
            },
            log_dir,
        }
    }

    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.ingest_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    key: "ICP_INGEST_URL".to_string(),
                    message: format!("expected an http(s) URL, got {url:?}"),
                });
            }
        }
        if self.collaborator_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "ICP_COLLABORATOR_TIMEOUT_SECS".to_string(),
                message: "must be at least 1 second".to_string(),
            });
        }
        if self.session_idle_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "ICP_SESSION_IDLE_TIMEOUT_SECS".to_string(),
                message: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}

/// Checks applied before a snapshot is handed to ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionPolicy {
    /// Require company name, industry and country to be non-empty.
    /// Off by default: the wizard accepts any snapshot.
    pub require_company_info: bool,
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = std::env::var(key).ok()?;
    parse_flag(&raw)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preserve_permissive_submission() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.ingest_url.is_none());
        assert!(!config.submission.require_company_info);
        assert_eq!(config.collaborator_timeout, Duration::from_secs(10));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(3600));
        assert!(!config.ui.sidebar_collapsed);
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn validate_rejects_unusable_values() {
        assert!(ServiceConfig::default().validate().is_ok());

        let config = ServiceConfig {
            ingest_url: Some("ftp://ingest".to_string()),
            ..ServiceConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "ICP_INGEST_URL"
        ));

        let config = ServiceConfig {
            collaborator_timeout: Duration::ZERO,
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            session_idle_timeout: Duration::ZERO,
            ..ServiceConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "ICP_SESSION_IDLE_TIMEOUT_SECS"
        ));
    }
}
