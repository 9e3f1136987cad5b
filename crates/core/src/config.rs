//! Plugin configuration and tracker credentials.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::version::VersionTemplate;

/// Environment variable holding the tracker account email.
pub const EMAIL_ENV: &str = "JIRA_EMAIL";

/// Environment variable holding the tracker API token.
pub const TOKEN_ENV: &str = "JIRA_TOKEN";

/// Default number of simultaneous issue updates.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Errors raised while validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent or blank
    #[error("{0} configuration variable is missing")]
    MissingSetting(&'static str),

    /// A required environment variable is absent or blank
    #[error("{0} environment variable is missing")]
    MissingEnv(&'static str),

    /// The version template never mentions the version
    #[error("version template '{0}' does not contain ${{version}}")]
    TemplateWithoutVersion(String),
}

/// One ticket prefix or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicketPrefixes {
    /// A single prefix
    One(String),
    /// Several prefixes
    Many(Vec<String>),
}

impl TicketPrefixes {
    /// All prefixes as a list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            TicketPrefixes::One(p) => vec![p.clone()],
            TicketPrefixes::Many(ps) => ps.clone(),
        }
    }
}

impl Default for TicketPrefixes {
    fn default() -> Self {
        TicketPrefixes::Many(Vec::new())
    }
}

/// Configuration of the release hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Tracker base URL, e.g. `https://acme.atlassian.net`
    #[serde(default)]
    pub tracker_host: String,

    /// Project key
    #[serde(default)]
    pub project: String,

    /// Ticket prefixes to scan for
    #[serde(default, alias = "ticketPrefixes")]
    pub ticket_prefix: TicketPrefixes,

    /// Version-name template
    #[serde(default)]
    pub version_template: Option<VersionTemplate>,

    /// Fetch issue details for the release description
    #[serde(default)]
    pub enrich_issues: bool,

    /// Simultaneous issue updates
    #[serde(default)]
    pub concurrency: Option<NonZeroUsize>,
}

impl PluginConfig {
    /// Tracker host without a trailing slash.
    pub fn host(&self) -> &str {
        self.tracker_host.trim().trim_end_matches('/')
    }

    /// Non-blank prefixes.
    pub fn prefixes(&self) -> Vec<String> {
        self.ticket_prefix
            .to_vec()
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Configured template or `v${version}`.
    pub fn version_template(&self) -> VersionTemplate {
        self.version_template.clone().unwrap_or_default()
    }

    /// Issue-update concurrency cap.
    pub fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
            .unwrap_or(NonZeroUsize::new(DEFAULT_CONCURRENCY).unwrap_or(NonZeroUsize::MIN))
    }

    /// Check that every required setting is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host().is_empty() {
            return Err(ConfigError::MissingSetting("trackerHost"));
        }
        if self.project.trim().is_empty() {
            return Err(ConfigError::MissingSetting("project"));
        }
        if self.prefixes().is_empty() {
            return Err(ConfigError::MissingSetting("ticketPrefix"));
        }
        let template = self.version_template();
        if !template.has_placeholder() {
            return Err(ConfigError::TemplateWithoutVersion(template.as_str().to_string()));
        }
        Ok(())
    }
}

/// Tracker credentials taken from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email
    pub email: String,

    /// API token
    pub token: String,
}

impl Credentials {
    /// Read `JIRA_EMAIL` and `JIRA_TOKEN` from `env`.
    pub fn from_env(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let read = |name: &'static str| {
            env.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };
        Ok(Self {
            email: read(EMAIL_ENV)?,
            token: read(TOKEN_ENV)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PluginConfig {
        PluginConfig {
            tracker_host: "https://acme.atlassian.net/".into(),
            project: "ABC".into(),
            ticket_prefix: TicketPrefixes::One("ABC".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_single_prefix() {
        let json = r#"{"trackerHost":"https://acme.atlassian.net","project":"ABC","ticketPrefix":"ABC"}"#;
        let config: PluginConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.prefixes(), vec!["ABC".to_string()]);
        assert_eq!(config.version_template(), VersionTemplate::default());
        assert_eq!(config.concurrency().get(), 10);
        assert!(!config.enrich_issues);
    }

    #[test]
    fn test_parse_prefix_list() {
        let json = r#"{"trackerHost":"h","project":"ABC","ticketPrefixes":["ABC"," ","OPS"],"versionTemplate":"app-${version}","concurrency":3}"#;
        let config: PluginConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.prefixes(), vec!["ABC".to_string(), "OPS".to_string()]);
        assert_eq!(config.version_template().render("1.0.0"), "app-1.0.0");
        assert_eq!(config.concurrency().get(), 3);
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());
        assert_eq!(config().host(), "https://acme.atlassian.net");

        let mut missing_host = config();
        missing_host.tracker_host = "  ".into();
        assert_eq!(
            missing_host.validate(),
            Err(ConfigError::MissingSetting("trackerHost"))
        );

        let mut missing_prefix = config();
        missing_prefix.ticket_prefix = TicketPrefixes::Many(vec![]);
        assert_eq!(
            missing_prefix.validate(),
            Err(ConfigError::MissingSetting("ticketPrefix"))
        );

        let mut bad_template = config();
        bad_template.version_template = Some(VersionTemplate::new("release"));
        assert!(matches!(
            bad_template.validate(),
            Err(ConfigError::TemplateWithoutVersion(_))
        ));
    }

    #[test]
    fn test_credentials_from_env() {
        let mut env = HashMap::new();
        assert_eq!(
            Credentials::from_env(&env),
            Err(ConfigError::MissingEnv(EMAIL_ENV))
        );

        env.insert(EMAIL_ENV.to_string(), "bot@example.com".to_string());
        env.insert(TOKEN_ENV.to_string(), "".to_string());
        assert_eq!(
            Credentials::from_env(&env),
            Err(ConfigError::MissingEnv(TOKEN_ENV))
        );

        env.insert(TOKEN_ENV.to_string(), "secret".to_string());
        let creds = Credentials::from_env(&env).unwrap();
        assert_eq!(creds.email, "bot@example.com");
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
