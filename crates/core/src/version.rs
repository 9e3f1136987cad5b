//! Release version model - the fix-version marker in the tracker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{ProjectId, VersionId};

/// Placeholder substituted with the release's semantic version.
pub const VERSION_PLACEHOLDER: &str = "${version}";

/// Version-name template used when none is configured.
pub const DEFAULT_VERSION_TEMPLATE: &str = "v${version}";

/// A release version as known by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Tracker-assigned id
    pub id: VersionId,

    /// Version name, unique per project by policy
    pub name: String,

    /// Human-readable description
    pub description: Option<String>,

    /// Whether the version is marked released
    pub released: bool,

    /// Release date
    pub release_date: Option<NaiveDate>,

    /// Whether the version is archived
    pub archived: bool,
}

/// Fields for a version creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVersion {
    /// Version name
    pub name: String,

    /// Description
    pub description: String,

    /// Owning project
    pub project_id: ProjectId,

    /// Released flag
    pub released: bool,

    /// Release date
    pub release_date: NaiveDate,

    /// Archived flag
    pub archived: bool,

    /// Account id of the acting user, when known
    pub driver: Option<String>,
}

impl NewVersion {
    /// A version that is released today and not archived.
    pub fn released(
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            project_id,
            released: true,
            release_date: chrono::Utc::now().date_naive(),
            archived: false,
            driver: None,
        }
    }

    /// Attach the acting user's account id.
    pub fn with_driver(mut self, account_id: impl Into<String>) -> Self {
        self.driver = Some(account_id.into());
        self
    }
}

/// Template turning a semantic version into a tracker version name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTemplate(String);

impl VersionTemplate {
    /// Create a template from raw text.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the template references the version at all.
    pub fn has_placeholder(&self) -> bool {
        self.0.contains(VERSION_PLACEHOLDER)
    }

    /// Substitute every placeholder with `version`.
    pub fn render(&self, version: &str) -> String {
        self.0.replace(VERSION_PLACEHOLDER, version)
    }
}

impl Default for VersionTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_TEMPLATE)
    }
}
