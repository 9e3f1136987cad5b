//! Tracker trait abstraction.

use async_trait::async_trait;
use fixver_core::{
    CurrentUser, IssueFields, NewVersion, Project, ProjectId, TicketKey, Version, VersionId,
};
use serde_json::{json, Value};

use crate::payload::ErrorPayload;

/// Error type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur while talking to the tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with a non-success status
    #[error("tracker responded with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reported as opaque text
    #[error("{0}")]
    Other(String),
}

impl TrackerError {
    /// Classify this error into a typed payload.
    pub fn payload(&self) -> ErrorPayload {
        match self {
            TrackerError::Status { status, body } => ErrorPayload::Classified {
                status: *status,
                body: body.clone(),
            },
            TrackerError::Http(e) => match e.status() {
                Some(status) => ErrorPayload::Classified {
                    status: status.as_u16(),
                    body: e.to_string(),
                },
                None => ErrorPayload::Unclassified { raw: e.to_string() },
            },
            TrackerError::Json(e) => ErrorPayload::Unclassified { raw: e.to_string() },
            TrackerError::Other(text) => ErrorPayload::parse(text),
        }
    }
}

/// An additive update to one collection field of an issue.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuePatch {
    /// Field name, e.g. `fixVersions`
    pub field: String,

    /// Values to add to the collection
    pub add: Vec<Value>,
}

impl IssuePatch {
    /// Add `version` to the issue's fix versions.
    pub fn add_fix_version(version: &VersionId) -> Self {
        Self {
            field: "fixVersions".to_string(),
            add: vec![json!({ "id": version.as_str() })],
        }
    }

    /// Request body in the tracker's `update` form.
    pub fn to_body(&self) -> Value {
        let operations: Vec<Value> = self.add.iter().map(|v| json!({ "add": v })).collect();
        json!({ "update": { self.field.as_str(): operations } })
    }
}

/// Issue tracker operations used by the release workflow.
///
/// `JiraClient` talks to a real instance; tests plug in an in-memory tracker.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Load a project by key.
    async fn get_project(&self, key: &str) -> Result<Project>;

    /// List every version of a project.
    async fn get_project_versions(&self, project: &ProjectId) -> Result<Vec<Version>>;

    /// Create a version.
    async fn create_version(&self, fields: &NewVersion) -> Result<Version>;

    /// Load an issue's display fields.
    async fn get_issue(&self, key: &TicketKey) -> Result<IssueFields>;

    /// Apply an additive patch to an issue.
    async fn edit_issue(&self, key: &TicketKey, patch: &IssuePatch) -> Result<()>;

    /// Identify the authenticated account.
    async fn get_current_user(&self) -> Result<CurrentUser>;
}
