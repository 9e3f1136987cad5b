//! Release workflow errors.

use fixver_core::ConfigError;
use fixver_tracker::TrackerError;

use crate::linker::LinkError;

/// Error type for release operations.
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Fatal release-automation failures.
///
/// Tolerated link failures never appear here; they are reported as
/// [`LinkOutcome::Skipped`](crate::LinkOutcome::Skipped).
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// A required setting or secret is missing
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The ticket pattern could not be built
    #[error("invalid ticket pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The project lookup returned no id
    #[error("missing project id for project '{project}'")]
    MissingProjectId {
        /// Project key that was looked up
        project: String,
    },

    /// A tracker call outside reconciliation and linking failed
    #[error("tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// Listing or creating the release version failed
    #[error("could not find or create version '{version}': {payload}")]
    VersionReconciliation {
        /// Requested version name
        version: String,
        /// Serialized error payload
        payload: String,
        /// Underlying tracker error
        #[source]
        source: TrackerError,
    },

    /// An issue could not be attached to the version
    #[error(transparent)]
    Link(#[from] LinkError),
}

impl ReleaseError {
    /// Wrap a tracker failure met while reconciling `version`.
    pub(crate) fn reconciliation(version: &str, source: TrackerError) -> Self {
        ReleaseError::VersionReconciliation {
            version: version.to_string(),
            payload: source.payload().to_json(),
            source,
        }
    }
}
