//! Attaching issues to a release version.

use fixver_core::{TicketKey, VersionId};
use fixver_tracker::{ErrorPayload, IssuePatch, Tracker};
use tracing::{error, info};

/// Statuses meaning the issue is already linked or cannot be found.
pub const TOLERATED_STATUSES: [u16; 2] = [400, 404];

/// Result of a link attempt that did not fail the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The version was added to the issue's fix versions
    Linked,
    /// The tracker rejected the update with a tolerated status
    Skipped {
        /// Rejection status
        status: u16,
    },
}

/// How a link failure affects the release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Logged and ignored
    Tolerated(u16),
    /// Fails the release
    Fatal,
}

/// Decide whether a failure is tolerated.
///
/// Unclassified payloads are fatal: without a status they cannot be shown
/// to be harmless.
pub fn classify(payload: &ErrorPayload) -> Disposition {
    match payload.status() {
        Some(status) if TOLERATED_STATUSES.contains(&status) => Disposition::Tolerated(status),
        _ => Disposition::Fatal,
    }
}

/// An issue could not be attached to the release version.
#[derive(Debug, Clone, thiserror::Error)]
#[error("issue '{ticket}' was not added to release {version_id}: {payload}")]
pub struct LinkError {
    /// Issue that failed
    pub ticket: TicketKey,
    /// Version it should have been added to
    pub version_id: VersionId,
    /// Classified tracker failure
    pub payload: ErrorPayload,
}

/// Add `version_id` to the fix versions of `ticket`.
pub async fn link_issue_to_version(
    tracker: &dyn Tracker,
    ticket: &TicketKey,
    version_id: &VersionId,
) -> Result<LinkOutcome, LinkError> {
    info!("Adding issue '{}' to release '{}'", ticket, version_id);

    let patch = IssuePatch::add_fix_version(version_id);
    let Err(err) = tracker.edit_issue(ticket, &patch).await else {
        info!(ticket = %ticket, outcome = "complete", "Issue was added to the release");
        return Ok(LinkOutcome::Linked);
    };

    let payload = err.payload();
    match classify(&payload) {
        Disposition::Tolerated(status) => {
            info!(
                ticket = %ticket,
                status,
                "Issue was not added to the release, skipping"
            );
            Ok(LinkOutcome::Skipped { status })
        }
        Disposition::Fatal => {
            error!(ticket = %ticket, payload = %payload.to_json(), "Issue was not added to the release");
            Err(LinkError {
                ticket: ticket.clone(),
                version_id: version_id.clone(),
                payload,
            })
        }
    }
}
