//! Issue metadata for the release description.

use fixver_core::{IssueMetadata, TicketKey};
use fixver_tracker::Tracker;
use tracing::{info, warn};

use crate::extractor::TicketSet;
use crate::limiter::ConcurrencyLimit;

/// Key-only entries for every ticket.
pub fn bare_metadata(host: &str, tickets: &TicketSet) -> Vec<IssueMetadata> {
    tickets
        .iter()
        .map(|key| IssueMetadata::bare(key.clone(), host))
        .collect()
}

/// Fetch details for each ticket, at most `limit` lookups at a time.
///
/// Lookups are best-effort: a failed lookup leaves a key-only entry.
pub async fn fetch_issue_metadata(
    tracker: &dyn Tracker,
    host: &str,
    tickets: &TicketSet,
    limit: &ConcurrencyLimit,
) -> Vec<IssueMetadata> {
    limit
        .run_all(tickets.iter().map(|key| fetch_one(tracker, host, key)))
        .await
}

async fn fetch_one(tracker: &dyn Tracker, host: &str, key: &TicketKey) -> IssueMetadata {
    info!("Loading info for issue {}", key);
    match tracker.get_issue(key).await {
        Ok(fields) => IssueMetadata::from_fields(key.clone(), host, fields),
        Err(e) => {
            warn!("Could not load issue {}, listing it without details: {}", key, e);
            IssueMetadata::bare(key.clone(), host)
        }
    }
}
