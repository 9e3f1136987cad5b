//! Release workflow - ticket extraction, version reconciliation, and
//! issue linking.
//!
//! [`ReleaseEngine`] sequences the steps for one release; the individual
//! steps are exposed for hosts that need them separately.

#![warn(missing_docs)]

pub mod error;
pub mod extractor;
pub mod limiter;
pub mod reconciler;
pub mod linker;
pub mod enrich;
pub mod verify;
pub mod engine;

#[cfg(test)]
mod mock;

pub use error::{ReleaseError, Result};
pub use extractor::{extract_tickets, Scan, TicketExtractor, TicketSet};
pub use limiter::ConcurrencyLimit;
pub use reconciler::{find_or_create_version, resolve_project_id};
pub use linker::{classify, link_issue_to_version, Disposition, LinkError, LinkOutcome, TOLERATED_STATUSES};
pub use enrich::{bare_metadata, fetch_issue_metadata};
pub use verify::{verify_conditions, verify_project};
pub use engine::{ReleaseEngine, ReleasePlan, RunReport};
