//! Project and user models - tracker-side context for a release.

use serde::{Deserialize, Serialize};

use crate::id::ProjectId;

/// A tracker project resolved from its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Tracker-assigned id; absent when the tracker returns none
    pub id: Option<ProjectId>,

    /// Project key, e.g. `ABC`
    pub key: String,

    /// Display name
    pub name: String,
}

/// The account the tracker client is authenticated as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account id
    pub account_id: String,

    /// Display name
    pub name: String,

    /// Email address, if visible
    pub email: Option<String>,
}
