//! Issue tracker abstraction and the Jira REST implementation.
//!
//! The release workflow only depends on the [`Tracker`] trait; [`JiraClient`]
//! is the production backend.

#![warn(missing_docs)]

pub mod trait_;
pub mod payload;
pub mod jira;

pub use trait_::{IssuePatch, Result, Tracker, TrackerError};
pub use payload::ErrorPayload;
pub use jira::JiraClient;
