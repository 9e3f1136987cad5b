//! fixver core data models.
//!
//! This crate defines the values that flow through a release: commits,
//! ticket keys, tracker projects and versions, and the plugin configuration.

#![warn(missing_docs)]

mod id;

// Release inputs
mod commit;
mod config;
mod context;

// Tracker-side models
mod issue;
mod project;
mod version;

// Output
mod notes;

pub use id::{ProjectId, TicketKey, VersionId};

pub use commit::{Author, Commit};
pub use config::{
    ConfigError, Credentials, PluginConfig, TicketPrefixes, DEFAULT_CONCURRENCY, EMAIL_ENV,
    TOKEN_ENV,
};
pub use context::{NextRelease, ReleaseContext};

pub use issue::{browse_link, truncate, IssueDetails, IssueFields, IssueMetadata, DESCRIPTION_LIMIT};
pub use project::{CurrentUser, Project};
pub use version::{
    NewVersion, Version, VersionTemplate, DEFAULT_VERSION_TEMPLATE, VERSION_PLACEHOLDER,
};

pub use notes::ReleaseNotes;
