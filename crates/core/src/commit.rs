//! Commit model - the raw input scanned for ticket references.

use serde::{Deserialize, Serialize};

/// A commit included in the release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash
    pub hash: String,

    /// Abbreviated hash used in log lines
    pub short: String,

    /// Full commit message
    pub message: String,

    /// Who authored the change
    pub author: Author,
}

/// Commit author identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl Commit {
    /// Create a commit; the short hash is the first seven characters of `hash`.
    pub fn new(hash: impl Into<String>, message: impl Into<String>, author: Author) -> Self {
        let hash = hash.into();
        let short = hash.chars().take(7).collect();
        Self {
            hash,
            short,
            message: message.into(),
            author,
        }
    }

    /// First line of the message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default().trim_end()
    }
}

impl Author {
    /// Create an author.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}
