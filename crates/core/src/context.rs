//! Release context handed over by the pipeline host.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::commit::Commit;

/// The release being published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRelease {
    /// Semantic version string, e.g. `1.2.0`
    pub version: String,

    /// Git tag, when the host created one
    pub git_tag: Option<String>,
}

impl NextRelease {
    /// Release for `version` without a tag.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            git_tag: None,
        }
    }
}

/// Everything a release step sees from its host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseContext {
    /// Environment variables
    pub env: HashMap<String, String>,

    /// Commits included in this release
    pub commits: Vec<Commit>,

    /// The release being published
    pub next_release: NextRelease,
}

impl ReleaseContext {
    /// Context with an empty environment.
    pub fn new(next_release: NextRelease, commits: Vec<Commit>) -> Self {
        Self {
            env: HashMap::new(),
            commits,
            next_release,
        }
    }

    /// Replace the environment.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }
}
