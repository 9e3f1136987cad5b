//! Preflight checks run before a release.

use fixver_core::{Credentials, PluginConfig, ProjectId};
use fixver_tracker::Tracker;
use std::collections::HashMap;
use tracing::info;

use crate::error::Result;
use crate::reconciler::resolve_project_id;

/// Validate configuration and read tracker credentials from `env`.
pub fn verify_conditions(config: &PluginConfig, env: &HashMap<String, String>) -> Result<Credentials> {
    info!("Checking release conditions");
    config.validate()?;
    Ok(Credentials::from_env(env)?)
}

/// Confirm the configured project exists and has an id.
pub async fn verify_project(tracker: &dyn Tracker, config: &PluginConfig) -> Result<ProjectId> {
    let id = resolve_project_id(tracker, config.project.trim()).await?;
    info!(outcome = "success", "Project {} is reachable", config.project);
    Ok(id)
}
