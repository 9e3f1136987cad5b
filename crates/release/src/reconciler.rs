//! Project resolution and find-or-create of the release version.

use fixver_core::{NewVersion, ProjectId, Version};
use fixver_tracker::Tracker;
use tracing::{error, info, warn};

use crate::error::{ReleaseError, Result};

/// Resolve a project key to the id the version API needs.
pub async fn resolve_project_id(tracker: &dyn Tracker, project_key: &str) -> Result<ProjectId> {
    let project = tracker.get_project(project_key).await?;
    let Some(id) = project.id else {
        return Err(ReleaseError::MissingProjectId {
            project: project_key.to_string(),
        });
    };
    info!("Resolved project {} ({}), id: {}", project.name, project.key, id);
    Ok(id)
}

/// Return the project's version named `name`, creating it if absent.
///
/// Names compare exactly. A created version is released today and carries
/// the acting user as driver when the tracker can tell who that is.
pub async fn find_or_create_version(
    tracker: &dyn Tracker,
    project_id: &ProjectId,
    name: &str,
    description: &str,
) -> Result<Version> {
    let versions = tracker
        .get_project_versions(project_id)
        .await
        .map_err(|e| ReleaseError::reconciliation(name, e))?;

    if let Some(existing) = versions.into_iter().find(|v| v.name == name) {
        info!("Found existing release '{}' with id: {}", existing.name, existing.id);
        return Ok(existing);
    }

    info!(
        "Creating new version in project {}, version name: {}",
        project_id, name
    );

    let mut fields = NewVersion::released(project_id.clone(), name, description);
    match tracker.get_current_user().await {
        Ok(user) => {
            info!(
                outcome = "success",
                "Caller info acquired '{} / {}'",
                user.name,
                user.email.as_deref().unwrap_or("-")
            );
            fields = fields.with_driver(user.account_id);
        }
        Err(e) => warn!("Could not identify the acting user, creating without driver: {}", e),
    }

    let version = tracker.create_version(&fields).await.map_err(|e| {
        let err = ReleaseError::reconciliation(name, e);
        error!("{}", err);
        err
    })?;

    info!(outcome = "success", "Created new version {}", version.id);
    Ok(version)
}
