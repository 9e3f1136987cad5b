//! In-memory tracker for tests.

use async_trait::async_trait;
use fixver_core::{
    CurrentUser, IssueFields, NewVersion, Project, ProjectId, TicketKey, Version, VersionId,
};
use fixver_tracker::{IssuePatch, Result, Tracker, TrackerError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Failure {
    Status(u16),
    Text(String),
}

impl Failure {
    fn to_error(&self) -> TrackerError {
        match self {
            Failure::Status(status) => TrackerError::Status {
                status: *status,
                body: format!("{{\"errorMessages\":[\"status {}\"]}}", status),
            },
            Failure::Text(text) => TrackerError::Other(text.clone()),
        }
    }
}

/// Tracker backed by in-memory state.
pub struct MockTracker {
    project: Project,
    versions: Mutex<Vec<Version>>,
    next_id: AtomicUsize,
    created: Mutex<Vec<NewVersion>>,
    linked: Mutex<Vec<(TicketKey, VersionId)>>,
    edit_attempts: AtomicUsize,
    edit_failures: HashMap<String, Failure>,
    issues: HashMap<String, IssueFields>,
    issue_lookups: AtomicUsize,
    list_fails: AtomicBool,
    create_fails: AtomicBool,
    user_fails: AtomicBool,
    edit_delay: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTracker {
    pub fn new() -> Self {
        Self {
            project: Project {
                id: Some(ProjectId::new("10000")),
                key: "ABC".into(),
                name: "Alpha".into(),
            },
            versions: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            created: Mutex::new(Vec::new()),
            linked: Mutex::new(Vec::new()),
            edit_attempts: AtomicUsize::new(0),
            edit_failures: HashMap::new(),
            issues: HashMap::new(),
            issue_lookups: AtomicUsize::new(0),
            list_fails: AtomicBool::new(false),
            create_fails: AtomicBool::new(false),
            user_fails: AtomicBool::new(false),
            edit_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.project = project;
        self
    }

    pub fn with_version(self, name: &str) -> Self {
        let id = self.allocate_id();
        self.lock_versions().push(Version {
            id,
            name: name.to_string(),
            description: None,
            released: true,
            release_date: None,
            archived: false,
        });
        self
    }

    pub fn with_issue(mut self, fields: IssueFields) -> Self {
        self.issues.insert(fields.key.clone(), fields);
        self
    }

    pub fn with_edit_delay(mut self, delay: Duration) -> Self {
        self.edit_delay = delay;
        self
    }

    pub fn fail_edit_with_status(mut self, key: &str, status: u16) -> Self {
        self.edit_failures.insert(key.to_string(), Failure::Status(status));
        self
    }

    pub fn fail_edit_with_text(mut self, key: &str, text: &str) -> Self {
        self.edit_failures
            .insert(key.to_string(), Failure::Text(text.to_string()));
        self
    }

    pub fn fail_list_versions(self) -> Self {
        self.list_fails.store(true, Ordering::SeqCst);
        self
    }

    pub fn fail_create_version(self) -> Self {
        self.create_fails.store(true, Ordering::SeqCst);
        self
    }

    pub fn fail_current_user(self) -> Self {
        self.user_fails.store(true, Ordering::SeqCst);
        self
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn created(&self) -> Vec<NewVersion> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn linked(&self) -> Vec<(TicketKey, VersionId)> {
        self.linked.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn edit_attempts(&self) -> usize {
        self.edit_attempts.load(Ordering::SeqCst)
    }

    pub fn issue_lookups(&self) -> usize {
        self.issue_lookups.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn allocate_id(&self) -> VersionId {
        VersionId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string())
    }

    fn lock_versions(&self) -> std::sync::MutexGuard<'_, Vec<Version>> {
        self.versions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Tracker for MockTracker {
    async fn get_project(&self, _key: &str) -> Result<Project> {
        Ok(self.project.clone())
    }

    async fn get_project_versions(&self, _project: &ProjectId) -> Result<Vec<Version>> {
        if self.list_fails.load(Ordering::SeqCst) {
            return Err(Failure::Status(503).to_error());
        }
        Ok(self.lock_versions().clone())
    }

    async fn create_version(&self, fields: &NewVersion) -> Result<Version> {
        if let Ok(mut created) = self.created.lock() {
            created.push(fields.clone());
        }
        if self.create_fails.load(Ordering::SeqCst) {
            return Err(Failure::Status(500).to_error());
        }
        let version = Version {
            id: self.allocate_id(),
            name: fields.name.clone(),
            description: Some(fields.description.clone()),
            released: fields.released,
            release_date: Some(fields.release_date),
            archived: fields.archived,
        };
        self.lock_versions().push(version.clone());
        Ok(version)
    }

    async fn get_issue(&self, key: &TicketKey) -> Result<IssueFields> {
        self.issue_lookups.fetch_add(1, Ordering::SeqCst);
        self.issues
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| Failure::Status(404).to_error())
    }

    async fn edit_issue(&self, key: &TicketKey, patch: &IssuePatch) -> Result<()> {
        self.edit_attempts.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.edit_delay.is_zero() {
            tokio::time::sleep(self.edit_delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(failure) = self.edit_failures.get(key.as_str()) {
            return Err(failure.to_error());
        }

        let version_id = patch
            .add
            .first()
            .and_then(|v| v.get("id"))
            .and_then(|id| id.as_str())
            .map(VersionId::new)
            .ok_or_else(|| TrackerError::Other("patch without version id".into()))?;
        if let Ok(mut linked) = self.linked.lock() {
            linked.push((key.clone(), version_id));
        }
        Ok(())
    }

    async fn get_current_user(&self) -> Result<CurrentUser> {
        if self.user_fails.load(Ordering::SeqCst) {
            return Err(Failure::Status(401).to_error());
        }
        Ok(CurrentUser {
            account_id: "acc-release-bot".into(),
            name: "Release Bot".into(),
            email: Some("bot@example.com".into()),
        })
    }
}
