//! The release engine - runs the fix-version workflow for one release.

use fixver_core::{Commit, IssueMetadata, PluginConfig, ReleaseContext, ReleaseNotes, TicketKey, Version};
use fixver_tracker::Tracker;
use std::sync::Arc;
use tracing::{error, info};

use crate::enrich::{bare_metadata, fetch_issue_metadata};
use crate::error::Result;
use crate::extractor::{TicketExtractor, TicketSet};
use crate::limiter::ConcurrencyLimit;
use crate::linker::{link_issue_to_version, LinkOutcome};
use crate::reconciler::{find_or_create_version, resolve_project_id};

/// What a release will do, computed without contacting the tracker.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    /// Tickets mentioned by the release's commits
    pub tickets: TicketSet,

    /// Tracker version name
    pub version_name: String,

    /// Commits that mention no ticket
    pub unlinked_commits: Vec<Commit>,
}

impl ReleasePlan {
    /// Scan the context's commits and name the version.
    pub fn build(config: &PluginConfig, context: &ReleaseContext) -> Result<Self> {
        let prefixes = config.prefixes();
        let extractor = TicketExtractor::new(prefixes.as_slice())?;
        let scan = extractor.scan(&context.commits);
        let version_name = config
            .version_template()
            .render(&context.next_release.version);

        Ok(Self {
            tickets: scan.tickets,
            version_name,
            unlinked_commits: scan.unlinked.into_iter().cloned().collect(),
        })
    }

    /// Render the release description for `issues`.
    pub fn description(&self, issues: &[IssueMetadata]) -> String {
        let unlinked: Vec<&Commit> = self.unlinked_commits.iter().collect();
        ReleaseNotes {
            version_name: &self.version_name,
            issues,
            unlinked_commits: &unlinked,
        }
        .render()
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The version issues were attached to
    pub version: Version,

    /// Issues now carrying the version
    pub linked: Vec<TicketKey>,

    /// Issues skipped with a tolerated status
    pub skipped: Vec<(TicketKey, u16)>,
}

/// The release engine.
///
/// Runs the workflow:
/// ```text
/// Extract tickets → Resolve project → Find or create version → Link issues
/// ```
pub struct ReleaseEngine {
    tracker: Arc<dyn Tracker>,
    config: PluginConfig,
    limit: ConcurrencyLimit,
}

impl ReleaseEngine {
    /// Create an engine; the link concurrency comes from `config`.
    pub fn new(tracker: Arc<dyn Tracker>, config: PluginConfig) -> Self {
        let limit = ConcurrencyLimit::new(config.concurrency());
        Self {
            tracker,
            config,
            limit,
        }
    }

    /// Scan commits and name the version.
    pub fn plan(&self, context: &ReleaseContext) -> Result<ReleasePlan> {
        ReleasePlan::build(&self.config, context)
    }

    /// Run the workflow for one release.
    ///
    /// Every link attempt settles before a link failure is reported; the
    /// first fatal failure in ticket order is returned.
    pub async fn run(&self, context: &ReleaseContext) -> Result<RunReport> {
        let tracker: &dyn Tracker = &*self.tracker;
        let plan = self.plan(context)?;
        info!(
            "Found {} tickets in {} commits",
            plan.tickets.len(),
            context.commits.len()
        );

        // Enrichment needs only the deduplicated keys.
        let issues = if self.config.enrich_issues {
            fetch_issue_metadata(tracker, self.config.host(), &plan.tickets, &self.limit).await
        } else {
            bare_metadata(self.config.host(), &plan.tickets)
        };
        let description = plan.description(&issues);
        info!("Using release '{}'", plan.version_name);

        let project_id = resolve_project_id(tracker, self.config.project.trim()).await?;
        info!(
            "Attempting to create new version for project {}, id: {}",
            self.config.project, project_id
        );
        let version =
            find_or_create_version(tracker, &project_id, &plan.version_name, &description).await?;

        let results = self
            .limit
            .run_all(
                plan.tickets
                    .iter()
                    .map(|ticket| link_issue_to_version(tracker, ticket, &version.id)),
            )
            .await;

        let mut report = RunReport {
            version,
            linked: Vec::new(),
            skipped: Vec::new(),
        };
        let mut failures = Vec::new();
        for (ticket, result) in plan.tickets.iter().zip(results) {
            match result {
                Ok(LinkOutcome::Linked) => report.linked.push(ticket.clone()),
                Ok(LinkOutcome::Skipped { status }) => report.skipped.push((ticket.clone(), status)),
                Err(e) => failures.push(e),
            }
        }

        let failed = failures.len();
        if let Some(first) = failures.into_iter().next() {
            error!(
                "Release '{}' failed: {} linked, {} skipped, {} failed",
                report.version.name,
                report.linked.len(),
                report.skipped.len(),
                failed
            );
            return Err(first.into());
        }

        info!(
            outcome = "success",
            "Release '{}' done: {} linked, {} skipped",
            report.version.name,
            report.linked.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
