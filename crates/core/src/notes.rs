//! Release description rendering.

use std::fmt::Write;

use crate::commit::Commit;
use crate::issue::IssueMetadata;

/// Inputs of a release description.
#[derive(Debug, Clone)]
pub struct ReleaseNotes<'a> {
    /// Tracker version name
    pub version_name: &'a str,

    /// Issues linked to the version
    pub issues: &'a [IssueMetadata],

    /// Commits that reference no issue
    pub unlinked_commits: &'a [&'a Commit],
}

impl ReleaseNotes<'_> {
    /// Render the fixed Markdown description.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# Release notes - {}", self.version_name)?;
        writeln!(out)?;
        writeln!(out, "## Issues:")?;
        for issue in self.issues {
            match &issue.details {
                Some(d) => {
                    writeln!(
                        out,
                        " - [{}] [{}]({}) {}",
                        d.issue_type, issue.key, issue.link, d.title
                    )?;
                    writeln!(out, "   - Short description: {}", d.description)?;
                    writeln!(out, "   - Assigned to: {}", d.assignee)?;
                }
                None => writeln!(out, " - [{}]({})", issue.key, issue.link)?,
            }
        }
        writeln!(out)?;
        writeln!(out, "## Commits not relevant to any Issue:")?;
        for commit in self.unlinked_commits {
            writeln!(out, " - {}", commit.subject())?;
            writeln!(out, "   - Committed by: {}", commit.author.name)?;
        }
        writeln!(out)?;
        write!(out, "Release notes were automatically generated")
    }
}
