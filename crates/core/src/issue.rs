//! Issue metadata used for release descriptions.

use serde::{Deserialize, Serialize};

use crate::id::TicketKey;

/// Longest short description kept for an issue, in characters.
pub const DESCRIPTION_LIMIT: usize = 100;

const ELLIPSIS: &str = "...";

/// Fields of an issue as reported by the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFields {
    /// Issue key
    pub key: String,

    /// Summary line
    pub summary: String,

    /// Assignee display name
    pub assignee: Option<String>,

    /// Issue type name
    pub issue_type: Option<String>,

    /// First paragraph of the description as plain text
    pub description: Option<String>,
}

/// Display-ready issue entry for release notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMetadata {
    /// Ticket key
    pub key: TicketKey,

    /// Browse link
    pub link: String,

    /// Details, when enrichment succeeded
    pub details: Option<IssueDetails>,
}

/// Fetched details of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetails {
    /// Summary line
    pub title: String,

    /// Assignee, `unassigned` when empty
    pub assignee: String,

    /// Issue type, `unknown` when empty
    pub issue_type: String,

    /// Truncated description
    pub description: String,
}

impl IssueMetadata {
    /// Key-only entry linking to the issue on `host`.
    pub fn bare(key: TicketKey, host: &str) -> Self {
        let link = browse_link(host, &key);
        Self {
            key,
            link,
            details: None,
        }
    }

    /// Entry with details taken from fetched issue fields.
    pub fn from_fields(key: TicketKey, host: &str, fields: IssueFields) -> Self {
        let link = browse_link(host, &key);
        let details = IssueDetails {
            title: fields.summary,
            assignee: non_blank(fields.assignee).unwrap_or_else(|| "unassigned".to_string()),
            issue_type: non_blank(fields.issue_type).unwrap_or_else(|| "unknown".to_string()),
            description: truncate(fields.description.as_deref().unwrap_or_default(), DESCRIPTION_LIMIT),
        };
        Self {
            key,
            link,
            details: Some(details),
        }
    }
}

/// `{host}/browse/{key}`.
pub fn browse_link(host: &str, key: &TicketKey) -> String {
    format!("{}/browse/{}", host.trim_end_matches('/'), key)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Truncate to at most `limit` characters, ending in `...` when cut.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 100), "short");
        let long = "x".repeat(150);
        let cut = truncate(&long, 100);
        assert_eq!(cut.chars().count(), 100);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "é".repeat(20);
        assert_eq!(truncate(&text, 10), format!("{}...", "é".repeat(7)));
    }

    #[test]
    fn test_from_fields_defaults() {
        let fields = IssueFields {
            key: "ABC-1".into(),
            summary: "Fix login".into(),
            assignee: Some("  ".into()),
            issue_type: None,
            description: None,
        };
        let meta = IssueMetadata::from_fields("ABC-1".into(), "https://jira.example.com/", fields);
        assert_eq!(meta.link, "https://jira.example.com/browse/ABC-1");
        let details = meta.details.unwrap();
        assert_eq!(details.assignee, "unassigned");
        assert_eq!(details.issue_type, "unknown");
        assert_eq!(details.description, "");
    }
}
