//! Ticket extraction from commit messages.

use fixver_core::{Commit, TicketKey};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Ticket keys in first-seen order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSet {
    keys: Vec<TicketKey>,
    seen: HashSet<TicketKey>,
}

impl TicketSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key; returns `false` if it was already present.
    pub fn insert(&mut self, key: TicketKey) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.keys.push(key);
        true
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &TicketKey) -> bool {
        self.seen.contains(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TicketKey> {
        self.keys.iter()
    }

    /// Keys as a slice.
    pub fn as_slice(&self) -> &[TicketKey] {
        &self.keys
    }
}

impl FromIterator<TicketKey> for TicketSet {
    fn from_iter<I: IntoIterator<Item = TicketKey>>(iter: I) -> Self {
        let mut set = TicketSet::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TicketSet {
    type Item = &'a TicketKey;
    type IntoIter = std::slice::Iter<'a, TicketKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Result of scanning a release's commits.
#[derive(Debug, Clone)]
pub struct Scan<'c> {
    /// Tickets mentioned anywhere
    pub tickets: TicketSet,

    /// Commits that mention no ticket
    pub unlinked: Vec<&'c Commit>,
}

/// Matches ticket keys for a fixed set of prefixes.
#[derive(Debug, Clone)]
pub struct TicketExtractor {
    /// `None` when no prefix is configured
    pattern: Option<Regex>,
}

impl TicketExtractor {
    /// Build a case-insensitive matcher for `<PREFIX>-<digits>`.
    ///
    /// Prefixes are matched literally. Word boundaries are ASCII, so a key
    /// directly next to a non-ASCII letter still matches.
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = prefixes
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = Regex::new(&format!(
            r"(?i)(?-u:\b)(?:{})-[0-9]+(?-u:\b)",
            alternatives.join("|")
        ))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Ticket keys in `text`, verbatim, in order of appearance.
    pub fn find_in<'t>(&'t self, text: &'t str) -> impl Iterator<Item = TicketKey> + 't {
        self.pattern
            .iter()
            .flat_map(move |re| re.find_iter(text))
            .map(|m| TicketKey::new(m.as_str()))
    }

    /// Deduplicated tickets mentioned across `commits`.
    pub fn extract(&self, commits: &[Commit]) -> TicketSet {
        self.scan(commits).tickets
    }

    /// Tickets plus the commits that mention none.
    pub fn scan<'c>(&self, commits: &'c [Commit]) -> Scan<'c> {
        let mut tickets = TicketSet::new();
        let mut unlinked = Vec::new();

        for commit in commits {
            let mut mentioned = false;
            for key in self.find_in(&commit.message) {
                mentioned = true;
                if tickets.contains(&key) {
                    debug!("Ticket {} mentioned again in {}", key, commit.short);
                    continue;
                }
                info!(ticket = %key, commit = %commit.short, "Found ticket in commit");
                tickets.insert(key);
            }
            if !mentioned {
                unlinked.push(commit);
            }
        }

        Scan { tickets, unlinked }
    }
}

/// Deduplicated tickets for a single prefix.
pub fn extract_tickets(prefix: &str, commits: &[Commit]) -> TicketSet {
    match TicketExtractor::new(&[prefix]) {
        Ok(extractor) => extractor.extract(commits),
        Err(e) => {
            warn!("Cannot build ticket pattern for prefix '{}': {}", prefix, e);
            TicketSet::new()
        }
    }
}
