//! Commit collection from a local git repository.

use anyhow::{Context, Result};
use fixver_core::{Author, Commit};
use git2::{Repository, Sort};
use std::path::Path;
use tracing::debug;

/// Commits reachable from `to` but not from `from`, newest first.
pub fn collect_commits(repo_path: &Path, from: Option<&str>, to: &str) -> Result<Vec<Commit>> {
    let repo = Repository::discover(repo_path)
        .with_context(|| format!("No git repository at {}", repo_path.display()))?;

    let mut walk = repo.revwalk()?;
    walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

    let head = repo
        .revparse_single(to)
        .with_context(|| format!("Unknown revision '{}'", to))?
        .peel_to_commit()?;
    walk.push(head.id())?;

    if let Some(from) = from {
        let base = repo
            .revparse_single(from)
            .with_context(|| format!("Unknown revision '{}'", from))?
            .peel_to_commit()?;
        walk.hide(base.id())?;
    }

    let mut commits = Vec::new();
    for oid in walk {
        let commit = repo.find_commit(oid?)?;
        let author = commit.author();
        commits.push(Commit::new(
            commit.id().to_string(),
            commit.message().unwrap_or_default(),
            Author::new(
                author.name().unwrap_or_default(),
                author.email().unwrap_or_default(),
            ),
        ));
    }

    debug!("Collected {} commits from {}", commits.len(), repo_path.display());
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Signature};
    use tempfile::TempDir;

    fn commit(repo: &Repository, message: &str) -> Oid {
        let sig = Signature::now("Ada", "ada@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_collect_range() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let base = commit(&repo, "chore: initial");
        commit(&repo, "feat: login ABC-1");
        commit(&repo, "fix: crash ABC-2\n\nbody");

        let all = collect_commits(dir.path(), None, "HEAD").unwrap();
        assert_eq!(all.len(), 3);

        let range = collect_commits(dir.path(), Some(&base.to_string()), "HEAD").unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[0].subject(), "fix: crash ABC-2");
        assert_eq!(range[1].author.name, "Ada");
        assert_eq!(range[1].short.len(), 7);
    }

    #[test]
    fn test_unknown_revision() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit(&repo, "chore: initial");

        let err = collect_commits(dir.path(), Some("v9.9.9"), "HEAD").unwrap_err();
        assert!(err.to_string().contains("v9.9.9"));
    }
}
