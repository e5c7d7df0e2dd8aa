//! Domain entities shared across the validation engine.
//!
//! These are snapshots of platform state: fetched once per run, then handed
//! read-only to every gate and validator. Nothing in this module performs
//! I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Repository identity as `owner` plus `name`.
///
/// Equality is a case-sensitive comparison of both segments. The platform
/// echoes canonical casing back in its payloads, so comparing snapshots
/// against each other is reliable without folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meta {
    pub owner: String,
    pub name: String,
}

impl Meta {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Author of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub login: String,
    /// True when the platform marks the account as a bot.
    pub bot: bool,
}

/// One commit on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    /// True when the platform verified the commit signature.
    pub verified: bool,
}

/// An issue, as much of it as the engine needs: proof of existence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
}

/// An existing comment on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: String,
}

/// Snapshot of one pull request at check time.
///
/// Carries everything the rule set can ask about, including the commit
/// list, so that individual validators stay pure over this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Free-form body text. Empty when the author left it blank.
    pub body: String,
    /// Head branch name.
    pub branch: String,
    pub author: Author,
    pub draft: bool,
    pub closed: bool,
    /// Repository the pull request targets.
    pub repository: Meta,
    /// Commits in the pull request. Empty when the listing was unavailable;
    /// commit rules then pass vacuously rather than fail blind.
    pub commits: Vec<Commit>,
    /// Number of changed files reported by the platform.
    pub changed_files: u64,
}
