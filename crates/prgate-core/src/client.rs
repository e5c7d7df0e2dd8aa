//! GitHub client boundary.
//!
//! The engine only ever talks to this trait. The REST implementation lives
//! in the `prgate-github` crate; tests use the in-memory double from
//! [`crate::fakes`].

use async_trait::async_trait;

use crate::entity::{Comment, Commit, Issue, Meta, PullRequest};
use crate::error::ClientError;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Read and write operations against the hosting platform.
///
/// Lookup methods distinguish "the thing does not exist" from "the lookup
/// failed": the former is a definite answer, the latter means the engine
/// has no evidence and must not penalize the pull request.
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Fetches the full pull request snapshot, including its commit list.
    /// A failed commit listing degrades the snapshot to an empty commit
    /// list instead of failing the fetch.
    async fn pull_request(&self, repo: &Meta, number: u64) -> ClientResult<PullRequest>;

    /// Lists the commits of a pull request.
    async fn commits(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Commit>>;

    /// Looks up a single issue. `Ok(None)` means the issue does not exist
    /// or is not visible to the token; `Err` means the lookup itself
    /// failed.
    async fn issue(&self, repo: &Meta, number: u64) -> ClientResult<Option<Issue>>;

    /// Repositories referenced by the platform's native cross-reference
    /// tracking for this pull request.
    async fn issue_references(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Meta>>;

    /// Lists issue comments on a pull request.
    async fn comments(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Comment>>;

    /// Posts a new comment on a pull request.
    async fn create_comment(&self, repo: &Meta, number: u64, body: &str) -> ClientResult<()>;

    /// Replaces the body of an existing comment.
    async fn update_comment(&self, repo: &Meta, comment_id: u64, body: &str) -> ClientResult<()>;

    /// Adds a label to a pull request.
    async fn add_label(&self, repo: &Meta, number: u64, label: &str) -> ClientResult<()>;

    /// Removes a label from a pull request. Removing a label that is not
    /// present is not an error.
    async fn remove_label(&self, repo: &Meta, number: u64, label: &str) -> ClientResult<()>;
}
