//! In-memory fake of the GitHub client, for tests.
//!
//! Canned state is installed through the builder methods before the fake
//! is shared; side effects (comments, labels) are recorded behind mutexes
//! for later assertion. Failure toggles simulate platform outages per
//! lookup family so the tolerance policy can be exercised without a
//! network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ClientResult, GithubClient};
use crate::entity::{Comment, Commit, Issue, Meta, PullRequest};
use crate::error::ClientError;

type Key = (Meta, u64);

#[derive(Default)]
pub struct FakeGithubClient {
    pull_requests: HashMap<Key, PullRequest>,
    commits: HashMap<Key, Vec<Commit>>,
    issues: HashMap<Key, Issue>,
    references: HashMap<Key, Vec<Meta>>,
    comments: HashMap<Key, Vec<Comment>>,
    fail_commits: bool,
    fail_issues: bool,
    fail_references: bool,
    created: Mutex<Vec<(u64, String)>>,
    updated: Mutex<Vec<(u64, String)>>,
    added: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
}

impl FakeGithubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a pull request and seeds its commit listing from the
    /// snapshot. [`with_commits`](Self::with_commits) overrides the seed.
    pub fn with_pull_request(mut self, pull_request: PullRequest) -> Self {
        let key = (pull_request.repository.clone(), pull_request.number);
        self.commits.insert(key.clone(), pull_request.commits.clone());
        self.pull_requests.insert(key, pull_request);
        self
    }

    /// Replaces the commit listing served for a pull request.
    pub fn with_commits(mut self, repo: &Meta, number: u64, commits: Vec<Commit>) -> Self {
        self.commits.insert((repo.clone(), number), commits);
        self
    }

    /// Registers an issue as existing and reachable.
    pub fn with_issue(mut self, repo: &Meta, number: u64) -> Self {
        self.issues.insert(
            (repo.clone(), number),
            Issue {
                number,
                title: format!("issue {number}"),
            },
        );
        self
    }

    pub fn with_references(mut self, repo: &Meta, number: u64, references: Vec<Meta>) -> Self {
        self.references.insert((repo.clone(), number), references);
        self
    }

    pub fn with_comments(mut self, repo: &Meta, number: u64, comments: Vec<Comment>) -> Self {
        self.comments.insert((repo.clone(), number), comments);
        self
    }

    /// Makes every commit listing fail.
    pub fn failing_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Makes every issue lookup fail.
    pub fn failing_issues(mut self) -> Self {
        self.fail_issues = true;
        self
    }

    /// Makes every cross-reference lookup fail.
    pub fn failing_references(mut self) -> Self {
        self.fail_references = true;
        self
    }

    /// Bodies of comments created through this fake, in order.
    pub fn created_comments(&self) -> Vec<String> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }

    /// `(comment_id, body)` pairs of comment updates, in order.
    pub fn updated_comments(&self) -> Vec<(u64, String)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn added_labels(&self) -> Vec<String> {
        self.added.lock().unwrap().clone()
    }

    pub fn removed_labels(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }

    fn outage(what: &str) -> ClientError {
        ClientError::Http(format!("simulated {what} outage"))
    }
}

#[async_trait]
impl GithubClient for FakeGithubClient {
    async fn pull_request(&self, repo: &Meta, number: u64) -> ClientResult<PullRequest> {
        let mut pull_request = self
            .pull_requests
            .get(&(repo.clone(), number))
            .cloned()
            .ok_or_else(|| ClientError::Status {
                status: 404,
                message: "pull request not found".to_string(),
            })?;
        // Same snapshot contract as the REST client: a failed commit
        // listing degrades to an empty commit list.
        pull_request.commits = self.commits(repo, number).await.unwrap_or_default();
        Ok(pull_request)
    }

    async fn commits(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Commit>> {
        if self.fail_commits {
            return Err(Self::outage("commit listing"));
        }
        Ok(self
            .commits
            .get(&(repo.clone(), number))
            .cloned()
            .unwrap_or_default())
    }

    async fn issue(&self, repo: &Meta, number: u64) -> ClientResult<Option<Issue>> {
        if self.fail_issues {
            return Err(Self::outage("issue lookup"));
        }
        Ok(self.issues.get(&(repo.clone(), number)).cloned())
    }

    async fn issue_references(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Meta>> {
        if self.fail_references {
            return Err(Self::outage("cross-reference lookup"));
        }
        Ok(self
            .references
            .get(&(repo.clone(), number))
            .cloned()
            .unwrap_or_default())
    }

    async fn comments(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Comment>> {
        Ok(self
            .comments
            .get(&(repo.clone(), number))
            .cloned()
            .unwrap_or_default())
    }

    async fn create_comment(&self, _repo: &Meta, number: u64, body: &str) -> ClientResult<()> {
        self.created.lock().unwrap().push((number, body.to_string()));
        Ok(())
    }

    async fn update_comment(&self, _repo: &Meta, comment_id: u64, body: &str) -> ClientResult<()> {
        self.updated
            .lock()
            .unwrap()
            .push((comment_id, body.to_string()));
        Ok(())
    }

    async fn add_label(&self, _repo: &Meta, _number: u64, label: &str) -> ClientResult<()> {
        self.added.lock().unwrap().push(label.to_string());
        Ok(())
    }

    async fn remove_label(&self, _repo: &Meta, _number: u64, label: &str) -> ClientResult<()> {
        self.removed.lock().unwrap().push(label.to_string());
        Ok(())
    }
}
