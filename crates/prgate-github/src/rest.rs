//! REST implementation of the GitHub client boundary.
//!
//! One thin method per endpoint, plus shared request plumbing. Error
//! mapping is deliberate: transport problems become [`ClientError::Http`],
//! non-success statuses [`ClientError::Status`] and body decoding problems
//! [`ClientError::Decode`]. The engine decides what those mean for a rule;
//! this layer only reports them faithfully.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use prgate_core::client::{ClientResult, GithubClient};
use prgate_core::config::Config;
use prgate_core::entity::{Comment, Commit, Issue, Meta, PullRequest};
use prgate_core::error::ClientError;

use crate::payload::{
    CommentPayload, CommitPayload, IssuePayload, PullRequestPayload, TimelineEventPayload,
};

const USER_AGENT: &str = concat!("prgate/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub v3 REST client.
///
/// Works against github.com and GitHub Enterprise alike; the base URL
/// comes from the configuration and already carries its trailing slash.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl RestClient {
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.token.clone())
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|error| ClientError::Http(format!("invalid endpoint {path}: {error}")))
    }

    /// Endpoint for one label on one issue. The label is percent-encoded
    /// as a single path segment; GitHub label names may contain `/`, `#`
    /// and spaces.
    fn label_endpoint(&self, repo: &Meta, number: u64, label: &str) -> ClientResult<Url> {
        let mut url = self.endpoint(&format!(
            "repos/{}/{}/issues/{}/labels",
            repo.owner, repo.name, number
        ))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Http("base URL cannot carry path segments".to_string()))?
            .push(label);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(|error| ClientError::Http(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|error| ClientError::Decode(error.to_string()))
    }

    /// Sends a write request and discards the response body.
    async fn send_write(
        &self,
        method: reqwest::Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> ClientResult<()> {
        debug!(%url, method = %method, "write");
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|error| ClientError::Http(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GithubClient for RestClient {
    async fn pull_request(&self, repo: &Meta, number: u64) -> ClientResult<PullRequest> {
        let path = format!("repos/{}/{}/pulls/{}", repo.owner, repo.name, number);
        let payload: PullRequestPayload = self.get_json(&path).await?;

        // A failed commit listing degrades the snapshot instead of failing
        // the fetch; commit rules then pass vacuously.
        let commits = match self.commits(repo, number).await {
            Ok(commits) => commits,
            Err(error) => {
                warn!(%error, number, "commit listing failed, continuing without commit data");
                Vec::new()
            }
        };

        Ok(payload.into_pull_request(commits))
    }

    async fn commits(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Commit>> {
        let path = format!(
            "repos/{}/{}/pulls/{}/commits?per_page=100",
            repo.owner, repo.name, number
        );
        let payloads: Vec<CommitPayload> = self.get_json(&path).await?;
        Ok(payloads.into_iter().map(CommitPayload::into_commit).collect())
    }

    async fn issue(&self, repo: &Meta, number: u64) -> ClientResult<Option<Issue>> {
        let path = format!("repos/{}/{}/issues/{}", repo.owner, repo.name, number);
        match self.get_json::<IssuePayload>(&path).await {
            Ok(payload) => Ok(Some(payload.into_issue())),
            Err(ClientError::Status {
                status: 404 | 410, ..
            }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn issue_references(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Meta>> {
        let path = format!(
            "repos/{}/{}/issues/{}/timeline?per_page=100",
            repo.owner, repo.name, number
        );
        let events: Vec<TimelineEventPayload> = self.get_json(&path).await?;
        Ok(events
            .into_iter()
            .filter_map(TimelineEventPayload::referencing_repository)
            .collect())
    }

    async fn comments(&self, repo: &Meta, number: u64) -> ClientResult<Vec<Comment>> {
        let path = format!(
            "repos/{}/{}/issues/{}/comments?per_page=100",
            repo.owner, repo.name, number
        );
        let payloads: Vec<CommentPayload> = self.get_json(&path).await?;
        Ok(payloads
            .into_iter()
            .map(CommentPayload::into_comment)
            .collect())
    }

    async fn create_comment(&self, repo: &Meta, number: u64, body: &str) -> ClientResult<()> {
        let url = self.endpoint(&format!(
            "repos/{}/{}/issues/{}/comments",
            repo.owner, repo.name, number
        ))?;
        self.send_write(reqwest::Method::POST, url, Some(json!({ "body": body })))
            .await
    }

    async fn update_comment(&self, repo: &Meta, comment_id: u64, body: &str) -> ClientResult<()> {
        let url = self.endpoint(&format!(
            "repos/{}/{}/issues/comments/{}",
            repo.owner, repo.name, comment_id
        ))?;
        self.send_write(reqwest::Method::PATCH, url, Some(json!({ "body": body })))
            .await
    }

    async fn add_label(&self, repo: &Meta, number: u64, label: &str) -> ClientResult<()> {
        let url = self.endpoint(&format!(
            "repos/{}/{}/issues/{}/labels",
            repo.owner, repo.name, number
        ))?;
        self.send_write(
            reqwest::Method::POST,
            url,
            Some(json!({ "labels": [label] })),
        )
        .await
    }

    async fn remove_label(&self, repo: &Meta, number: u64, label: &str) -> ClientResult<()> {
        let url = self.label_endpoint(repo, number, label)?;
        match self.send_write(reqwest::Method::DELETE, url, None).await {
            // The label was not on the pull request; nothing to remove.
            Err(ClientError::Status { status: 404, .. }) => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_relative_to_base() {
        let client = RestClient::new(
            Url::parse("https://ghe.example.com/api/v3/").unwrap(),
            "token-123",
        );
        let url = client.endpoint("repos/o/r/pulls/1").unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/o/r/pulls/1");
    }

    #[test]
    fn test_endpoint_respects_default_base() {
        let client = RestClient::new(Url::parse("https://api.github.com/").unwrap(), "token-123");
        let url = client.endpoint("repos/o/r/issues/7").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/o/r/issues/7");
    }

    #[test]
    fn test_label_endpoint_percent_encodes_the_label() {
        let client = RestClient::new(Url::parse("https://api.github.com/").unwrap(), "token-123");
        let url = client
            .label_endpoint(&Meta::new("o", "r"), 7, "area/ci #2")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/o/r/issues/7/labels/area%2Fci%20%232"
        );
    }

    #[test]
    fn test_label_endpoint_leaves_plain_labels_alone() {
        let client = RestClient::new(Url::parse("https://api.github.com/").unwrap(), "token-123");
        let url = client
            .label_endpoint(&Meta::new("o", "r"), 7, "needs-work")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/o/r/issues/7/labels/needs-work"
        );
    }
}
