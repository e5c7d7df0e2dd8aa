//! REST payload types and their mapping into core entities.
//!
//! Payloads mirror the subset of the GitHub v3 JSON the gate actually
//! reads. Everything optional in the wire format stays `Option` here and
//! is defaulted during conversion, so a sparse payload never aborts a
//! check.

use serde::Deserialize;

use prgate_core::entity::{Author, Comment, Commit, Issue, Meta, PullRequest};

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestPayload {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    #[serde(default)]
    pub draft: bool,
    pub state: String,
    pub user: Option<UserPayload>,
    pub head: HeadPayload,
    pub base: BasePayload,
    #[serde(default)]
    pub changed_files: u64,
}

impl PullRequestPayload {
    pub fn into_pull_request(self, commits: Vec<Commit>) -> PullRequest {
        let author = match self.user {
            Some(user) => Author {
                bot: user.kind.as_deref() == Some("Bot"),
                login: user.login,
            },
            None => Author {
                login: String::new(),
                bot: false,
            },
        };
        PullRequest {
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            branch: self.head.branch,
            author,
            draft: self.draft,
            closed: self.state != "open",
            repository: Meta {
                owner: self.base.repo.owner.login,
                name: self.base.repo.name,
            },
            commits,
            changed_files: self.changed_files,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserPayload {
    pub login: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeadPayload {
    #[serde(rename = "ref")]
    pub branch: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BasePayload {
    pub repo: RepoPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoPayload {
    pub name: String,
    pub owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerPayload {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitPayload {
    pub sha: String,
    pub commit: CommitDetailPayload,
}

impl CommitPayload {
    pub fn into_commit(self) -> Commit {
        Commit {
            sha: self.sha,
            message: self.commit.message,
            verified: self
                .commit
                .verification
                .map(|v| v.verified)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetailPayload {
    pub message: String,
    pub verification: Option<VerificationPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerificationPayload {
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssuePayload {
    pub number: u64,
    pub title: String,
}

impl IssuePayload {
    pub fn into_issue(self) -> Issue {
        Issue {
            number: self.number,
            title: self.title,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentPayload {
    pub id: u64,
    pub body: Option<String>,
}

impl CommentPayload {
    pub fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            body: self.body.unwrap_or_default(),
        }
    }
}

/// One timeline event. Only `cross-referenced` events carry a source
/// issue; everything else deserialises with `source: None`.
#[derive(Debug, Deserialize)]
pub(crate) struct TimelineEventPayload {
    pub event: String,
    pub source: Option<TimelineSourcePayload>,
}

impl TimelineEventPayload {
    /// Repository of the referencing issue, for cross-reference events.
    pub fn referencing_repository(self) -> Option<Meta> {
        if self.event != "cross-referenced" {
            return None;
        }
        let repo = self.source?.issue?.repository?;
        Some(Meta {
            owner: repo.owner.login,
            name: repo.name,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineSourcePayload {
    pub issue: Option<TimelineIssuePayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimelineIssuePayload {
    pub repository: Option<RepoPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_payload_maps_fields() {
        let json = r#"{
            "number": 42,
            "title": "feat: add parser",
            "body": "Closes #7",
            "draft": true,
            "state": "open",
            "user": { "login": "octocat", "type": "User" },
            "head": { "ref": "feature/parser" },
            "base": { "repo": { "name": "prgate", "owner": { "login": "stevedores-org" } } },
            "changed_files": 3
        }"#;
        let payload: PullRequestPayload = serde_json::from_str(json).unwrap();
        let pr = payload.into_pull_request(Vec::new());

        assert_eq!(pr.number, 42);
        assert_eq!(pr.title, "feat: add parser");
        assert_eq!(pr.body, "Closes #7");
        assert!(pr.draft);
        assert!(!pr.closed);
        assert_eq!(pr.branch, "feature/parser");
        assert_eq!(pr.author.login, "octocat");
        assert!(!pr.author.bot);
        assert_eq!(pr.repository, Meta::new("stevedores-org", "prgate"));
        assert_eq!(pr.changed_files, 3);
    }

    #[test]
    fn test_sparse_pull_request_payload_defaults() {
        let json = r#"{
            "number": 1,
            "title": "chore",
            "body": null,
            "state": "closed",
            "user": null,
            "head": { "ref": "patch-1" },
            "base": { "repo": { "name": "prgate", "owner": { "login": "stevedores-org" } } }
        }"#;
        let payload: PullRequestPayload = serde_json::from_str(json).unwrap();
        let pr = payload.into_pull_request(Vec::new());

        assert_eq!(pr.body, "");
        assert!(!pr.draft);
        assert!(pr.closed);
        assert_eq!(pr.author.login, "");
        assert_eq!(pr.changed_files, 0);
    }

    #[test]
    fn test_bot_author_is_flagged() {
        let json = r#"{ "login": "dependabot[bot]", "type": "Bot" }"#;
        let user: UserPayload = serde_json::from_str(json).unwrap();
        assert_eq!(user.kind.as_deref(), Some("Bot"));
    }

    #[test]
    fn test_commit_payload_maps_verification() {
        let json = r#"{
            "sha": "a1b2c3d",
            "commit": {
                "message": "feat: add parser",
                "verification": { "verified": true }
            }
        }"#;
        let commit: CommitPayload = serde_json::from_str(json).unwrap();
        let commit = commit.into_commit();
        assert_eq!(commit.sha, "a1b2c3d");
        assert!(commit.verified);
    }

    #[test]
    fn test_commit_without_verification_is_unverified() {
        let json = r#"{ "sha": "a1b2c3d", "commit": { "message": "wip" } }"#;
        let commit: CommitPayload = serde_json::from_str(json).unwrap();
        assert!(!commit.into_commit().verified);
    }

    #[test]
    fn test_cross_reference_event_yields_repository() {
        let json = r#"{
            "event": "cross-referenced",
            "source": {
                "issue": {
                    "repository": { "name": "prgate", "owner": { "login": "stevedores-org" } }
                }
            }
        }"#;
        let event: TimelineEventPayload = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.referencing_repository(),
            Some(Meta::new("stevedores-org", "prgate"))
        );
    }

    #[test]
    fn test_other_events_yield_nothing() {
        let json = r#"{ "event": "labeled" }"#;
        let event: TimelineEventPayload = serde_json::from_str(json).unwrap();
        assert_eq!(event.referencing_repository(), None);
    }
}
