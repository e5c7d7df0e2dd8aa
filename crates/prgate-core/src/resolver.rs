//! Issue reference extraction and resolution.
//!
//! Extraction is pure text work: scan a pull request body for closing
//! keywords (`Closes #12`, `fixes vitejs/vite#1783`, ...) and produce the
//! referenced issue coordinates. Resolution then asks the platform whether
//! any reference points at a reachable issue, checking the platform's own
//! cross-reference tracking first.
//!
//! Resolution is tolerant of platform trouble: a failed lookup yields
//! [`Linkage::Indeterminate`], which the issue rule maps to a pass. Only a
//! completed scan with no resolvable reference yields
//! [`Linkage::Unlinked`].

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use crate::client::GithubClient;
use crate::entity::{Meta, PullRequest};

/// Closing keywords recognised in body text, each followed by an optional
/// `owner/name` segment and a `#number`. The repository segment must be
/// exactly two slash-separated parts; anything else is not a reference.
const KEYWORD_PATTERN: &str = r"(?mi)\b(close|closes|closed|fix|fixes|fixed|resolve|resolves|resolved)\s+([\w.-]+/[\w.-]+)?#(\d+)\b";

/// One closing-keyword reference found in body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    /// The keyword as written, original casing preserved.
    pub keyword: String,
    /// Referenced repository; `None` targets the pull request's own.
    pub repository: Option<Meta>,
    pub number: u64,
}

/// Extracts closing-keyword references from free-form body text.
pub struct ReferenceExtractor {
    pattern: Regex,
}

impl ReferenceExtractor {
    pub fn new() -> Self {
        // The pattern is a compile-time constant; failure here is a bug.
        Self {
            pattern: Regex::new(KEYWORD_PATTERN).expect("keyword pattern compiles"),
        }
    }

    /// All references in order of appearance. Overlapping matches are not
    /// possible; malformed candidates are simply not matches.
    pub fn extract(&self, body: &str) -> Vec<IssueReference> {
        let mut references = Vec::new();
        for caps in self.pattern.captures_iter(body) {
            let Ok(number) = caps[3].parse::<u64>() else {
                continue;
            };
            let repository = caps
                .get(2)
                .and_then(|segment| segment.as_str().split_once('/'))
                .map(|(owner, name)| Meta::new(owner, name));
            references.push(IssueReference {
                keyword: caps[1].to_string(),
                repository,
                number,
            });
        }
        references
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one linkage resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// At least one reference resolved to a reachable issue.
    Linked,
    /// Every avenue was examined and none resolved.
    Unlinked,
    /// A lookup failed mid-pass; there is not enough evidence to fail the
    /// rule.
    Indeterminate,
}

/// Resolves issue linkage for one pull request snapshot.
pub struct IssueResolver {
    client: Arc<dyn GithubClient>,
    extractor: ReferenceExtractor,
}

impl IssueResolver {
    pub fn new(client: Arc<dyn GithubClient>) -> Self {
        Self {
            client,
            extractor: ReferenceExtractor::new(),
        }
    }

    /// Checks native cross-references first, then scans the body,
    /// short-circuiting on the first reference that resolves.
    pub async fn resolve(&self, pull_request: &PullRequest) -> Linkage {
        let repo = &pull_request.repository;

        match self.client.issue_references(repo, pull_request.number).await {
            Ok(references) => {
                if references.iter().any(|referenced| referenced == repo) {
                    debug!(
                        number = pull_request.number,
                        "native cross-reference found"
                    );
                    return Linkage::Linked;
                }
            }
            Err(error) => {
                warn!(
                    %error,
                    number = pull_request.number,
                    "cross-reference lookup failed, not penalizing"
                );
                return Linkage::Indeterminate;
            }
        }

        for reference in self.extractor.extract(&pull_request.body) {
            let target = reference.repository.as_ref().unwrap_or(repo);
            match self.client.issue(target, reference.number).await {
                Ok(Some(_)) => {
                    debug!(
                        issue = reference.number,
                        repo = %target,
                        "body reference resolved"
                    );
                    return Linkage::Linked;
                }
                Ok(None) => continue,
                Err(error) => {
                    warn!(
                        %error,
                        issue = reference.number,
                        repo = %target,
                        "issue lookup failed, not penalizing"
                    );
                    return Linkage::Indeterminate;
                }
            }
        }

        Linkage::Unlinked
    }
}
