//! Issue resolution rule.

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::GithubClient;
use crate::config::Config;
use crate::entity::PullRequest;
use crate::resolver::{IssueResolver, Linkage};
use crate::result::ValidationResult;

use super::Validator;

pub const ISSUE_RULE: &str = "issue resolution";

/// Requires the pull request to resolve at least one reachable issue,
/// either through the platform's cross-reference tracking or through a
/// closing keyword in the body.
///
/// This is the only rule that performs I/O. An indeterminate resolution,
/// meaning a lookup failed mid-pass, counts as a pass: availability
/// problems on the platform side must not block contributors.
pub struct IssueValidator {
    config: Arc<Config>,
    resolver: IssueResolver,
}

impl IssueValidator {
    pub fn new(config: Arc<Config>, client: Arc<dyn GithubClient>) -> Self {
        Self {
            config,
            resolver: IssueResolver::new(client),
        }
    }
}

#[async_trait]
impl Validator for IssueValidator {
    fn name(&self) -> &'static str {
        ISSUE_RULE
    }

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult {
        if !self.config.issue {
            return ValidationResult::skipped(ISSUE_RULE);
        }
        match self.resolver.resolve(pull_request).await {
            Linkage::Linked | Linkage::Indeterminate => ValidationResult::pass(ISSUE_RULE),
            Linkage::Unlinked => ValidationResult::fail(
                ISSUE_RULE,
                "pull request does not resolve any reachable issue",
            ),
        }
    }
}
