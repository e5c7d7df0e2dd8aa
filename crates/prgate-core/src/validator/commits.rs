//! Commit message convention rule.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::ValidationResult;

use super::Validator;

pub const COMMIT_RULE: &str = "valid commit messages";

/// Matches every commit message against the configured pattern. Inactive
/// without a commit pattern; passes vacuously when the snapshot carries no
/// commits, which is also the degraded state after a failed listing.
pub struct CommitMessageValidator {
    config: Arc<Config>,
}

impl CommitMessageValidator {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Validator for CommitMessageValidator {
    fn name(&self) -> &'static str {
        COMMIT_RULE
    }

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult {
        let Some(pattern) = self.config.commit_pattern.as_ref() else {
            return ValidationResult::skipped(COMMIT_RULE);
        };
        for commit in &pull_request.commits {
            if !pattern.is_match(&commit.message) {
                return ValidationResult::fail(
                    COMMIT_RULE,
                    format!("commit {} does not have a valid message", commit.sha),
                );
            }
        }
        ValidationResult::pass(COMMIT_RULE)
    }
}
