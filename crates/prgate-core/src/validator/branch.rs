//! Branch naming rule.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::ValidationResult;

use super::Validator;

pub const BRANCH_RULE: &str = "valid branch name";

/// Matches the head branch name against the configured pattern. Inactive
/// when no branch pattern is configured.
pub struct BranchValidator {
    config: Arc<Config>,
}

impl BranchValidator {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Validator for BranchValidator {
    fn name(&self) -> &'static str {
        BRANCH_RULE
    }

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult {
        let Some(pattern) = self.config.branch_pattern.as_ref() else {
            return ValidationResult::skipped(BRANCH_RULE);
        };
        if pattern.is_match(&pull_request.branch) {
            ValidationResult::pass(BRANCH_RULE)
        } else {
            ValidationResult::fail(
                BRANCH_RULE,
                format!(
                    "branch {:?} does not match the configured pattern",
                    pull_request.branch
                ),
            )
        }
    }
}
