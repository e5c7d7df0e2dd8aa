//! Commit signature rule.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::ValidationResult;

use super::Validator;

pub const SIGNED_RULE: &str = "signed commits";

/// Requires every commit to carry a platform-verified signature. Passes
/// vacuously when the snapshot carries no commits.
pub struct SignedCommitValidator {
    config: Arc<Config>,
}

impl SignedCommitValidator {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Validator for SignedCommitValidator {
    fn name(&self) -> &'static str {
        SIGNED_RULE
    }

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult {
        if !self.config.signed {
            return ValidationResult::skipped(SIGNED_RULE);
        }
        for commit in &pull_request.commits {
            if !commit.verified {
                return ValidationResult::fail(
                    SIGNED_RULE,
                    format!("commit {} does not have a verified signature", commit.sha),
                );
            }
        }
        ValidationResult::pass(SIGNED_RULE)
    }
}
