//! Body presence rule.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::ValidationResult;

use super::Validator;

pub const BODY_RULE: &str = "non-empty body";

/// Requires the pull request to carry a description. Whitespace-only
/// bodies count as empty.
pub struct BodyValidator {
    config: Arc<Config>,
}

impl BodyValidator {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Validator for BodyValidator {
    fn name(&self) -> &'static str {
        BODY_RULE
    }

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult {
        if !self.config.body {
            return ValidationResult::skipped(BODY_RULE);
        }
        if pull_request.body.trim().is_empty() {
            ValidationResult::fail(BODY_RULE, "pull request does not have a description")
        } else {
            ValidationResult::pass(BODY_RULE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use crate::validator::testutil::{config_with, snapshot};

    #[tokio::test]
    async fn test_inactive_when_disabled() {
        let validator = BodyValidator::new(config_with(&[]));
        let mut pr = snapshot();
        pr.body = String::new();
        let result = validator.validate(&pr).await;
        assert!(!result.active);
        assert!(result.passed());
    }

    #[tokio::test]
    async fn test_body_present_passes() {
        let validator = BodyValidator::new(config_with(&[(keys::BODY, "true")]));
        let result = validator.validate(&snapshot()).await;
        assert!(result.passed());
    }

    #[tokio::test]
    async fn test_whitespace_body_fails() {
        let validator = BodyValidator::new(config_with(&[(keys::BODY, "true")]));
        let mut pr = snapshot();
        pr.body = "  \n\t ".to_string();
        assert!(!validator.validate(&pr).await.passed());
    }
}
