//! Title convention rule.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::ValidationResult;

use super::Validator;

pub const TITLE_RULE: &str = "valid title";

/// Matches the pull request title against the configured pattern. Inactive
/// when no title pattern is configured.
pub struct TitleValidator {
    config: Arc<Config>,
}

impl TitleValidator {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Validator for TitleValidator {
    fn name(&self) -> &'static str {
        TITLE_RULE
    }

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult {
        let Some(pattern) = self.config.title_pattern.as_ref() else {
            return ValidationResult::skipped(TITLE_RULE);
        };
        if pattern.is_match(&pull_request.title) {
            ValidationResult::pass(TITLE_RULE)
        } else {
            ValidationResult::fail(
                TITLE_RULE,
                format!(
                    "title {:?} does not match the configured pattern",
                    pull_request.title
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use crate::validator::testutil::{config_with, snapshot};

    #[tokio::test]
    async fn test_inactive_without_pattern() {
        let validator = TitleValidator::new(config_with(&[]));
        let result = validator.validate(&snapshot()).await;
        assert!(!result.active);
        assert!(result.passed());
    }

    #[tokio::test]
    async fn test_matching_title_passes() {
        let validator =
            TitleValidator::new(config_with(&[(keys::TITLE_PATTERN, r"^(feat|fix): .+")]));
        let result = validator.validate(&snapshot()).await;
        assert!(result.active);
        assert!(result.passed());
    }

    #[tokio::test]
    async fn test_non_matching_title_fails() {
        let validator =
            TitleValidator::new(config_with(&[(keys::TITLE_PATTERN, r"^(feat|fix): .+")]));
        let mut pr = snapshot();
        pr.title = "update stuff".to_string();
        let result = validator.validate(&pr).await;
        assert!(!result.passed());
        assert!(result.violation.unwrap().contains("update stuff"));
    }
}
