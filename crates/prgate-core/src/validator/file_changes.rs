//! File change budget rule.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::ValidationResult;

use super::Validator;

pub const FILE_CHANGE_RULE: &str = "file change limit";

/// Caps the number of changed files. A limit of zero means no cap and the
/// rule stays inactive.
pub struct FileChangeValidator {
    config: Arc<Config>,
}

impl FileChangeValidator {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Validator for FileChangeValidator {
    fn name(&self) -> &'static str {
        FILE_CHANGE_RULE
    }

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult {
        let limit = self.config.maximum_file_changes;
        if limit == 0 {
            return ValidationResult::skipped(FILE_CHANGE_RULE);
        }
        if pull_request.changed_files > limit {
            ValidationResult::fail(
                FILE_CHANGE_RULE,
                format!(
                    "{} files changed, more than the limit of {}",
                    pull_request.changed_files, limit
                ),
            )
        } else {
            ValidationResult::pass(FILE_CHANGE_RULE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use crate::validator::testutil::{config_with, snapshot};

    #[tokio::test]
    async fn test_inactive_without_limit() {
        let validator = FileChangeValidator::new(config_with(&[]));
        let mut pr = snapshot();
        pr.changed_files = 10_000;
        assert!(!validator.validate(&pr).await.active);
    }

    #[tokio::test]
    async fn test_within_limit_passes() {
        let validator =
            FileChangeValidator::new(config_with(&[(keys::MAXIMUM_CHANGES, "5")]));
        let mut pr = snapshot();
        pr.changed_files = 5;
        assert!(validator.validate(&pr).await.passed());
    }

    #[tokio::test]
    async fn test_over_limit_fails() {
        let validator =
            FileChangeValidator::new(config_with(&[(keys::MAXIMUM_CHANGES, "5")]));
        let mut pr = snapshot();
        pr.changed_files = 6;
        let result = validator.validate(&pr).await;
        assert!(!result.passed());
        assert!(result.violation.unwrap().contains("limit of 5"));
    }
}
