//! Rule validators.
//!
//! One implementation per convention. Every validator checks its enable
//! flag first and returns an inactive result without further work when the
//! rule is off; an inactive result can never fail the run. Only the issue
//! validator talks to the platform, all others are pure over the snapshot.

mod body;
mod branch;
mod commits;
mod file_changes;
mod issue;
mod signed;
mod title;

pub use body::{BodyValidator, BODY_RULE};
pub use branch::{BranchValidator, BRANCH_RULE};
pub use commits::{CommitMessageValidator, COMMIT_RULE};
pub use file_changes::{FileChangeValidator, FILE_CHANGE_RULE};
pub use issue::{IssueValidator, ISSUE_RULE};
pub use signed::{SignedCommitValidator, SIGNED_RULE};
pub use title::{TitleValidator, TITLE_RULE};

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::GithubClient;
use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::ValidationResult;

/// A single convention check over one pull request snapshot.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Stable rule name used in results and reports.
    fn name(&self) -> &'static str;

    async fn validate(&self, pull_request: &PullRequest) -> ValidationResult;
}

/// The standard rule set, in evaluation and reporting order.
pub fn default_validators(
    config: &Arc<Config>,
    client: &Arc<dyn GithubClient>,
) -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(TitleValidator::new(config.clone())),
        Box::new(BodyValidator::new(config.clone())),
        Box::new(BranchValidator::new(config.clone())),
        Box::new(CommitMessageValidator::new(config.clone())),
        Box::new(SignedCommitValidator::new(config.clone())),
        Box::new(FileChangeValidator::new(config.clone())),
        Box::new(IssueValidator::new(config.clone(), client.clone())),
    ]
}
