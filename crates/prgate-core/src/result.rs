//! Result model shared by validators, the runner and the reporter.

use serde::{Deserialize, Serialize};

/// Outcome of one rule evaluation.
///
/// `active` records whether the rule was enabled for this run. An inactive
/// result can never fail the pull request; [`ValidationResult::passed`]
/// treats it as passing no matter what the other fields hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Stable human-readable rule name.
    pub name: String,
    pub active: bool,
    /// Violation message when the rule failed; `None` on pass.
    pub violation: Option<String>,
}

impl ValidationResult {
    /// Result for a rule that is disabled in this run.
    pub fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: false,
            violation: None,
        }
    }

    /// Result for an enabled rule that found nothing wrong.
    pub fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active: true,
            violation: None,
        }
    }

    /// Result for an enabled rule that found a violation.
    pub fn fail(name: &str, violation: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            active: true,
            violation: Some(violation.into()),
        }
    }

    pub fn passed(&self) -> bool {
        !self.active || self.violation.is_none()
    }
}

/// Overall verdict of one check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckVerdict {
    /// A gate matched before any rule ran; the pull request is out of
    /// scope for this run.
    Skipped { gate: String },
    /// The full rule set ran; results are in registration order.
    Completed { results: Vec<ValidationResult> },
}

impl CheckVerdict {
    /// A skipped run counts as passing.
    pub fn passed(&self) -> bool {
        match self {
            Self::Skipped { .. } => true,
            Self::Completed { results } => results.iter().all(ValidationResult::passed),
        }
    }

    /// Failing results, in evaluation order. Empty for skipped runs.
    pub fn failures(&self) -> Vec<&ValidationResult> {
        match self {
            Self::Skipped { .. } => Vec::new(),
            Self::Completed { results } => results.iter().filter(|r| !r.passed()).collect(),
        }
    }
}
