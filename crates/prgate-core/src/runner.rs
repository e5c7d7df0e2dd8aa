//! Check orchestration: the gate phase, then the rule fold.

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::GithubClient;
use crate::config::Config;
use crate::entity::PullRequest;
use crate::gate::{default_gates, Gate};
use crate::result::CheckVerdict;
use crate::validator::{default_validators, Validator};

/// Runs the configured gate and rule set over one pull request snapshot.
///
/// Gates are evaluated in order and the first exclusion ends the run with
/// a skipped verdict. Otherwise every validator runs to completion, in
/// order, regardless of earlier failures, so the report always shows the
/// full picture.
pub struct CheckRunner {
    gates: Vec<Box<dyn Gate>>,
    validators: Vec<Box<dyn Validator>>,
}

impl CheckRunner {
    /// Standard gate and rule set for a configuration.
    pub fn new(config: Arc<Config>, client: Arc<dyn GithubClient>) -> Self {
        Self {
            gates: default_gates(&config),
            validators: default_validators(&config, &client),
        }
    }

    /// Custom gate and rule sets. Tests use this to swap in doubles.
    pub fn with_parts(gates: Vec<Box<dyn Gate>>, validators: Vec<Box<dyn Validator>>) -> Self {
        Self { gates, validators }
    }

    pub async fn run(&self, pull_request: &PullRequest) -> CheckVerdict {
        for gate in &self.gates {
            let result = gate.evaluate(pull_request);
            if result.excludes() {
                info!(
                    gate = result.name,
                    number = pull_request.number,
                    "pull request excluded by gate"
                );
                return CheckVerdict::Skipped {
                    gate: result.name.to_string(),
                };
            }
        }

        let mut results = Vec::with_capacity(self.validators.len());
        for validator in &self.validators {
            let result = validator.validate(pull_request).await;
            debug!(
                rule = %result.name,
                active = result.active,
                passed = result.passed(),
                "rule evaluated"
            );
            results.push(result);
        }

        let verdict = CheckVerdict::Completed { results };
        info!(
            number = pull_request.number,
            passed = verdict.passed(),
            "check completed"
        );
        verdict
    }
}
