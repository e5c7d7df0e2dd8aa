//! Gate predicates: pre-validation exclusions.
//!
//! Gates run before any rule. When an active gate matches, the whole run is
//! skipped; a draft or a bot-authored pull request is out of scope, not
//! failing. Gates are pure predicates over the snapshot and never perform
//! I/O.

use std::sync::Arc;

use crate::config::Config;
use crate::entity::PullRequest;

pub const BOT_GATE: &str = "bot author";
pub const IGNORED_USER_GATE: &str = "ignored author";
pub const DRAFT_GATE: &str = "draft pull request";
pub const CLOSED_GATE: &str = "closed pull request";

/// Outcome of one gate predicate.
///
/// An inactive gate never matches; [`GateResult::inactive`] is the only
/// way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResult {
    pub name: &'static str,
    pub active: bool,
    pub matched: bool,
}

impl GateResult {
    fn inactive(name: &'static str) -> Self {
        Self {
            name,
            active: false,
            matched: false,
        }
    }

    fn evaluated(name: &'static str, matched: bool) -> Self {
        Self {
            name,
            active: true,
            matched,
        }
    }

    /// True when this gate excludes the pull request from the run.
    pub fn excludes(&self) -> bool {
        self.active && self.matched
    }
}

/// A pre-validation exclusion predicate.
pub trait Gate: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(&self, pull_request: &PullRequest) -> GateResult;
}

/// Skips pull requests opened by bot accounts.
pub struct BotGate {
    config: Arc<Config>,
}

impl BotGate {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Gate for BotGate {
    fn name(&self) -> &'static str {
        BOT_GATE
    }

    fn evaluate(&self, pull_request: &PullRequest) -> GateResult {
        if !self.config.bot {
            return GateResult::inactive(BOT_GATE);
        }
        GateResult::evaluated(BOT_GATE, pull_request.author.bot)
    }
}

/// Skips pull requests from logins on the ignore list.
pub struct IgnoredUserGate {
    config: Arc<Config>,
}

impl IgnoredUserGate {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Gate for IgnoredUserGate {
    fn name(&self) -> &'static str {
        IGNORED_USER_GATE
    }

    fn evaluate(&self, pull_request: &PullRequest) -> GateResult {
        if self.config.ignored_users.is_empty() {
            return GateResult::inactive(IGNORED_USER_GATE);
        }
        let matched = self
            .config
            .ignored_users
            .iter()
            .any(|login| login == &pull_request.author.login);
        GateResult::evaluated(IGNORED_USER_GATE, matched)
    }
}

/// Skips draft pull requests.
pub struct DraftGate {
    config: Arc<Config>,
}

impl DraftGate {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Gate for DraftGate {
    fn name(&self) -> &'static str {
        DRAFT_GATE
    }

    fn evaluate(&self, pull_request: &PullRequest) -> GateResult {
        if !self.config.draft {
            return GateResult::inactive(DRAFT_GATE);
        }
        GateResult::evaluated(DRAFT_GATE, pull_request.draft)
    }
}

/// Skips pull requests that are already closed or merged.
pub struct ClosedGate {
    config: Arc<Config>,
}

impl ClosedGate {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Gate for ClosedGate {
    fn name(&self) -> &'static str {
        CLOSED_GATE
    }

    fn evaluate(&self, pull_request: &PullRequest) -> GateResult {
        if !self.config.close {
            return GateResult::inactive(CLOSED_GATE);
        }
        GateResult::evaluated(CLOSED_GATE, pull_request.closed)
    }
}

/// The standard gate set, in evaluation order.
pub fn default_gates(config: &Arc<Config>) -> Vec<Box<dyn Gate>> {
    vec![
        Box::new(BotGate::new(config.clone())),
        Box::new(IgnoredUserGate::new(config.clone())),
        Box::new(DraftGate::new(config.clone())),
        Box::new(ClosedGate::new(config.clone())),
    ]
}
