//! Core validation engine for the prgate pull request gate.
//!
//! The engine checks one pull request snapshot against a configurable set
//! of conventions: title, body, branch name, commit messages, commit
//! signatures, file change budget and issue linkage. Gates run first and
//! can take the pull request out of scope entirely (drafts, bots, ignored
//! logins, closed pull requests).
//!
//! Platform access goes through the [`client::GithubClient`] trait; the
//! REST implementation lives in the `prgate-github` crate and tests use
//! [`fakes::FakeGithubClient`]. The engine is tolerant by design: when the
//! platform cannot answer a lookup, rules pass rather than block a
//! contributor on an outage.

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod fakes;
pub mod gate;
pub mod patterns;
pub mod report;
pub mod resolver;
pub mod result;
pub mod runner;
pub mod telemetry;
pub mod validator;

pub use client::{ClientResult, GithubClient};
pub use config::Config;
pub use entity::{Author, Comment, Commit, Issue, Meta, PullRequest};
pub use error::{ClientError, ConfigError};
pub use resolver::{IssueReference, IssueResolver, Linkage, ReferenceExtractor};
pub use result::{CheckVerdict, ValidationResult};
pub use runner::CheckRunner;
pub use telemetry::init_tracing;
