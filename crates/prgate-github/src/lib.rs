//! GitHub REST adapter for the prgate validation engine.
//!
//! Implements [`prgate_core::client::GithubClient`] over the v3 REST API
//! using `reqwest`. Construction takes the normalised base URL and token
//! from the core configuration, so the same binary serves github.com and
//! GitHub Enterprise installations.

mod payload;
mod rest;

pub use rest::RestClient;
