//! Run configuration.
//!
//! A [`Config`] is built once per run from a key/value source and shared
//! read-only across every gate and validator. In production the source is
//! the process environment following the GitHub Actions convention
//! (`INPUT_<KEY>` for action inputs, `GITHUB_API_URL` for the API base);
//! tests pass a plain closure and never touch the environment.
//!
//! Construction is strict about the inputs that must be valid (token,
//! patterns, change limit, base URL) and lenient about everything else:
//! absent or unparsable booleans read as `false`, absent strings as empty.

use regex::Regex;
use url::Url;

use crate::error::ConfigError;
use crate::patterns::compile_pattern;

/// Canonical configuration keys understood by [`Config::from_lookup`].
///
/// [`Config::from_env`] maps each of these to `INPUT_<KEY>`, except
/// [`API_URL`] which reads the ambient `GITHUB_API_URL`.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
    pub const DRAFT: &str = "DRAFT";
    pub const CLOSE: &str = "CLOSE";
    pub const ISSUE: &str = "ISSUE";
    pub const BODY: &str = "BODY";
    pub const BOT: &str = "BOT";
    pub const SIGNED: &str = "SIGNED";
    pub const EDIT: &str = "EDIT";
    pub const VERBOSE: &str = "VERBOSE";
    pub const MAXIMUM_CHANGES: &str = "MAXIMUM_CHANGES";
    pub const TITLE_PATTERN: &str = "TITLE_PATTERN";
    pub const COMMIT_PATTERN: &str = "COMMIT_PATTERN";
    pub const BRANCH_PATTERN: &str = "BRANCH_PATTERN";
    pub const IGNORED_USERS: &str = "IGNORED_USERS";
    pub const LABEL: &str = "LABEL";
    pub const MESSAGE: &str = "MESSAGE";
    pub const API_URL: &str = "API_URL";
}

/// Default API base when the environment does not supply one.
pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// Immutable configuration for one check run.
///
/// Pattern fields hold the compiled form; `None` means the convention is
/// not configured and the corresponding rule is inactive.
#[derive(Debug, Clone)]
pub struct Config {
    /// API token. Never logged.
    pub token: String,
    /// Skip draft pull requests entirely.
    pub draft: bool,
    /// Skip closed or merged pull requests entirely.
    pub close: bool,
    /// Require the pull request to resolve an issue.
    pub issue: bool,
    /// Require a non-empty body.
    pub body: bool,
    /// Skip pull requests opened by bot accounts.
    pub bot: bool,
    /// Require verified commit signatures.
    pub signed: bool,
    /// Edit the previous report comment instead of posting a new one.
    pub edit: bool,
    /// Include the full per-rule table in the report.
    pub verbose: bool,
    /// Maximum number of changed files; zero disables the rule.
    pub maximum_file_changes: u64,
    pub title_pattern: Option<Regex>,
    pub commit_pattern: Option<Regex>,
    pub branch_pattern: Option<Regex>,
    /// Logins whose pull requests are never checked.
    pub ignored_users: Vec<String>,
    /// Label applied to failing pull requests; empty disables labelling.
    pub label: String,
    /// Preamble prepended to the report comment.
    pub message: String,
    /// Normalised API base URL, always with exactly one trailing slash.
    pub base_url: Url,
}

impl Config {
    /// Builds a configuration from a key/value lookup.
    ///
    /// Validation order is fixed: token, change limit, title pattern,
    /// commit pattern, branch pattern, base URL. The first failure wins.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(keys::ACCESS_TOKEN).unwrap_or_default();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let maximum_file_changes =
            parse_change_limit(&lookup(keys::MAXIMUM_CHANGES).unwrap_or_default())?;

        let title_pattern = compile_pattern(&lookup(keys::TITLE_PATTERN).unwrap_or_default())
            .map_err(|_| ConfigError::InvalidTitlePattern)?;
        let commit_pattern = compile_pattern(&lookup(keys::COMMIT_PATTERN).unwrap_or_default())
            .map_err(|_| ConfigError::InvalidCommitPattern)?;
        let branch_pattern = compile_pattern(&lookup(keys::BRANCH_PATTERN).unwrap_or_default())
            .map_err(|_| ConfigError::InvalidBranchPattern)?;

        let base_url = parse_base_url(lookup(keys::API_URL).as_deref())?;

        Ok(Self {
            token,
            draft: parse_flag(lookup(keys::DRAFT)),
            close: parse_flag(lookup(keys::CLOSE)),
            issue: parse_flag(lookup(keys::ISSUE)),
            body: parse_flag(lookup(keys::BODY)),
            bot: parse_flag(lookup(keys::BOT)),
            signed: parse_flag(lookup(keys::SIGNED)),
            edit: parse_flag(lookup(keys::EDIT)),
            verbose: parse_flag(lookup(keys::VERBOSE)),
            maximum_file_changes,
            title_pattern,
            commit_pattern,
            branch_pattern,
            ignored_users: parse_user_list(&lookup(keys::IGNORED_USERS).unwrap_or_default()),
            label: lookup(keys::LABEL).unwrap_or_default(),
            message: lookup(keys::MESSAGE).unwrap_or_default(),
            base_url,
        })
    }

    /// Builds a configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let var = match key {
                keys::API_URL => "GITHUB_API_URL".to_string(),
                other => format!("INPUT_{other}"),
            };
            std::env::var(var).ok()
        })
    }
}

fn parse_flag(value: Option<String>) -> bool {
    match value {
        Some(raw) => {
            let raw = raw.trim();
            raw.eq_ignore_ascii_case("true") || raw == "1"
        }
        None => false,
    }
}

fn parse_change_limit(raw: &str) -> Result<u64, ConfigError> {
    if raw.is_empty() {
        return Ok(0);
    }
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::NegativeFileChange)?;
    u64::try_from(value).map_err(|_| ConfigError::NegativeFileChange)
}

fn parse_user_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|login| !login.is_empty())
        .map(String::from)
        .collect()
}

fn parse_base_url(raw: Option<&str>) -> Result<Url, ConfigError> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => DEFAULT_API_URL,
    };
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidBaseUrl)?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl);
    }
    Ok(normalize_base_url(url))
}

/// Rewrites the URL path to end in exactly one slash, so endpoint joins
/// behave uniformly. Idempotent.
fn normalize_base_url(mut url: Url) -> Url {
    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{path}/"));
    url
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn full_entries() -> Vec<(&'static str, &'static str)> {
        vec![
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::DRAFT, "true"),
            (keys::CLOSE, "false"),
            (keys::ISSUE, "true"),
            (keys::BODY, "true"),
            (keys::BOT, "true"),
            (keys::SIGNED, "true"),
            (keys::EDIT, "true"),
            (keys::VERBOSE, "true"),
            (keys::MAXIMUM_CHANGES, "12"),
            (keys::TITLE_PATTERN, r"^(feat|fix): .+"),
            (keys::COMMIT_PATTERN, r"^\w+: .+"),
            (keys::BRANCH_PATTERN, r"^(feature|bugfix)/.+"),
            (keys::IGNORED_USERS, "dependabot[bot], renovate "),
            (keys::LABEL, "needs-work"),
            (keys::MESSAGE, "Thanks for contributing!"),
            (keys::API_URL, "https://github.example.com/api/v3"),
        ]
    }

    #[test]
    fn test_reads_full_configuration() {
        let config = Config::from_lookup(lookup_from(&full_entries())).unwrap();

        assert_eq!(config.token, "token-123");
        assert!(config.draft);
        assert!(!config.close);
        assert!(config.issue);
        assert!(config.body);
        assert!(config.bot);
        assert!(config.signed);
        assert!(config.edit);
        assert!(config.verbose);
        assert_eq!(config.maximum_file_changes, 12);
        assert_eq!(config.title_pattern.unwrap().as_str(), r"^(feat|fix): .+");
        assert_eq!(config.commit_pattern.unwrap().as_str(), r"^\w+: .+");
        assert_eq!(
            config.branch_pattern.unwrap().as_str(),
            r"^(feature|bugfix)/.+"
        );
        assert_eq!(config.ignored_users, vec!["dependabot[bot]", "renovate"]);
        assert_eq!(config.label, "needs-work");
        assert_eq!(config.message, "Thanks for contributing!");
        assert_eq!(
            config.base_url.as_str(),
            "https://github.example.com/api/v3/"
        );
    }

    #[test]
    fn test_defaults_when_only_token_is_set() {
        let config =
            Config::from_lookup(lookup_from(&[(keys::ACCESS_TOKEN, "token-123")])).unwrap();

        assert!(!config.draft);
        assert!(!config.close);
        assert!(!config.issue);
        assert!(!config.body);
        assert!(!config.bot);
        assert!(!config.signed);
        assert!(!config.edit);
        assert!(!config.verbose);
        assert_eq!(config.maximum_file_changes, 0);
        assert!(config.title_pattern.is_none());
        assert!(config.commit_pattern.is_none());
        assert!(config.branch_pattern.is_none());
        assert!(config.ignored_users.is_empty());
        assert_eq!(config.label, "");
        assert_eq!(config.message, "");
        assert_eq!(config.base_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingToken);
    }

    #[test]
    fn test_empty_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[(keys::ACCESS_TOKEN, "")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingToken);
    }

    #[test]
    fn test_negative_change_limit_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::MAXIMUM_CHANGES, "-4"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::NegativeFileChange);
    }

    #[test]
    fn test_non_numeric_change_limit_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::MAXIMUM_CHANGES, "handful"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::NegativeFileChange);
    }

    #[test]
    fn test_invalid_title_pattern_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::TITLE_PATTERN, "["),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTitlePattern);
    }

    #[test]
    fn test_invalid_commit_pattern_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::TITLE_PATTERN, "^ok"),
            (keys::COMMIT_PATTERN, "("),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidCommitPattern);
    }

    #[test]
    fn test_invalid_branch_pattern_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::BRANCH_PATTERN, "*nope"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBranchPattern);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::API_URL, "api.github.com"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl);
    }

    #[test]
    fn test_pattern_errors_take_precedence_over_url_errors() {
        let err = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::TITLE_PATTERN, "["),
            (keys::API_URL, "not a url"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTitlePattern);
    }

    #[test]
    fn test_base_url_gains_exactly_one_trailing_slash() {
        for (raw, expected) in [
            ("https://api.github.com", "https://api.github.com/"),
            ("https://api.github.com/", "https://api.github.com/"),
            (
                "https://ghe.example.com/api/v3///",
                "https://ghe.example.com/api/v3/",
            ),
        ] {
            let config = Config::from_lookup(lookup_from(&[
                (keys::ACCESS_TOKEN, "token-123"),
                (keys::API_URL, raw),
            ]))
            .unwrap();
            assert_eq!(config.base_url.as_str(), expected, "input {raw}");
        }
    }

    #[test]
    fn test_base_url_normalisation_is_idempotent() {
        let url = Url::parse("https://ghe.example.com/api/v3").unwrap();
        let once = normalize_base_url(url);
        let twice = normalize_base_url(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unparsable_flags_read_as_false() {
        let config = Config::from_lookup(lookup_from(&[
            (keys::ACCESS_TOKEN, "token-123"),
            (keys::ISSUE, "yes please"),
            (keys::SIGNED, "TRUE"),
        ]))
        .unwrap();
        assert!(!config.issue);
        assert!(config.signed);
    }

    #[test]
    fn test_from_env_reads_input_prefixed_keys() {
        // The only test that touches the process environment; every other
        // test goes through `from_lookup`.
        std::env::set_var("INPUT_ACCESS_TOKEN", "env-token");
        std::env::set_var("INPUT_SIGNED", "true");
        std::env::set_var("INPUT_MAXIMUM_CHANGES", "3");
        std::env::set_var("INPUT_API_URL", "https://wrong.example.com");
        std::env::set_var("GITHUB_API_URL", "https://ghe.example.com/api/v3");

        let config = Config::from_env().unwrap();
        assert_eq!(config.token, "env-token");
        assert!(config.signed);
        assert_eq!(config.maximum_file_changes, 3);
        // The base URL binds to GITHUB_API_URL; INPUT_API_URL is ignored.
        assert_eq!(config.base_url.as_str(), "https://ghe.example.com/api/v3/");

        std::env::remove_var("GITHUB_API_URL");
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_API_URL);

        for key in [
            "INPUT_ACCESS_TOKEN",
            "INPUT_SIGNED",
            "INPUT_MAXIMUM_CHANGES",
            "INPUT_API_URL",
        ] {
            std::env::remove_var(key);
        }
    }
}
