//! prgate - pull request convention gate.
//!
//! Reads its configuration from the environment following the GitHub
//! Actions convention (`INPUT_*` variables plus `GITHUB_API_URL`), fetches
//! the pull request snapshot, runs the gate and rule set, publishes the
//! report and exits non-zero when an active rule failed.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use prgate_core::entity::Meta;
use prgate_core::report;
use prgate_core::result::CheckVerdict;
use prgate_core::{CheckRunner, Config, GithubClient};
use prgate_github::RestClient;

#[derive(Parser)]
#[command(name = "prgate")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Conventional pull request gate", long_about = None)]
struct Cli {
    /// Repository the pull request belongs to, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", value_parser = parse_repository)]
    repo: Meta,

    /// Pull request number to check
    #[arg(long)]
    pr: u64,

    /// Print the verdict as JSON and emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Evaluate only; skip comment and label side effects
    #[arg(long)]
    dry_run: bool,
}

fn parse_repository(raw: &str) -> std::result::Result<Meta, String> {
    match raw.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(Meta::new(owner, name))
        }
        _ => Err(format!("expected owner/name, got {raw:?}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    prgate_core::init_tracing(cli.json, level);

    let config = Arc::new(Config::from_env().context("invalid configuration")?);
    let client: Arc<dyn GithubClient> = Arc::new(RestClient::from_config(&config));

    let pull_request = client
        .pull_request(&cli.repo, cli.pr)
        .await
        .with_context(|| format!("failed to fetch pull request {}#{}", cli.repo, cli.pr))?;

    let runner = CheckRunner::new(config.clone(), client.clone());
    let verdict = runner.run(&pull_request).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print_summary(&verdict);
    }

    if !cli.dry_run {
        report::publish(client.as_ref(), &config, &pull_request, &verdict).await;
    }

    if !verdict.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(verdict: &CheckVerdict) {
    match verdict {
        CheckVerdict::Skipped { gate } => {
            println!("skipped: {gate}");
        }
        CheckVerdict::Completed { results } => {
            for result in results {
                let status = if !result.active {
                    "off "
                } else if result.passed() {
                    "pass"
                } else {
                    "FAIL"
                };
                match &result.violation {
                    Some(violation) => println!("[{status}] {}: {}", result.name, violation),
                    None => println!("[{status}] {}", result.name),
                }
            }
            if verdict.passed() {
                println!("all checks passed");
            } else {
                println!("{} check(s) failed", verdict.failures().len());
            }
        }
    }
}
