//! Report rendering and publication.
//!
//! Rendering is pure: a verdict plus configuration becomes a markdown
//! comment body. Publication applies the side-effect policy: failing runs
//! get a comment and the configured label, passing runs get the label
//! removed. Reporting failures are logged and swallowed; they never change
//! the verdict.

use tracing::{info, warn};

use crate::client::GithubClient;
use crate::config::Config;
use crate::entity::PullRequest;
use crate::result::CheckVerdict;

/// Hidden marker embedded in every report comment so a later run can find
/// and edit its own comment instead of stacking new ones.
pub const REPORT_MARKER: &str = "<!-- prgate-report -->";

/// Renders the comment body for a verdict.
///
/// Disabled and gated rules never appear in the failure list; the verbose
/// table lists active rules only.
pub fn render_markdown(verdict: &CheckVerdict, config: &Config) -> String {
    let mut body = String::from(REPORT_MARKER);
    body.push('\n');

    if !config.message.is_empty() {
        body.push_str(&config.message);
        body.push_str("\n\n");
    }

    match verdict {
        CheckVerdict::Skipped { gate } => {
            body.push_str(&format!("Checks were skipped: {gate}.\n"));
        }
        CheckVerdict::Completed { results } => {
            if verdict.passed() {
                body.push_str("All pull request checks passed.\n");
            } else {
                body.push_str("Some pull request checks failed:\n\n");
                for result in results.iter().filter(|r| !r.passed()) {
                    let violation = result.violation.as_deref().unwrap_or("failed");
                    body.push_str(&format!("- **{}**: {}\n", result.name, violation));
                }
            }

            if config.verbose {
                body.push_str("\n| Check | Status |\n| --- | --- |\n");
                for result in results.iter().filter(|r| r.active) {
                    let status = if result.passed() { "pass" } else { "fail" };
                    body.push_str(&format!("| {} | {} |\n", result.name, status));
                }
            }
        }
    }

    body
}

/// Publishes the verdict on the pull request.
///
/// On failure the report is posted as a comment (editing the previous one
/// when `edit` is set and one is found) and the configured label is added.
/// On pass the label is removed. Every platform error here is logged and
/// ignored.
pub async fn publish(
    client: &dyn GithubClient,
    config: &Config,
    pull_request: &PullRequest,
    verdict: &CheckVerdict,
) {
    let repo = &pull_request.repository;
    let number = pull_request.number;

    if verdict.passed() {
        if !config.label.is_empty() {
            if let Err(error) = client.remove_label(repo, number, &config.label).await {
                warn!(%error, number, "label removal failed");
            }
        }
        return;
    }

    let body = render_markdown(verdict, config);

    let previous = if config.edit {
        find_previous_report(client, pull_request).await
    } else {
        None
    };

    match previous {
        Some(comment_id) => {
            if let Err(error) = client.update_comment(repo, comment_id, &body).await {
                warn!(%error, comment_id, "report comment update failed");
            } else {
                info!(number, comment_id, "report comment updated");
            }
        }
        None => {
            if let Err(error) = client.create_comment(repo, number, &body).await {
                warn!(%error, number, "report comment creation failed");
            } else {
                info!(number, "report comment created");
            }
        }
    }

    if !config.label.is_empty() {
        if let Err(error) = client.add_label(repo, number, &config.label).await {
            warn!(%error, number, "label addition failed");
        }
    }
}

/// Finds the id of a previous report comment, by marker.
async fn find_previous_report(
    client: &dyn GithubClient,
    pull_request: &PullRequest,
) -> Option<u64> {
    match client
        .comments(&pull_request.repository, pull_request.number)
        .await
    {
        Ok(comments) => comments
            .iter()
            .find(|comment| comment.body.contains(REPORT_MARKER))
            .map(|comment| comment.id),
        Err(error) => {
            warn!(%error, "comment listing failed, posting a fresh report");
            None
        }
    }
}
