//! Markdown bundle assembly.
//!
//! A bundle is the ordered list of markdown chunks converted into one page's
//! content. Assembly is pure so the ordering and filtering rules stay
//! testable without any network traffic.

use crate::github::models::{Issue, PullRequest};

/// Literal heading chunk separating discussion comments in a pull request
/// bundle.
pub const COMMENTS_HEADING: &str = "## Comments";

/// Chunks for an issue page: body first, then each comment in original
/// order. Absent bodies are filtered out.
#[must_use]
pub fn issue_bundle(issue: &Issue) -> Vec<String> {
    let mut chunks = Vec::with_capacity(issue.comments.len() + 1);
    chunks.extend(issue.body.clone());
    chunks.extend(
        issue
            .comments
            .iter()
            .filter_map(|comment| comment.body.clone()),
    );
    chunks
}

/// Chunks for a pull request page: body, the comments heading, each
/// discussion comment, then per review the review body followed by its
/// replies. Absent bodies are filtered out; the heading always stays.
#[must_use]
pub fn pull_request_bundle(pull_request: &PullRequest) -> Vec<String> {
    let mut chunks = Vec::new();
    chunks.extend(pull_request.body.clone());
    chunks.push(COMMENTS_HEADING.to_owned());
    chunks.extend(
        pull_request
            .comments
            .iter()
            .filter_map(|comment| comment.body.clone()),
    );
    for review in &pull_request.reviews {
        chunks.extend(review.body.clone());
        chunks.extend(
            review
                .comments
                .iter()
                .filter_map(|comment| comment.body.clone()),
        );
    }
    chunks
}

/// Wraps a raw unified diff in a fenced markdown code block.
///
/// The fence grows past any backtick run inside the diff so the block cannot
/// be terminated from the inside.
#[must_use]
pub fn diff_chunk(diff: &str) -> String {
    let trimmed = diff.trim_end_matches('\n');
    let fence = compute_fence(trimmed);
    format!("{fence}diff\n{trimmed}\n{fence}")
}

/// Computes a fence string that exceeds any backtick run in the content.
fn compute_fence(content: &str) -> String {
    let max_backticks = content.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    let fence_len = max_backticks.max(2) + 1;
    "`".repeat(fence_len)
}
