//! Domain models for issues, pull requests, and their discussion threads.
//!
//! Types prefixed with `Api` are GraphQL deserialisation targets that convert
//! into the public domain types. Their field names follow the camelCase
//! GraphQL schema.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A GitHub issue with its discussion comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Node identifier.
    pub id: String,
    /// Issue number, unique within one repository.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author login, absent when the account no longer resolves.
    pub author: Option<String>,
    /// Body markdown.
    pub body: Option<String>,
    /// Discussion comments in original order.
    pub comments: Vec<Comment>,
    /// True when the comment window did not cover every comment.
    pub comments_truncated: bool,
}

/// A GitHub pull request with comments and reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Node identifier.
    pub id: String,
    /// Pull request number, unique within one repository.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author login, absent when the account no longer resolves.
    pub author: Option<String>,
    /// Body markdown.
    pub body: Option<String>,
    /// Discussion comments in original order.
    pub comments: Vec<Comment>,
    /// Reviews in original order.
    pub reviews: Vec<Review>,
    /// True when the comment window did not cover every comment.
    pub comments_truncated: bool,
    /// True when the review window, or any review's comment window,
    /// did not cover every entry.
    pub reviews_truncated: bool,
}

/// A discussion or review-thread comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Author login.
    pub author: Option<String>,
    /// Comment body, absent for deleted or empty bodies.
    pub body: Option<String>,
}

/// A pull request review with its thread replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Reviewer login.
    pub author: Option<String>,
    /// Review summary body.
    pub body: Option<String>,
    /// Review-level replies in original order.
    pub comments: Vec<Comment>,
}

/// One page of pull requests plus the cursor to continue from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestPage {
    /// Pull requests in the order the API returned them.
    pub nodes: Vec<PullRequest>,
    /// Cursor marking the end of this page.
    pub end_cursor: Option<String>,
    /// Whether another page exists after this one.
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiActor {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiPageInfo {
    #[serde(default)]
    pub(super) end_cursor: Option<String>,
    #[serde(default)]
    pub(super) has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) author: Option<ApiActor>,
    pub(super) body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiCommentConnection {
    #[serde(default)]
    pub(super) page_info: ApiPageInfo,
    #[serde(default)]
    pub(super) nodes: Vec<ApiComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiReview {
    pub(super) author: Option<ApiActor>,
    pub(super) body: Option<String>,
    #[serde(default)]
    pub(super) comments: ApiCommentConnection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiReviewConnection {
    #[serde(default)]
    pub(super) page_info: ApiPageInfo,
    #[serde(default)]
    pub(super) nodes: Vec<ApiReview>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiIssue {
    pub(super) id: String,
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) author: Option<ApiActor>,
    pub(super) body: Option<String>,
    #[serde(default)]
    pub(super) comments: ApiCommentConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiPullRequest {
    pub(super) id: String,
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) author: Option<ApiActor>,
    pub(super) body: Option<String>,
    #[serde(default)]
    pub(super) comments: ApiCommentConnection,
    #[serde(default)]
    pub(super) reviews: ApiReviewConnection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiPullRequestConnection {
    #[serde(default)]
    pub(super) page_info: ApiPageInfo,
    #[serde(default)]
    pub(super) nodes: Vec<ApiPullRequest>,
}

impl From<ApiComment> for Comment {
    fn from(value: ApiComment) -> Self {
        Self {
            author: value.author.and_then(|actor| actor.login),
            body: value.body,
        }
    }
}

impl From<ApiReview> for Review {
    fn from(value: ApiReview) -> Self {
        Self {
            author: value.author.and_then(|actor| actor.login),
            body: value.body,
            comments: value.comments.nodes.into_iter().map(Comment::from).collect(),
        }
    }
}

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            created_at: value.created_at,
            author: value.author.and_then(|actor| actor.login),
            body: value.body,
            comments_truncated: value.comments.page_info.has_next_page,
            comments: value.comments.nodes.into_iter().map(Comment::from).collect(),
        }
    }
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        let reviews_truncated = value.reviews.page_info.has_next_page
            || value
                .reviews
                .nodes
                .iter()
                .any(|review| review.comments.page_info.has_next_page);

        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            created_at: value.created_at,
            author: value.author.and_then(|actor| actor.login),
            body: value.body,
            comments_truncated: value.comments.page_info.has_next_page,
            comments: value.comments.nodes.into_iter().map(Comment::from).collect(),
            reviews: value.reviews.nodes.into_iter().map(Review::from).collect(),
            reviews_truncated,
        }
    }
}

impl From<ApiPullRequestConnection> for PullRequestPage {
    fn from(value: ApiPullRequestConnection) -> Self {
        Self {
            nodes: value.nodes.into_iter().map(PullRequest::from).collect(),
            end_cursor: value.page_info.end_cursor,
            has_next_page: value.page_info.has_next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ApiIssue, ApiPullRequest, ApiPullRequestConnection, Issue, PullRequest, PullRequestPage};

    #[test]
    fn api_issue_converts_into_issue() {
        let value = json!({
            "id": "I_abc",
            "number": 5,
            "title": "Bug",
            "createdAt": "2025-03-01T09:30:00Z",
            "author": { "login": "alice" },
            "body": "desc",
            "comments": {
                "pageInfo": { "hasNextPage": false },
                "nodes": [
                    { "author": { "login": "bob" }, "body": "fix it" }
                ]
            }
        });

        let api: ApiIssue = serde_json::from_value(value).expect("ApiIssue should deserialise");
        let issue: Issue = api.into();

        assert_eq!(issue.number, 5);
        assert_eq!(issue.title, "Bug");
        assert_eq!(issue.author.as_deref(), Some("alice"));
        assert_eq!(issue.body.as_deref(), Some("desc"));
        assert_eq!(issue.comments.len(), 1);
        assert_eq!(issue.comments[0].author.as_deref(), Some("bob"));
        assert!(!issue.comments_truncated);
    }

    #[test]
    fn overflowing_comment_window_sets_the_truncated_flag() {
        let value = json!({
            "id": "I_abc",
            "number": 9,
            "title": "Busy thread",
            "createdAt": "2025-03-01T09:30:00Z",
            "author": null,
            "body": null,
            "comments": {
                "pageInfo": { "hasNextPage": true, "endCursor": "c50" },
                "nodes": []
            }
        });

        let api: ApiIssue = serde_json::from_value(value).expect("ApiIssue should deserialise");
        let issue: Issue = api.into();

        assert!(issue.comments_truncated);
        assert!(issue.author.is_none());
        assert!(issue.body.is_none());
    }

    #[test]
    fn api_pull_request_flattens_review_truncation() {
        let value = json!({
            "id": "PR_abc",
            "number": 7,
            "title": "Refactor",
            "createdAt": "2025-04-02T10:00:00Z",
            "author": { "login": "carol" },
            "body": "pr body",
            "comments": { "pageInfo": { "hasNextPage": false }, "nodes": [] },
            "reviews": {
                "pageInfo": { "hasNextPage": false },
                "nodes": [
                    {
                        "author": { "login": "dave" },
                        "body": "lgtm",
                        "comments": {
                            "pageInfo": { "hasNextPage": true, "endCursor": "r30" },
                            "nodes": [
                                { "author": { "login": "erin" }, "body": "nit" }
                            ]
                        }
                    }
                ]
            }
        });

        let api: ApiPullRequest =
            serde_json::from_value(value).expect("ApiPullRequest should deserialise");
        let pull_request: PullRequest = api.into();

        assert_eq!(pull_request.reviews.len(), 1);
        assert_eq!(pull_request.reviews[0].comments.len(), 1);
        assert!(pull_request.reviews_truncated);
        assert!(!pull_request.comments_truncated);
    }

    #[rstest]
    #[case::fields_absent(json!({ "nodes": [], "pageInfo": {} }))]
    #[case::connection_empty(json!({}))]
    fn missing_connection_fields_default(#[case] value: serde_json::Value) {
        let api: ApiPullRequestConnection =
            serde_json::from_value(value).expect("connection should deserialise");
        let page: PullRequestPage = api.into();

        assert!(page.nodes.is_empty());
        assert!(page.end_cursor.is_none());
        assert!(!page.has_next_page);
    }

    #[test]
    fn connection_carries_the_cursor_through() {
        let value = json!({
            "pageInfo": { "endCursor": "abc", "hasNextPage": true },
            "nodes": []
        });

        let api: ApiPullRequestConnection =
            serde_json::from_value(value).expect("connection should deserialise");
        let page: PullRequestPage = api.into();

        assert_eq!(page.end_cursor.as_deref(), Some("abc"));
        assert!(page.has_next_page);
    }
}
