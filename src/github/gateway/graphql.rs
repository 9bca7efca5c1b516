//! GraphQL plumbing: query text, response envelope, and the post helper.

use octocrab::Octocrab;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ExportError;

use super::error_mapping::map_octocrab_error;

pub(super) const ISSUE_QUERY: &str = r"
query($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    issue(number: $number) {
      id
      number
      title
      createdAt
      author { login }
      body
      comments(first: 50) {
        pageInfo { hasNextPage }
        nodes { author { login } body }
      }
    }
  }
}";

pub(super) const ISSUES_QUERY: &str = r"
query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    issues(last: 100, orderBy: { field: CREATED_AT, direction: ASC }) {
      nodes {
        id
        number
        title
        createdAt
        author { login }
        body
        comments(first: 50) {
          pageInfo { hasNextPage }
          nodes { author { login } body }
        }
      }
    }
  }
}";

pub(super) const PULL_REQUEST_QUERY: &str = r"
query($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      id
      number
      title
      createdAt
      author { login }
      body
      comments(first: 50) {
        pageInfo { hasNextPage }
        nodes { author { login } body }
      }
      reviews(first: 30) {
        pageInfo { hasNextPage }
        nodes {
          author { login }
          body
          comments(first: 30) {
            pageInfo { hasNextPage }
            nodes { author { login } body }
          }
        }
      }
    }
  }
}";

pub(super) const PULL_REQUESTS_QUERY: &str = r"
query($owner: String!, $repo: String!, $after: String) {
  repository(owner: $owner, name: $repo) {
    pullRequests(first: 100, after: $after, orderBy: { field: CREATED_AT, direction: DESC }) {
      pageInfo { endCursor hasNextPage }
      nodes {
        id
        number
        title
        createdAt
        author { login }
        body
        comments(first: 50) {
          pageInfo { hasNextPage }
          nodes { author { login } body }
        }
        reviews(first: 30) {
          pageInfo { hasNextPage }
          nodes {
            author { login }
            body
            comments(first: 30) {
              pageInfo { hasNextPage }
              nodes { author { login } body }
            }
          }
        }
      }
    }
  }
}";

/// Top-level GraphQL response: data plus any query-level errors.
#[derive(Debug, Deserialize)]
pub(super) struct GraphQlEnvelope<T> {
    pub(super) data: Option<T>,
    #[serde(default)]
    pub(super) errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQlError {
    pub(super) message: String,
}

/// Posts a query and unwraps the envelope.
///
/// A non-empty `errors` array or an absent `data` object both map to
/// [`ExportError::Query`]; transport and API failures are mapped by
/// [`map_octocrab_error`].
pub(super) async fn post_query<T>(
    client: &Octocrab,
    operation: &str,
    query: &str,
    variables: serde_json::Value,
) -> Result<T, ExportError>
where
    T: DeserializeOwned,
{
    let payload = json!({ "query": query, "variables": variables });
    let envelope: GraphQlEnvelope<T> = client
        .graphql(&payload)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;

    if let Some(error) = envelope.errors.first() {
        return Err(ExportError::Query {
            message: format!("{operation} failed: {message}", message = error.message),
        });
    }

    envelope.data.ok_or_else(|| ExportError::Query {
        message: format!("{operation} returned no data"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::GraphQlEnvelope;

    #[test]
    fn envelope_deserialises_errors_without_data() {
        let value = json!({
            "errors": [{ "message": "Could not resolve to a Repository" }]
        });

        let envelope: GraphQlEnvelope<serde_json::Value> =
            serde_json::from_value(value).expect("envelope should deserialise");

        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.len(), 1);
    }

    #[test]
    fn queries_request_the_documented_windows() {
        assert!(super::ISSUE_QUERY.contains("comments(first: 50)"));
        assert!(super::ISSUES_QUERY.contains("last: 100"));
        assert!(super::ISSUES_QUERY.contains("direction: ASC"));
        assert!(super::PULL_REQUEST_QUERY.contains("reviews(first: 30)"));
        assert!(super::PULL_REQUEST_QUERY.contains("comments(first: 30)"));
        assert!(super::PULL_REQUESTS_QUERY.contains("first: 100"));
        assert!(super::PULL_REQUESTS_QUERY.contains("direction: DESC"));
        assert!(super::PULL_REQUESTS_QUERY.contains("endCursor"));
    }
}
