//! Notion API client.
//!
//! A thin reqwest wrapper: bearer auth, the pinned `Notion-Version` header,
//! JSON bodies, and classification of error responses into the structured
//! [`ExportError::NotionApi`] variant.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ExportError;

use super::types::{ApiErrorBody, CreatePageRequest, CreatedPage};
use super::{DestinationGateway, NotionToken};

/// Notion API version (pinned stable version).
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Notion API base URL.
pub const NOTION_BASE_URL: &str = "https://api.notion.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-backed destination client.
pub struct NotionClient {
    http: reqwest::Client,
    token: NotionToken,
    base_url: String,
}

impl NotionClient {
    /// Creates a client against the public Notion API.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotionTransport`] when the HTTP client cannot
    /// be constructed.
    pub fn new(token: NotionToken) -> Result<Self, ExportError> {
        Self::with_base_url(token, NOTION_BASE_URL)
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Used by tests to point at a mock server.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NotionTransport`] when the HTTP client cannot
    /// be constructed.
    pub fn with_base_url(
        token: NotionToken,
        base_url: impl Into<String>,
    ) -> Result<Self, ExportError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| ExportError::NotionTransport {
                message: format!("build client failed: {error}"),
            })?;

        Ok(Self {
            http,
            token,
            base_url: base_url.into(),
        })
    }

    /// Makes an authenticated POST request.
    async fn post<Response, Body>(&self, path: &str, body: &Body) -> Result<Response, ExportError>
    where
        Response: DeserializeOwned,
        Body: Serialize + ?Sized,
    {
        let url = format!("{base}{path}", base = self.base_url);
        tracing::debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token.value()))
            .header("Notion-Version", NOTION_API_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|error| ExportError::NotionTransport {
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), body_text));
        }

        response
            .json()
            .await
            .map_err(|error| ExportError::NotionTransport {
                message: format!("invalid response body: {error}"),
            })
    }
}

#[async_trait::async_trait]
impl DestinationGateway for NotionClient {
    async fn create_page(&self, request: &CreatePageRequest) -> Result<CreatedPage, ExportError> {
        self.post("/pages", request).await
    }
}

/// Classifies a non-2xx response into the structured error variant.
///
/// Notion error bodies carry a machine-readable `code`; responses that do not
/// parse keep the whole body for diagnosis under the `unknown` code.
fn classify_api_error(status: u16, body: String) -> ExportError {
    let code = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.code)
        .unwrap_or_else(|| "unknown".to_owned());

    ExportError::NotionApi { status, code, body }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{NOTION_API_VERSION, NotionClient, classify_api_error};
    use crate::error::ExportError;
    use crate::notion::types::{
        Block, CreatePageRequest, DateProperty, DateValue, PageParent, PageProperties, RichText,
        RichTextProperty, TitleProperty, UrlProperty,
    };
    use crate::notion::{DestinationGateway, NotionToken};

    fn sample_request() -> CreatePageRequest {
        CreatePageRequest {
            parent: PageParent::database("db-123"),
            properties: PageProperties {
                title: TitleProperty {
                    title: vec![RichText::plain("Bug")],
                },
                author: RichTextProperty {
                    rich_text: vec![RichText::plain("alice")],
                },
                created_at: DateProperty {
                    date: DateValue {
                        start: "2025-03-01T09:30:00Z".to_owned(),
                    },
                },
                github_url: UrlProperty {
                    url: "https://github.com/octo/repo/issues/5".to_owned(),
                },
            },
            children: vec![Block::paragraph(vec![RichText::plain("desc")])],
        }
    }

    #[tokio::test]
    async fn create_page_sends_versioned_authenticated_request() {
        let server = MockServer::start().await;
        let token = NotionToken::new("secret-token").expect("token should be valid");
        let client =
            NotionClient::with_base_url(token, server.uri()).expect("client should build");

        Mock::given(method("POST"))
            .and(path("/pages"))
            .and(header("Authorization", "Bearer secret-token"))
            .and(header("Notion-Version", NOTION_API_VERSION))
            .and(body_partial_json(json!({
                "parent": { "type": "database_id", "database_id": "db-123" },
                "properties": {
                    "title": { "title": [{ "text": { "content": "Bug" } }] },
                    "githubUrl": { "url": "https://github.com/octo/repo/issues/5" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "page-1",
                "url": "https://www.notion.so/page-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .create_page(&sample_request())
            .await
            .expect("page creation should succeed");

        assert_eq!(page.id, "page-1");
        assert_eq!(page.url.as_deref(), Some("https://www.notion.so/page-1"));
    }

    #[tokio::test]
    async fn rejected_page_creation_is_classified() {
        let server = MockServer::start().await;
        let token = NotionToken::new("secret-token").expect("token should be valid");
        let client =
            NotionClient::with_base_url(token, server.uri()).expect("client should build");

        Mock::given(method("POST"))
            .and(path("/pages"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "object": "error",
                "status": 400,
                "code": "validation_error",
                "message": "body failed validation"
            })))
            .mount(&server)
            .await;

        let error = client
            .create_page(&sample_request())
            .await
            .expect_err("rejected creation should fail");

        match error {
            ExportError::NotionApi { status, code, body } => {
                assert_eq!(status, 400);
                assert_eq!(code, "validation_error");
                assert!(body.contains("body failed validation"));
            }
            other => panic!("expected NotionApi, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_bodies_keep_the_unknown_code() {
        let error = classify_api_error(500, "<html>gateway timeout</html>".to_owned());
        match error {
            ExportError::NotionApi { status, code, body } => {
                assert_eq!(status, 500);
                assert_eq!(code, "unknown");
                assert!(body.contains("gateway timeout"));
            }
            other => panic!("expected NotionApi, got {other:?}"),
        }
    }
}
