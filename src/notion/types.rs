//! Request and response types for the Notion pages API.
//!
//! These are serialize-only shapes for page creation, plus the small slice of
//! the response the exporter reads back. Property names match the destination
//! database schema (`title`, `author`, `createdAt`, `githubUrl`).

use serde::{Deserialize, Serialize};

/// Maximum characters Notion accepts in one rich text content value.
pub const MAX_TEXT_LENGTH: usize = 2_000;

/// Maximum blocks Notion accepts as children of one page create request.
pub const MAX_PAGE_CHILDREN: usize = 100;

/// Plain text content of a rich text item.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TextContent {
    /// The text value.
    pub content: String,
}

/// One rich text item in the minimal form the API accepts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RichText {
    /// Text payload.
    pub text: TextContent,
}

impl RichText {
    /// A single unannotated text run.
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

/// Rich text children of a paragraph-like block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RichTextBody {
    /// Ordered text runs.
    pub rich_text: Vec<RichText>,
}

/// Body of a code block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CodeBody {
    /// Ordered text runs containing the code.
    pub rich_text: Vec<RichText>,
    /// One of Notion's supported language identifiers.
    pub language: String,
}

/// Body of a block that carries no content.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EmptyBody {}

/// One unit of page content accepted by the pages API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Plain paragraph.
    Paragraph {
        /// Block payload.
        paragraph: RichTextBody,
    },
    /// Top-level heading.
    #[serde(rename = "heading_1")]
    Heading1 {
        /// Block payload.
        heading_1: RichTextBody,
    },
    /// Second-level heading.
    #[serde(rename = "heading_2")]
    Heading2 {
        /// Block payload.
        heading_2: RichTextBody,
    },
    /// Third-level heading; deeper markdown headings collapse into this.
    #[serde(rename = "heading_3")]
    Heading3 {
        /// Block payload.
        heading_3: RichTextBody,
    },
    /// Bulleted list entry.
    BulletedListItem {
        /// Block payload.
        bulleted_list_item: RichTextBody,
    },
    /// Numbered list entry.
    NumberedListItem {
        /// Block payload.
        numbered_list_item: RichTextBody,
    },
    /// Block quote.
    Quote {
        /// Block payload.
        quote: RichTextBody,
    },
    /// Fenced code.
    Code {
        /// Block payload.
        code: CodeBody,
    },
    /// Horizontal rule.
    Divider {
        /// Block payload (always empty).
        divider: EmptyBody,
    },
}

impl Block {
    /// Builds a paragraph from prepared text runs.
    #[must_use]
    pub const fn paragraph(rich_text: Vec<RichText>) -> Self {
        Self::Paragraph {
            paragraph: RichTextBody { rich_text },
        }
    }

    /// Builds a heading at the given markdown level (collapsed to 1..=3).
    #[must_use]
    pub fn heading(level: usize, rich_text: Vec<RichText>) -> Self {
        match level {
            1 => Self::Heading1 {
                heading_1: RichTextBody { rich_text },
            },
            2 => Self::Heading2 {
                heading_2: RichTextBody { rich_text },
            },
            _ => Self::Heading3 {
                heading_3: RichTextBody { rich_text },
            },
        }
    }

    /// Builds a second-level heading from a literal string.
    #[must_use]
    pub fn heading_2(text: impl Into<String>) -> Self {
        Self::Heading2 {
            heading_2: RichTextBody {
                rich_text: vec![RichText::plain(text)],
            },
        }
    }

    /// Builds a bulleted list entry.
    #[must_use]
    pub const fn bulleted_item(rich_text: Vec<RichText>) -> Self {
        Self::BulletedListItem {
            bulleted_list_item: RichTextBody { rich_text },
        }
    }

    /// Builds a numbered list entry.
    #[must_use]
    pub const fn numbered_item(rich_text: Vec<RichText>) -> Self {
        Self::NumberedListItem {
            numbered_list_item: RichTextBody { rich_text },
        }
    }

    /// Builds a block quote.
    #[must_use]
    pub const fn quote(rich_text: Vec<RichText>) -> Self {
        Self::Quote {
            quote: RichTextBody { rich_text },
        }
    }

    /// Builds a code block.
    #[must_use]
    pub const fn code(rich_text: Vec<RichText>, language: String) -> Self {
        Self::Code {
            code: CodeBody {
                rich_text,
                language,
            },
        }
    }

    /// Builds a divider.
    #[must_use]
    pub const fn divider() -> Self {
        Self::Divider {
            divider: EmptyBody {},
        }
    }
}

/// Database parent of a created page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageParent {
    /// Always `database_id`.
    #[serde(rename = "type")]
    pub parent_type: String,
    /// Destination database identifier.
    pub database_id: String,
}

impl PageParent {
    /// Parent pointing at a database.
    #[must_use]
    pub fn database(database_id: impl Into<String>) -> Self {
        Self {
            parent_type: "database_id".to_owned(),
            database_id: database_id.into(),
        }
    }
}

/// Title property value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TitleProperty {
    /// Title text runs.
    pub title: Vec<RichText>,
}

/// Rich text property value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RichTextProperty {
    /// Property text runs.
    pub rich_text: Vec<RichText>,
}

/// Date property value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DateProperty {
    /// Date payload.
    pub date: DateValue,
}

/// Start instant of a date property.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DateValue {
    /// RFC 3339 timestamp.
    pub start: String,
}

/// URL property value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UrlProperty {
    /// Absolute URL.
    pub url: String,
}

/// Property map of an exported page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageProperties {
    /// Entity title.
    pub title: TitleProperty,
    /// Author login.
    pub author: RichTextProperty,
    /// Entity creation instant.
    #[serde(rename = "createdAt")]
    pub created_at: DateProperty,
    /// Public source URL.
    #[serde(rename = "githubUrl")]
    pub github_url: UrlProperty,
}

/// Full page creation request body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePageRequest {
    /// Destination database.
    pub parent: PageParent,
    /// Property map.
    pub properties: PageProperties,
    /// Ordered content blocks.
    pub children: Vec<Block>,
}

/// Subset of the created page the exporter reads back.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreatedPage {
    /// Page identifier.
    pub id: String,
    /// Public page URL when the API returns one.
    #[serde(default)]
    pub url: Option<String>,
}

/// Structured error body returned by the Notion API.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiErrorBody {
    #[serde(default)]
    pub(super) code: Option<String>,
}
