//! Markdown to Notion block conversion.
//!
//! Plays the role of the destination-side content converter: one markdown
//! string in, a sequence of block request objects out. Notion enforces hard
//! limits on rich text length and children count; [`NotionLimits`] decides
//! whether over-limit content is clipped or rejected, and callers that treat
//! conversion as non-critical log the error and move on.
//!
//! The parser is deliberately line-based: headings, fenced code, block
//! quotes, list items, dividers, and paragraphs. Inline markup is carried
//! through as plain text.

use thiserror::Error;

use crate::notion::types::{Block, MAX_PAGE_CHILDREN, MAX_TEXT_LENGTH, RichText};

/// Conversion failures when limits are enforced strictly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// A text run exceeds Notion's per-run character limit.
    #[error("rich text run of {length} characters exceeds the {limit} character limit")]
    TextTooLong {
        /// Characters in the offending run.
        length: usize,
        /// The enforced limit.
        limit: usize,
    },

    /// The conversion produced more blocks than one request may carry.
    #[error("conversion produced {count} blocks, more than the {limit} block limit")]
    TooManyBlocks {
        /// Blocks the conversion produced.
        count: usize,
        /// The enforced limit.
        limit: usize,
    },
}

/// Limit handling for one conversion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotionLimits {
    /// Clip over-limit content instead of failing the conversion.
    pub truncate: bool,
}

impl Default for NotionLimits {
    fn default() -> Self {
        Self { truncate: true }
    }
}

/// Converts one markdown string into Notion blocks.
///
/// # Errors
///
/// Returns [`ConvertError`] when limits are exceeded and `limits.truncate`
/// is false.
pub fn markdown_to_blocks(markdown: &str, limits: &NotionLimits) -> Result<Vec<Block>, ConvertError> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines.get(index).copied().unwrap_or_default();
        let trimmed = line.trim();

        if let Some((fence_char, fence_len, info)) = fence_open(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph, limits)?;
            let mut code_lines: Vec<&str> = Vec::new();
            index += 1;
            while index < lines.len() {
                let candidate = lines.get(index).copied().unwrap_or_default();
                if fence_close(candidate.trim(), fence_char, fence_len) {
                    break;
                }
                code_lines.push(candidate);
                index += 1;
            }
            // Skips the closing fence; an unterminated fence runs to the end.
            index += 1;
            let text = clipped_text(&code_lines.join("\n"), limits)?;
            blocks.push(Block::code(text, code_language(info)));
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph, limits)?;
        } else if is_divider(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph, limits)?;
            blocks.push(Block::divider());
        } else if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph, limits)?;
            blocks.push(Block::heading(level, clipped_text(text, limits)?));
        } else if let Some(first) = quote_text(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph, limits)?;
            let mut quote_lines = vec![first];
            while let Some(next) = lines.get(index + 1).and_then(|candidate| quote_text(candidate.trim())) {
                quote_lines.push(next);
                index += 1;
            }
            blocks.push(Block::quote(clipped_text(&quote_lines.join("\n"), limits)?));
        } else if let Some(text) = bullet_text(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph, limits)?;
            blocks.push(Block::bulleted_item(clipped_text(text, limits)?));
        } else if let Some(text) = numbered_text(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph, limits)?;
            blocks.push(Block::numbered_item(clipped_text(text, limits)?));
        } else {
            paragraph.push(trimmed);
        }

        index += 1;
    }

    flush_paragraph(&mut blocks, &mut paragraph, limits)?;

    if blocks.len() > MAX_PAGE_CHILDREN {
        if limits.truncate {
            blocks.truncate(MAX_PAGE_CHILDREN);
        } else {
            return Err(ConvertError::TooManyBlocks {
                count: blocks.len(),
                limit: MAX_PAGE_CHILDREN,
            });
        }
    }

    Ok(blocks)
}

fn flush_paragraph(
    blocks: &mut Vec<Block>,
    paragraph: &mut Vec<&str>,
    limits: &NotionLimits,
) -> Result<(), ConvertError> {
    if paragraph.is_empty() {
        return Ok(());
    }
    let text = paragraph.join("\n");
    paragraph.clear();
    blocks.push(Block::paragraph(clipped_text(&text, limits)?));
    Ok(())
}

/// Builds the text runs for a block, enforcing the per-run limit.
fn clipped_text(text: &str, limits: &NotionLimits) -> Result<Vec<RichText>, ConvertError> {
    let length = text.chars().count();
    if length <= MAX_TEXT_LENGTH {
        return Ok(vec![RichText::plain(text)]);
    }
    if limits.truncate {
        let clipped: String = text.chars().take(MAX_TEXT_LENGTH).collect();
        return Ok(vec![RichText::plain(clipped)]);
    }
    Err(ConvertError::TextTooLong {
        length,
        limit: MAX_TEXT_LENGTH,
    })
}

fn fence_open(line: &str) -> Option<(char, usize, &str)> {
    for fence_char in ['`', '~'] {
        let fence_len = line.chars().take_while(|&c| c == fence_char).count();
        if fence_len >= 3 {
            let info = line.trim_start_matches(fence_char).trim();
            return Some((fence_char, fence_len, info));
        }
    }
    None
}

fn fence_close(line: &str, fence_char: char, fence_len: usize) -> bool {
    !line.is_empty()
        && line.chars().all(|c| c == fence_char)
        && line.chars().count() >= fence_len
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = line.get(level..)?;
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.strip_prefix(' ').map(|text| (level, text.trim()))
}

fn quote_text(line: &str) -> Option<&str> {
    line.strip_prefix('>').map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
}

fn bullet_text(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

fn numbered_text(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line.get(digits..)?;
    rest.strip_prefix(". ").map(str::trim)
}

fn is_divider(line: &str) -> bool {
    line.chars().count() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&marker| line.chars().all(|c| c == marker))
}

/// Notion's supported code block languages (the subset this tool can emit).
const SUPPORTED_LANGUAGES: &[&str] = &[
    "bash",
    "c",
    "c#",
    "c++",
    "css",
    "diff",
    "docker",
    "go",
    "graphql",
    "html",
    "java",
    "javascript",
    "json",
    "kotlin",
    "markdown",
    "objective-c",
    "perl",
    "php",
    "plain text",
    "powershell",
    "python",
    "r",
    "ruby",
    "rust",
    "scala",
    "shell",
    "sql",
    "swift",
    "typescript",
    "xml",
    "yaml",
];

/// Shorthand info strings mapped to their Notion language names.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("golang", "go"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("kt", "kotlin"),
    ("md", "markdown"),
    ("objc", "objective-c"),
    ("pl", "perl"),
    ("ps1", "powershell"),
    ("py", "python"),
    ("rb", "ruby"),
    ("rs", "rust"),
    ("sh", "shell"),
    ("text", "plain text"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("txt", "plain text"),
    ("yml", "yaml"),
    ("zsh", "shell"),
];

/// Maps a fence info string onto a supported Notion language.
fn code_language(info: &str) -> String {
    let first = info
        .split([' ', ',', ';'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    let resolved = LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == first)
        .map_or(first.as_str(), |(_, language)| language);

    if SUPPORTED_LANGUAGES.contains(&resolved) {
        resolved.to_owned()
    } else {
        "plain text".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConvertError, NotionLimits, markdown_to_blocks};
    use crate::notion::types::{Block, MAX_PAGE_CHILDREN, MAX_TEXT_LENGTH, RichText};

    fn convert(markdown: &str) -> Vec<Block> {
        markdown_to_blocks(markdown, &NotionLimits::default()).expect("conversion should succeed")
    }

    fn paragraph_content(block: &Block) -> String {
        match block {
            Block::Paragraph { paragraph } => paragraph
                .rich_text
                .iter()
                .map(|run| run.text.content.clone())
                .collect(),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_produces_no_blocks() {
        assert!(convert("").is_empty());
        assert!(convert("\n\n").is_empty());
    }

    #[test]
    fn adjacent_lines_form_one_paragraph() {
        let blocks = convert("first line\nsecond line\n\nnext paragraph");
        assert_eq!(blocks.len(), 2);
        assert_eq!(paragraph_content(&blocks[0]), "first line\nsecond line");
        assert_eq!(paragraph_content(&blocks[1]), "next paragraph");
    }

    #[rstest]
    #[case("# Title", 1)]
    #[case("## Comments", 2)]
    #[case("### Detail", 3)]
    #[case("##### Deep", 3)]
    fn headings_map_to_notion_levels(#[case] markdown: &str, #[case] level: usize) {
        let blocks = convert(markdown);
        assert_eq!(blocks.len(), 1);
        let matches_level = match (&blocks[0], level) {
            (Block::Heading1 { .. }, 1) | (Block::Heading2 { .. }, 2) | (Block::Heading3 { .. }, 3) => true,
            _ => false,
        };
        assert!(matches_level, "expected level {level}, got {:?}", blocks[0]);
    }

    #[test]
    fn comments_heading_keeps_its_text() {
        let blocks = convert("## Comments");
        match &blocks[0] {
            Block::Heading2 { heading_2 } => {
                assert_eq!(heading_2.rich_text, vec![RichText::plain("Comments")]);
            }
            other => panic!("expected heading_2, got {other:?}"),
        }
    }

    #[test]
    fn fenced_diff_becomes_a_diff_code_block() {
        let blocks = convert("```diff\n+a\n-b\n```");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { code } => {
                assert_eq!(code.language, "diff");
                assert_eq!(code.rich_text, vec![RichText::plain("+a\n-b")]);
            }
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[rstest]
    #[case("rust", "rust")]
    #[case("rs", "rust")]
    #[case("ts", "typescript")]
    #[case("", "plain text")]
    #[case("brainfuck", "plain text")]
    fn fence_info_maps_to_supported_languages(#[case] info: &str, #[case] expected: &str) {
        let blocks = convert(&format!("```{info}\ncode\n```"));
        match &blocks[0] {
            Block::Code { code } => assert_eq!(code.language, expected),
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_fence_runs_to_the_end() {
        let blocks = convert("```\nline one\nline two");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { code } => {
                assert_eq!(code.rich_text, vec![RichText::plain("line one\nline two")]);
            }
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn consecutive_quote_lines_merge() {
        let blocks = convert("> first\n> second\n\nafter");
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::Quote { quote } => {
                assert_eq!(quote.rich_text, vec![RichText::plain("first\nsecond")]);
            }
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn list_lines_become_individual_items() {
        let blocks = convert("- one\n- two\n1. first\n2. second");
        assert_eq!(blocks.len(), 4);
        assert!(matches!(blocks[0], Block::BulletedListItem { .. }));
        assert!(matches!(blocks[1], Block::BulletedListItem { .. }));
        assert!(matches!(blocks[2], Block::NumberedListItem { .. }));
        assert!(matches!(blocks[3], Block::NumberedListItem { .. }));
    }

    #[test]
    fn rules_become_dividers() {
        let blocks = convert("before\n\n---\n\nafter");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::Divider { .. }));
    }

    #[test]
    fn long_runs_are_clipped_when_truncation_is_enabled() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 100);
        let blocks = convert(&long);
        assert_eq!(paragraph_content(&blocks[0]).chars().count(), MAX_TEXT_LENGTH);
    }

    #[test]
    fn long_runs_fail_when_truncation_is_disabled() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 100);
        let error = markdown_to_blocks(&long, &NotionLimits { truncate: false })
            .expect_err("over-limit run should fail");
        assert_eq!(
            error,
            ConvertError::TextTooLong {
                length: MAX_TEXT_LENGTH + 100,
                limit: MAX_TEXT_LENGTH,
            }
        );
    }

    #[test]
    fn block_count_is_capped_per_conversion() {
        let many = vec!["line"; MAX_PAGE_CHILDREN + 20].join("\n\n");

        let clipped = convert(&many);
        assert_eq!(clipped.len(), MAX_PAGE_CHILDREN);

        let error = markdown_to_blocks(&many, &NotionLimits { truncate: false })
            .expect_err("over-limit count should fail");
        assert_eq!(
            error,
            ConvertError::TooManyBlocks {
                count: MAX_PAGE_CHILDREN + 20,
                limit: MAX_PAGE_CHILDREN,
            }
        );
    }
}
