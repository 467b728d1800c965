//! Frontmatter parsing from markdown documents.

use serde_yaml::Value;
use thiserror::Error;

use super::types::{Frontmatter, FrontmatterSpan, ParsedDocument};

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("frontmatter is not a key/value mapping")]
    NotAMapping,
}

/// Locate the frontmatter block of a note.
///
/// Frontmatter must open on the very first line of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// A document whose opening fence is never closed has no frontmatter.
pub fn locate(content: &str) -> Option<FrontmatterSpan> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if !is_fence(first) || !first.ends_with('\n') {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_fence(line) {
            return Some(FrontmatterSpan {
                yaml_start,
                yaml_end: offset,
                end_offset: offset + line.trim_end().len(),
            });
        }
        offset += line.len();
    }
    None
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Parse frontmatter from markdown content.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let Some(span) = locate(content) else {
        return Ok(ParsedDocument { frontmatter: None, span: None, body: content.to_string() });
    };

    let yaml = &content[span.yaml_start..span.yaml_end];
    let frontmatter = parse_yaml(yaml)?;

    // Skip the line terminator of the closing fence
    let rest = &content[span.end_offset..];
    let body = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')).unwrap_or(rest);

    Ok(ParsedDocument {
        frontmatter: Some(frontmatter),
        span: Some(span),
        body: body.to_string(),
    })
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter, FrontmatterParseError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(fields) => Ok(Frontmatter { fields }),
        Value::Null => Ok(Frontmatter::default()),
        _ => Err(FrontmatterParseError::NotAMapping),
    }
}
