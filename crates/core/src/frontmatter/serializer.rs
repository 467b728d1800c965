//! Frontmatter serialization back to markdown.

use super::parser::locate;
use super::types::Frontmatter;

/// Serialize frontmatter fields to a YAML string (without fences).
pub fn to_yaml(fm: &Frontmatter) -> String {
    if fm.fields.is_empty() {
        return String::new();
    }
    serde_yaml::to_string(&fm.fields).unwrap_or_default()
}

/// Replace the frontmatter block of `content` with `fm`.
///
/// The body is kept byte for byte. A document without frontmatter gets a new
/// block prepended.
pub fn replace_frontmatter(content: &str, fm: &Frontmatter) -> String {
    let yaml = to_yaml(fm);
    match locate(content) {
        Some(span) => format!("---\n{}---{}", yaml, &content[span.end_offset..]),
        None => format!("---\n{}---\n{}", yaml, content),
    }
}
