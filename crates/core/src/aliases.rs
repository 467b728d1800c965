//! Frontmatter aliases derived from level-1 headings.
//!
//! A note titled `# Meeting with Ann` can be linked as `[[Meeting with Ann]]`
//! once the heading text is listed under `aliases`, even after the file has
//! been renamed to a UUID.

use serde_yaml::Value;

use crate::frontmatter::{self, Frontmatter, FrontmatterParseError};
use crate::heading::HeadingEntry;

/// Aliases already declared in the frontmatter, under `aliases` or `alias`.
///
/// A string value is split on commas; list items are kept as written.
pub fn existing_aliases(fm: Option<&Frontmatter>) -> Vec<String> {
    let Some(fm) = fm else { return Vec::new() };

    let mut aliases: Vec<String> = Vec::new();
    for key in ["aliases", "alias"] {
        let values: Vec<String> = match fm.get(key) {
            Some(Value::Sequence(items)) => {
                items.iter().filter_map(Value::as_str).map(|s| s.trim().to_string()).collect()
            }
            Some(Value::String(s)) => s.split(',').map(|a| a.trim().to_string()).collect(),
            _ => Vec::new(),
        };
        for alias in values {
            if !alias.is_empty() && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }
    }
    aliases
}

/// Level-1 heading texts that are not yet aliases, in document order.
///
/// ```
/// use notestore_core::aliases::new_aliases;
/// use notestore_core::heading::HeadingEntry;
///
/// let h = |level, text: &str| HeadingEntry {
///     level,
///     text: text.into(),
///     start_offset: 0,
///     end_offset: 0,
///     start_line: 0,
/// };
/// let headings = [h(1, "Plan"), h(2, "Detail"), h(1, ""), h(1, "Old"), h(1, "Plan")];
///
/// assert_eq!(new_aliases(&["Old".to_string()], &headings), vec!["Plan"]);
/// ```
pub fn new_aliases(existing: &[String], headings: &[HeadingEntry]) -> Vec<String> {
    let mut added: Vec<String> = Vec::new();
    for heading in headings.iter().filter(|h| h.level == 1) {
        let text = heading.text.trim();
        if text.is_empty() || existing.iter().any(|a| a == text) || added.iter().any(|a| a == text) {
            continue;
        }
        added.push(text.to_string());
    }
    added
}

/// Write `aliases` into a note's frontmatter, keeping other fields in place.
///
/// The singular `alias` key is folded into `aliases`; when it is the only
/// one present, `aliases` takes its place. A note without frontmatter gets a
/// new block. The body is not touched.
///
/// # Errors
/// Returns an error when the existing frontmatter is not valid YAML.
pub fn apply_aliases(content: &str, aliases: &[String]) -> Result<String, FrontmatterParseError> {
    let mut fm = frontmatter::parse(content)?.frontmatter.unwrap_or_default();
    let list = Value::Sequence(aliases.iter().cloned().map(Value::String).collect());

    if fm.get("aliases").is_none() && fm.get("alias").is_some() {
        fm.fields = std::mem::take(&mut fm.fields)
            .into_iter()
            .map(|(key, value)| {
                if key.as_str() == Some("alias") {
                    (Value::String("aliases".to_string()), list.clone())
                } else {
                    (key, value)
                }
            })
            .collect();
    } else {
        fm.set("aliases", list);
        fm.remove("alias");
    }
    Ok(frontmatter::replace_frontmatter(content, &fm))
}
