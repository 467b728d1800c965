//! Frontmatter types and data structures.

use serde_yaml::{Mapping, Value};

/// Represents parsed YAML frontmatter from a markdown document.
///
/// Fields keep the order in which they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub fields: Mapping,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field, keeping its position if it already exists.
    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(Value::String(key.to_string()), value);
    }

    /// Remove a field, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Read a field holding either a list of strings or a single string.
    ///
    /// A single string is split on commas and whitespace, the way tag and
    /// alias fields are commonly written by hand.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(scalar_to_string)
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            Some(other) => scalar_to_string(other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Byte positions of a frontmatter block inside a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSpan {
    /// Start of the YAML text (after the opening fence line).
    pub yaml_start: usize,
    /// End of the YAML text (start of the closing fence line).
    pub yaml_end: usize,
    /// Offset just past the closing `---`, excluding its line terminator.
    pub end_offset: usize,
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// Location of the frontmatter block (if present).
    pub span: Option<FrontmatterSpan>,
    /// The markdown body (everything after the closing fence line).
    pub body: String,
}
