use crate::frontmatter::Frontmatter;
use crate::heading::HeadingEntry;

/// Everything the index knows about one note.
#[derive(Debug, Clone, Default)]
pub struct NoteMetadata {
    /// Parsed frontmatter (if present and readable).
    pub frontmatter: Option<Frontmatter>,
    /// Offset just past the closing frontmatter fence; 0 without frontmatter.
    pub frontmatter_end: usize,
    /// Headings in document order.
    pub headings: Vec<HeadingEntry>,
    /// Links and embeds in document order.
    pub links: Vec<NoteLink>,
}

/// Whether a link references or inlines its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `[[target]]` or `[text](target)`
    Link,
    /// `![[target]]` or `![alt](target)`
    Embed,
}

/// Syntax a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    Wiki,
    Markdown,
}

/// A link or embed found in a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLink {
    pub kind: LinkKind,
    pub style: LinkStyle,
    /// Link path without subpath, as written (URL-decoded for markdown links).
    pub path: String,
    /// Heading or block reference after `#`, without the `#`.
    pub subpath: Option<String>,
    /// Wikilink alias or markdown link text.
    pub display: Option<String>,
    /// Byte offset where the whole occurrence starts.
    pub start: usize,
    /// Byte offset where the whole occurrence ends.
    pub end: usize,
}

impl NoteLink {
    /// The link text handed to the resolver.
    pub fn link_text(&self) -> &str {
        &self.path
    }

    /// Render this link again with a new path, keeping everything else.
    pub fn render(&self, path: &str) -> String {
        let bang = if self.kind == LinkKind::Embed { "!" } else { "" };
        let subpath = self.subpath.as_ref().map(|s| format!("#{s}")).unwrap_or_default();
        match self.style {
            LinkStyle::Wiki => {
                let alias = self.display.as_ref().map(|a| format!("|{a}")).unwrap_or_default();
                format!("{bang}[[{path}{subpath}{alias}]]")
            }
            LinkStyle::Markdown => {
                let text = self.display.as_deref().unwrap_or("");
                format!("{bang}[{text}]({}{subpath})", encode_url_path(path))
            }
        }
    }
}

/// Percent-encode the characters that would break a markdown link target.
pub fn encode_url_path(path: &str) -> String {
    path.replace('%', "%25").replace(' ', "%20").replace('(', "%28").replace(')', "%29")
}
