//! Note metadata extraction.
//!
//! This is the index the rest of the crate reads from: the frontmatter
//! block, the heading outline with byte positions, and every outgoing link
//! or embed. Headings come from comrak; links are matched by pattern.

pub mod links;
pub mod outline;
pub mod types;

pub use links::extract_links;
pub use outline::extract_headings;
pub use types::{LinkKind, LinkStyle, NoteLink, NoteMetadata};

use tracing::warn;

use crate::frontmatter;

/// Extract all metadata for a note from its raw text.
///
/// Invalid YAML in the frontmatter does not fail extraction: the block is
/// still skipped for headings and links, and `frontmatter` is left empty.
pub fn extract(content: &str) -> NoteMetadata {
    let span = frontmatter::locate(content);
    let frontmatter_end = span.map_or(0, |s| s.end_offset);

    let frontmatter = match frontmatter::parse(content) {
        Ok(doc) => doc.frontmatter,
        Err(e) => {
            warn!("ignoring unreadable frontmatter: {e}");
            None
        }
    };

    NoteMetadata {
        frontmatter,
        frontmatter_end,
        headings: extract_headings(content, frontmatter_end),
        links: extract_links(content, frontmatter_end),
    }
}
