//! Heading outline extraction via comrak.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};

use crate::heading::HeadingEntry;

/// Find the top-level headings of a note, with byte positions into `content`.
///
/// Parsing starts at `frontmatter_end` so the frontmatter fences are never
/// mistaken for a thematic break or a setext underline. Headings nested in
/// block quotes or lists are not part of the outline.
pub fn extract_headings(content: &str, frontmatter_end: usize) -> Vec<HeadingEntry> {
    let body = &content[frontmatter_end..];
    let line_starts = line_starts(body);
    let lines_before = content[..frontmatter_end].matches('\n').count();

    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, body, &options);

    let mut headings = Vec::new();
    for node in root.children() {
        let data = node.data.borrow();
        let NodeValue::Heading(ref heading) = data.value else {
            continue;
        };

        let pos = data.sourcepos;
        let Some(&start_line_offset) = line_starts.get(pos.start.line.saturating_sub(1)) else {
            continue;
        };

        headings.push(HeadingEntry {
            level: heading.level,
            text: collect_text(node).trim().to_string(),
            start_offset: frontmatter_end + start_line_offset + pos.start.column.saturating_sub(1),
            end_offset: frontmatter_end + line_end_offset(body, &line_starts, pos.end.line),
            start_line: lines_before + pos.start.line - 1,
        });
    }

    headings
}

/// Byte offset of the start of every line.
fn line_starts(input: &str) -> Vec<usize> {
    std::iter::once(0).chain(input.match_indices('\n').map(|(i, _)| i + 1)).collect()
}

/// Byte offset at the end of a 1-based line, before its terminator.
fn line_end_offset(input: &str, line_starts: &[usize], line_num: usize) -> usize {
    let Some(&start) = line_starts.get(line_num.saturating_sub(1)) else {
        return input.len();
    };
    let end = input[start..].find('\n').map_or(input.len(), |i| start + i);
    if input[..end].ends_with('\r') { end - 1 } else { end }
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.parse.smart = false;
    options
}

fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants() {
        match child.data.borrow().value {
            NodeValue::Text(ref t) => text.push_str(t),
            NodeValue::Code(ref c) => text.push_str(&c.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
