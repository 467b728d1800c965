//! Link and embed extraction.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{LinkKind, LinkStyle, NoteLink};

// Regex patterns for link extraction
static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches [[target]], [[target|alias]] and the embed form ![[...]]
    // Captures:
    // 1: "!" for embeds
    // 2: target (may include #section)
    // 3: alias (if present)
    Regex::new(r"(!?)\[\[([^\[\]|]*)(?:\|([^\[\]]*))?\]\]").unwrap()
});

static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches [text](url), ![alt](url), [text](<url with spaces>) and an
    // optional "title" after the url
    // Captures:
    // 1: "!" for embeds
    // 2: text
    // 3: url
    Regex::new(r#"(!?)\[([^\[\]]*)\]\((<[^<>]*>|[^()\s]+)(?:\s+"[^"]*")?\)"#).unwrap()
});

/// Extract the links and embeds of a note body, in document order.
///
/// Scanning starts at `from` so links inside the frontmatter are skipped.
/// External URLs are not links to vault files and are left out.
pub fn extract_links(content: &str, from: usize) -> Vec<NoteLink> {
    let body = &content[from..];
    let mut links = Vec::new();

    for cap in WIKILINK_RE.captures_iter(body) {
        let Some(whole) = cap.get(0) else { continue };
        let (path, subpath) = split_subpath(cap.get(2).map_or("", |m| m.as_str()));
        if path.is_empty() && subpath.is_none() {
            continue;
        }

        links.push(NoteLink {
            kind: kind(cap.get(1).map_or("", |m| m.as_str())),
            style: LinkStyle::Wiki,
            path: path.to_string(),
            subpath,
            display: cap.get(3).map(|m| m.as_str().to_string()),
            start: from + whole.start(),
            end: from + whole.end(),
        });
    }

    let wiki_spans: Vec<(usize, usize)> = links.iter().map(|l| (l.start, l.end)).collect();

    for cap in MARKDOWN_LINK_RE.captures_iter(body) {
        let Some(whole) = cap.get(0) else { continue };
        let (start, end) = (from + whole.start(), from + whole.end());
        if wiki_spans.iter().any(|&(s, e)| start < e && s < end) {
            continue;
        }

        let url = cap.get(3).map_or("", |m| m.as_str());
        let url = url.strip_prefix('<').and_then(|u| u.strip_suffix('>')).unwrap_or(url);
        if is_external(url) {
            continue;
        }

        let decoded = decode_url_path(url);
        let (path, subpath) = split_subpath(&decoded);

        links.push(NoteLink {
            kind: kind(cap.get(1).map_or("", |m| m.as_str())),
            style: LinkStyle::Markdown,
            path: path.to_string(),
            subpath,
            display: Some(cap.get(2).map_or("", |m| m.as_str()).to_string()),
            start,
            end,
        });
    }

    links.sort_by_key(|l| l.start);
    links
}

fn kind(bang: &str) -> LinkKind {
    if bang.is_empty() { LinkKind::Link } else { LinkKind::Embed }
}

fn split_subpath(target: &str) -> (&str, Option<String>) {
    match target.split_once('#') {
        Some((path, sub)) => (path.trim(), Some(sub.to_string())),
        None => (target.trim(), None),
    }
}

fn is_external(url: &str) -> bool {
    url.contains("://") || url.starts_with("mailto:") || url.starts_with("data:")
}

/// Decode `%XX` escapes in a markdown link target.
fn decode_url_path(url: &str) -> String {
    let bytes = url.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hex) = url.get(i + 1..i + 3)
            && hex.bytes().all(|b| b.is_ascii_hexdigit())
            && let Ok(b) = u8::from_str_radix(hex, 16)
        {
            out.push(b);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
