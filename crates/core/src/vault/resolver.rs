//! Link path resolution.
//!
//! Link text is resolved against the set of indexed files the way a note
//! editor does it: exact paths first, then a case-insensitive match on the
//! path suffix, preferring files next to the linking note.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::ids::{NoteId, normalize_within};
use crate::metadata::LinkStyle;

/// Resolve `link_text` written in `source` to an indexed file.
///
/// ```
/// use std::collections::BTreeSet;
/// use notestore_core::ids::NoteId;
/// use notestore_core::vault::resolve_linkpath;
///
/// let files: BTreeSet<NoteId> =
///     ["a/Note.md", "b/Note.md", "b/pic.png"].into_iter().map(NoteId::new).collect();
/// let source = NoteId::new("b/index.md");
///
/// assert_eq!(resolve_linkpath(&files, "Note", &source), Some(NoteId::new("b/Note.md")));
/// assert_eq!(resolve_linkpath(&files, "a/Note#Intro", &source), Some(NoteId::new("a/Note.md")));
/// assert_eq!(resolve_linkpath(&files, "missing", &source), None);
/// ```
pub fn resolve_linkpath(
    files: &BTreeSet<NoteId>,
    link_text: &str,
    source: &NoteId,
) -> Option<NoteId> {
    let path = link_text.split_once('#').map_or(link_text, |(path, _)| path).trim();
    if path.is_empty() {
        return files.contains(source).then(|| source.clone());
    }

    let source_dir = source.parent();
    let exact = |candidate: &str| -> Option<NoteId> {
        let candidate = normalize_within(candidate)?;
        [NoteId::new(&candidate), NoteId::new(format!("{candidate}.md"))]
            .into_iter()
            .find(|id| files.contains(id))
    };

    if path.starts_with("./") || path.starts_with("../") {
        return exact(&join(source_dir, path));
    }

    if let Some(id) = exact(path).or_else(|| exact(&join(source_dir, path))) {
        return Some(id);
    }

    let wanted = normalize_within(path)?.to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    let wanted_note = format!("{wanted}.md");

    files
        .iter()
        .filter(|id| {
            let candidate = id.as_str().to_lowercase();
            [&wanted, &wanted_note].into_iter().any(|w| {
                candidate == *w
                    || candidate.strip_suffix(w.as_str()).is_some_and(|head| head.ends_with('/'))
            })
        })
        .min_by(|a, b| suffix_rank(a, b, source_dir))
        .cloned()
}

/// Same folder as the source first, then fewer path segments, then shorter
/// and lexicographically smaller paths.
fn suffix_rank(a: &NoteId, b: &NoteId, source_dir: &str) -> Ordering {
    let key = |id: &NoteId| {
        (id.parent() != source_dir, id.as_str().matches('/').count(), id.as_str().len())
    };
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

/// Link text that makes a link written in `source` resolve to `target`.
///
/// Wikilinks use the shortest text that is unambiguous among `files`: the
/// stem for notes or the file name for assets, then the full path. Markdown
/// links use a path relative to the source's folder.
pub fn link_text_for(
    files: &BTreeSet<NoteId>,
    target: &NoteId,
    source: &NoteId,
    style: LinkStyle,
) -> String {
    match style {
        LinkStyle::Markdown => relative_path(source.parent(), target.as_str()),
        LinkStyle::Wiki => {
            let short = if target.is_note() { target.stem() } else { target.name() };
            let full = match target.as_str().rsplit_once('.') {
                Some((path, _)) if target.is_note() => path,
                _ => target.as_str(),
            };

            [short, full]
                .into_iter()
                .find(|text| resolve_linkpath(files, text, source).as_ref() == Some(target))
                .unwrap_or(target.as_str())
                .to_string()
        }
    }
}

/// Path from folder `from_dir` to the vault path `to`, using `..` segments.
///
/// ```
/// use notestore_core::vault::resolver::relative_path;
///
/// assert_eq!(relative_path("a/b", "a/c/x.md"), "../c/x.md");
/// assert_eq!(relative_path("", "a/x.md"), "a/x.md");
/// assert_eq!(relative_path("a", "a/x.md"), "x.md");
/// ```
pub fn relative_path(from_dir: &str, to: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to_parts: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    // Only folders are shared, never the file name itself.
    let limit = to_parts.len().saturating_sub(1);
    let common = from.iter().zip(&to_parts[..limit]).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend(&to_parts[common..]);
    parts.join("/")
}

fn join(dir: &str, path: &str) -> String {
    if dir.is_empty() { path.to_string() } else { format!("{dir}/{path}") }
}
