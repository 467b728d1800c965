//! Renames that keep links pointing at the moved file.

use std::collections::BTreeSet;
use std::fs;

use tracing::{debug, info};

use super::resolver::{link_text_for, resolve_linkpath};
use super::{Vault, VaultError};
use crate::frontmatter;
use crate::ids::NoteId;
use crate::metadata::{NoteLink, extract_links};

/// A single link rewrite inside one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUpdate {
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub replacement: String,
}

/// Rewrites planned for one file, keyed by its id before the rename.
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: NoteId,
    pub updates: Vec<LinkUpdate>,
}

/// What a rename would do, computed without touching the disk.
#[derive(Debug, Clone)]
pub struct RenamePreview {
    pub from: NoteId,
    pub to: NoteId,
    pub changes: Vec<FileChange>,
}

impl RenamePreview {
    pub fn references_updated(&self) -> usize {
        self.changes.iter().map(|c| c.updates.len()).sum()
    }
}

/// Result of a completed rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameResult {
    pub from: NoteId,
    pub to: NoteId,
    /// Files whose links were rewritten, by their id after the rename.
    pub files_modified: Vec<NoteId>,
    pub references_updated: usize,
}

impl Vault {
    /// Plan the link rewrites for moving `from` to `to`.
    ///
    /// Links that resolve to `from`, and links written inside `from`, are
    /// candidates. A candidate is rewritten only when its text would stop
    /// resolving to the same file once the move has happened.
    pub fn preview_rename(&self, from: &NoteId, to: &NoteId) -> Result<RenamePreview, VaultError> {
        if !self.contains(from) {
            return Err(VaultError::NotFound(from.clone()));
        }
        if self.contains(to) || self.path_of(to).exists() {
            return Err(VaultError::AlreadyExists(to.clone()));
        }

        let mut after = self.files.clone();
        after.remove(from);
        after.insert(to.clone());

        let mut changes = Vec::new();
        for note in self.files.iter().filter(|id| id.is_note()) {
            let text = self.read_text(note)?;
            let body_start = frontmatter::locate(&text).map_or(0, |s| s.end_offset);
            let new_source = if note == from { to } else { note };

            let updates: Vec<LinkUpdate> = extract_links(&text, body_start)
                .iter()
                .filter_map(|link| {
                    let replacement =
                        replacement_for(&self.files, &after, link, note, new_source, from, to)?;
                    Some(LinkUpdate {
                        start: link.start,
                        end: link.end,
                        original: text[link.start..link.end].to_string(),
                        replacement,
                    })
                })
                .collect();

            if !updates.is_empty() {
                debug!(file = %note, links = updates.len(), "links to rewrite");
                changes.push(FileChange { path: note.clone(), updates });
            }
        }

        Ok(RenamePreview { from: from.clone(), to: to.clone(), changes })
    }

    /// Move a file inside the vault and rewrite the links affected by it.
    ///
    /// Missing parent folders of `to` are created.
    ///
    /// # Errors
    /// `NotFound` if `from` is not indexed, `AlreadyExists` if `to` is taken,
    /// or an I/O error from the move or a link rewrite.
    pub fn rename_file(&mut self, from: &NoteId, to: &NoteId) -> Result<RenameResult, VaultError> {
        if from == to {
            return Ok(RenameResult {
                from: from.clone(),
                to: to.clone(),
                files_modified: Vec::new(),
                references_updated: 0,
            });
        }

        let preview = self.preview_rename(from, to)?;

        let target = self.path_of(to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| VaultError::io(parent, e))?;
        }
        fs::rename(self.path_of(from), &target).map_err(|e| VaultError::io(&target, e))?;

        self.files.remove(from);
        self.files.insert(to.clone());
        info!(from = %from, to = %to, "renamed file");

        let mut files_modified = Vec::new();
        for change in &preview.changes {
            let path = if change.path == *from { to.clone() } else { change.path.clone() };
            let text = self.read_text(&path)?;
            self.write_text(&path, &apply_updates(&text, &change.updates))?;
            files_modified.push(path);
        }

        Ok(RenameResult {
            from: from.clone(),
            to: to.clone(),
            references_updated: preview.references_updated(),
            files_modified,
        })
    }
}

/// New text for `link`, or None when it needs no rewrite.
fn replacement_for(
    before: &BTreeSet<NoteId>,
    after: &BTreeSet<NoteId>,
    link: &NoteLink,
    source: &NoteId,
    new_source: &NoteId,
    from: &NoteId,
    to: &NoteId,
) -> Option<String> {
    let old_target = resolve_linkpath(before, link.link_text(), source)?;
    if source != from && old_target != *from {
        return None;
    }

    let new_target = if old_target == *from { to.clone() } else { old_target };
    if resolve_linkpath(after, link.link_text(), new_source).as_ref() == Some(&new_target) {
        return None;
    }

    let text = link_text_for(after, &new_target, new_source, link.style);
    Some(link.render(&text))
}

/// Apply updates from the end of the text backwards so earlier offsets stay valid.
fn apply_updates(content: &str, updates: &[LinkUpdate]) -> String {
    let mut sorted: Vec<&LinkUpdate> = updates.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = content.to_string();
    for update in sorted {
        if result.get(update.start..update.end) == Some(update.original.as_str()) {
            result.replace_range(update.start..update.end, &update.replacement);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn replacements(preview: &RenamePreview) -> BTreeMap<String, Vec<String>> {
        preview
            .changes
            .iter()
            .map(|c| (c.path.to_string(), c.updates.iter().map(|u| u.replacement.clone()).collect()))
            .collect()
    }

    fn vault(files: &[(&str, &str)]) -> (TempDir, Vault) {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let abs = dir.path().join(path);
            fs::create_dir_all(abs.parent().unwrap()).unwrap();
            fs::write(abs, content).unwrap();
        }
        let vault = Vault::open(dir.path()).unwrap();
        (dir, vault)
    }

    fn read(dir: &TempDir, path: &str) -> String {
        fs::read_to_string(dir.path().join(path)).unwrap()
    }

    #[test]
    fn test_backlinks_are_rewritten() {
        let (dir, mut v) = vault(&[
            ("Inbox/Idea.md", "# Idea\n"),
            ("daily.md", "See [[Idea]], [[Idea#Plan|the plan]] and ![[Idea]].\n"),
            ("other.md", "[md](Inbox/Idea.md) and [[Unrelated]]\n"),
        ]);

        let result = v.rename_file(&NoteId::new("Inbox/Idea.md"), &NoteId::new("store/abc.md")).unwrap();

        assert_eq!(result.references_updated, 4);
        assert_eq!(read(&dir, "daily.md"), "See [[abc]], [[abc#Plan|the plan]] and ![[abc]].\n");
        assert_eq!(read(&dir, "other.md"), "[md](store/abc.md) and [[Unrelated]]\n");
        assert!(dir.path().join("store/abc.md").is_file());
        assert!(!dir.path().join("Inbox/Idea.md").exists());
        assert!(v.contains(&NoteId::new("store/abc.md")));
        assert!(!v.contains(&NoteId::new("Inbox/Idea.md")));
    }

    #[test]
    fn test_links_that_still_resolve_are_kept() {
        let (dir, mut v) = vault(&[("a/Note.md", "x"), ("ref.md", "[[a/Note]] [[Note]]")]);

        let preview = v.preview_rename(&NoteId::new("a/Note.md"), &NoteId::new("b/Note.md")).unwrap();
        assert_eq!(replacements(&preview), BTreeMap::from([("ref.md".into(), vec!["[[Note]]".into()])]));

        v.rename_file(&NoteId::new("a/Note.md"), &NoteId::new("b/Note.md")).unwrap();
        assert_eq!(read(&dir, "ref.md"), "[[Note]] [[Note]]");
    }

    #[test]
    fn test_outgoing_relative_links_follow_the_moved_note() {
        let (dir, mut v) = vault(&[
            ("notes/src.md", "![img](../img/a%20b.png) [[Peer]] [up](./Peer.md)"),
            ("notes/Peer.md", ""),
            ("img/a b.png", "png"),
        ]);

        v.rename_file(&NoteId::new("notes/src.md"), &NoteId::new("store/deep/x.md")).unwrap();

        assert_eq!(
            read(&dir, "store/deep/x.md"),
            "![img](../../img/a%20b.png) [[Peer]] [up](../../notes/Peer.md)"
        );
    }

    #[test]
    fn test_self_links_survive() {
        let (dir, mut v) = vault(&[("n.md", "[[#Top]] [[n#Top]]\n")]);
        v.rename_file(&NoteId::new("n.md"), &NoteId::new("m.md")).unwrap();
        assert_eq!(read(&dir, "m.md"), "[[#Top]] [[m#Top]]\n");
    }

    #[test]
    fn test_frontmatter_links_are_left_alone() {
        let (dir, mut v) = vault(&[("a.md", ""), ("b.md", "---\nup: \"[[a]]\"\n---\n[[a]]")]);
        v.rename_file(&NoteId::new("a.md"), &NoteId::new("c.md")).unwrap();
        assert_eq!(read(&dir, "b.md"), "---\nup: \"[[a]]\"\n---\n[[c]]");
    }

    #[test]
    fn test_destination_must_not_exist() {
        let (_dir, mut v) = vault(&[("a.md", ""), ("b.md", "")]);
        let err = v.rename_file(&NoteId::new("a.md"), &NoteId::new("b.md")).unwrap_err();
        assert!(matches!(err, VaultError::AlreadyExists(id) if id.as_str() == "b.md"));
    }

    #[test]
    fn test_missing_source() {
        let (_dir, mut v) = vault(&[("a.md", "")]);
        let err = v.rename_file(&NoteId::new("nope.md"), &NoteId::new("b.md")).unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }
}
