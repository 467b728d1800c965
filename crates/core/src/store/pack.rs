use serde::Serialize;
use tracing::info;

use super::{Store, StoreError};
use crate::graph;
use crate::ids::NoteId;
use crate::vault::Vault;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedFile {
    pub from: NoteId,
    pub to: NoteId,
}

/// Files reachable from a note and where they were copied.
#[derive(Debug, Serialize)]
pub struct PackReport {
    pub root: NoteId,
    /// Folder holding the pack, `{pack_folder}/{root stem}`.
    pub folder: String,
    pub files: Vec<PackedFile>,
    pub dry_run: bool,
}

impl Store {
    /// Copy a note and everything it links to or embeds, transitively, into
    /// its own pack folder. Vault-relative paths are kept, so relative links
    /// inside the pack still resolve. Earlier packs are overwritten.
    pub fn pack(&self, vault: &mut Vault, root: &NoteId, dry_run: bool) -> Result<PackReport, StoreError> {
        let closure = graph::collect(root, &*vault)?;
        let folder = NoteId::join(&self.settings.pack_folder, root.stem()).to_string();

        let mut files = Vec::with_capacity(closure.len());
        for from in closure {
            let to = NoteId::join(&folder, from.as_str());
            if !dry_run {
                vault.copy_file(&from, &to)?;
            }
            files.push(PackedFile { from, to });
        }

        if !dry_run {
            info!(root = %root, folder = %folder, files = files.len(), "packed note");
        }
        Ok(PackReport { root: root.clone(), folder, files, dry_run })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_vault;
    use super::*;
    use std::fs;

    fn vault_files() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Project.md", "[[Task]] ![[img/diagram.png]] [[Missing]]"),
            ("notes/Task.md", "Back to [[Project]]. See [design](../docs/Design.md)."),
            ("docs/Design.md", "no links"),
            ("img/diagram.png", "png bytes"),
            ("Unrelated.md", "[[Project]]"),
        ]
    }

    #[test]
    fn test_pack_copies_closure() {
        let (dir, mut vault) = test_vault(&vault_files());
        let report = Store::default().pack(&mut vault, &NoteId::new("Project.md"), false).unwrap();

        let copied: Vec<&str> = report.files.iter().map(|f| f.to.as_str()).collect();
        assert_eq!(
            copied,
            vec![
                "pack/Project/Project.md",
                "pack/Project/docs/Design.md",
                "pack/Project/img/diagram.png",
                "pack/Project/notes/Task.md",
            ]
        );
        assert_eq!(
            fs::read(dir.path().join("pack/Project/img/diagram.png")).unwrap(),
            b"png bytes"
        );
        assert!(!dir.path().join("pack/Project/Unrelated.md").exists());
    }

    #[test]
    fn test_pack_overwrites_and_dry_run() {
        let (dir, mut vault) = test_vault(&vault_files());
        let store = Store::default();
        let root = NoteId::new("Project.md");

        let dry = store.pack(&mut vault, &root, true).unwrap();
        assert_eq!(dry.files.len(), 4);
        assert!(!dir.path().join("pack").exists());

        store.pack(&mut vault, &root, false).unwrap();
        fs::write(dir.path().join("docs/Design.md"), "changed").unwrap();
        store.pack(&mut vault, &root, false).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("pack/Project/docs/Design.md")).unwrap(), "changed");
    }

    #[test]
    fn test_pack_missing_root() {
        let (_dir, mut vault) = test_vault(&vault_files());
        let err = Store::default().pack(&mut vault, &NoteId::new("Nope.md"), false).unwrap_err();
        assert!(matches!(err, StoreError::Vault(crate::vault::VaultError::NotFound(_))));
    }
}
