use tracing::{info, warn};

use super::{Store, StoreError};
use crate::ids::{NoteId, generate_note_name};
use crate::vault::{RenameResult, Vault};

impl Store {
    /// File a note or asset into the store under its generated name.
    ///
    /// Links to the file are rewritten by the vault rename.
    ///
    /// # Errors
    /// `AlreadyInStore` for filed files, `Duplicate` when an asset with the
    /// same bytes is already stored, and vault errors from the rename.
    pub fn move_to_store(&self, vault: &mut Vault, id: &NoteId) -> Result<RenameResult, StoreError> {
        if self.in_store(id) {
            return Err(StoreError::AlreadyInStore(id.clone()));
        }

        let dest = NoteId::join(&self.settings.store_folder, &self.store_name(vault, id)?);
        if !id.is_note() && vault.contains(&dest) {
            return Err(StoreError::Duplicate { file: id.clone(), existing: dest });
        }

        vault.create_folder(&self.settings.store_folder)?;
        let result = vault.rename_file(id, &dest)?;
        info!(from = %id, to = %dest, links = result.references_updated, "moved into store");
        Ok(result)
    }

    /// Create an empty store note seeded from the template.
    pub fn create_note(&self, vault: &mut Vault) -> Result<NoteId, StoreError> {
        let content = self.read_template(vault)?;
        let id = NoteId::join(&self.settings.store_folder, &format!("{}.md", generate_note_name()));
        vault.create_file(&id, &content)?;
        Ok(id)
    }

    /// Template text, or nothing when no usable template is configured.
    fn read_template(&self, vault: &Vault) -> Result<String, StoreError> {
        let Some(path) = &self.settings.template else {
            return Ok(String::new());
        };

        let id = NoteId::new(path);
        if !id.is_note() || !vault.contains(&id) {
            warn!(template = %id, "template is missing or not a markdown note; using an empty note");
            return Ok(String::new());
        }
        Ok(vault.read_text(&id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_vault;
    use super::*;
    use crate::config::StoreSettings;
    use crate::ids::is_uuid;
    use std::fs;

    fn store_with_template(template: Option<&str>) -> Store {
        Store::new(StoreSettings { template: template.map(Into::into), ..StoreSettings::default() })
    }

    #[test]
    fn test_move_note_gets_uuid_and_links_follow() {
        let (dir, mut vault) = test_vault(&[("Inbox/Idea.md", "# Idea"), ("index.md", "[[Idea]]")]);
        let store = Store::default();

        let result = store.move_to_store(&mut vault, &NoteId::new("Inbox/Idea.md")).unwrap();

        assert_eq!(result.to.parent(), "store");
        assert!(is_uuid(result.to.stem()));
        assert!(store.in_store(&result.to));
        let index = fs::read_to_string(dir.path().join("index.md")).unwrap();
        assert_eq!(index, format!("[[{}]]", result.to.stem()));
    }

    #[test]
    fn test_move_asset_uses_content_hash() {
        let (_dir, mut vault) = test_vault(&[("pic.png", "test")]);
        let result = Store::default().move_to_store(&mut vault, &NoteId::new("pic.png")).unwrap();
        assert_eq!(
            result.to.as_str(),
            "store/9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08.png"
        );
    }

    #[test]
    fn test_move_duplicate_asset_is_refused() {
        let (dir, mut vault) = test_vault(&[("a.png", "same"), ("b/a.png", "same")]);
        let store = Store::default();
        store.move_to_store(&mut vault, &NoteId::new("a.png")).unwrap();

        let err = store.move_to_store(&mut vault, &NoteId::new("b/a.png")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { ref file, .. } if file.as_str() == "b/a.png"));
        assert!(dir.path().join("b/a.png").exists());
    }

    #[test]
    fn test_move_already_in_store() {
        let (_dir, mut vault) = test_vault(&[("store/0f8fad5b-d9cb-469f-a165-70867728950e.md", "")]);
        let id = NoteId::new("store/0f8fad5b-d9cb-469f-a165-70867728950e.md");
        let err = Store::default().move_to_store(&mut vault, &id).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyInStore(_)));
    }

    #[test]
    fn test_create_note_uses_template() {
        let (dir, mut vault) = test_vault(&[("tpl/store.md", "---\ntags: []\n---\n")]);
        let id = store_with_template(Some("tpl/store.md")).create_note(&mut vault).unwrap();

        assert!(is_uuid(id.stem()));
        assert_eq!(fs::read_to_string(dir.path().join(id.to_path())).unwrap(), "---\ntags: []\n---\n");
    }

    #[test]
    fn test_create_note_with_unusable_template() {
        let (dir, mut vault) = test_vault(&[("tpl/store.txt", "text")]);
        for template in ["tpl/store.txt", "tpl/missing.md"] {
            let id = store_with_template(Some(template)).create_note(&mut vault).unwrap();
            assert_eq!(fs::read_to_string(dir.path().join(id.to_path())).unwrap(), "");
        }
    }
}
