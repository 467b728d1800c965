//! Store operations over a vault.
//!
//! The store is a single folder of notes named by random UUIDs and assets
//! named by the SHA-256 of their bytes. Everything here is a thin layer over
//! [`Vault`]: filing files into the store, creating notes, archiving tagged
//! notes, giving notes a title heading and aliases, and packing a note with
//! everything it links to.

mod archive;
mod filer;
mod notes;
mod pack;

pub use archive::{ArchiveReport, ArchivedNote};
pub use notes::HeadingOutcome;
pub use pack::{PackReport, PackedFile};

use thiserror::Error;

use crate::config::StoreSettings;
use crate::frontmatter::FrontmatterParseError;
use crate::heading::HeadingError;
use crate::ids::{NoteId, is_content_hash, is_uuid};
use crate::vault::{Vault, VaultError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("cannot rewrite heading: {0}")]
    Heading(#[from] HeadingError),

    #[error("invalid frontmatter: {0}")]
    Frontmatter(#[from] FrontmatterParseError),

    #[error("not a markdown note: {0}")]
    NotANote(NoteId),

    #[error("already in the store: {0}")]
    AlreadyInStore(NoteId),

    #[error("{file} duplicates {existing}, which is already in the store")]
    Duplicate { file: NoteId, existing: NoteId },
}

/// Store operations configured by a profile's settings.
#[derive(Debug, Clone, Default)]
pub struct Store {
    settings: StoreSettings,
}

impl Store {
    pub fn new(settings: StoreSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Whether a file has already been filed: it sits directly in the
    /// store folder under a generated name.
    pub fn in_store(&self, id: &NoteId) -> bool {
        id.parent() == self.settings.store_folder && (is_uuid(id.stem()) || is_content_hash(id.stem()))
    }

    /// Store name for a file: a UUID for notes, the content hash for assets.
    fn store_name(&self, vault: &Vault, id: &NoteId) -> Result<String, StoreError> {
        let stem = if id.is_note() { crate::ids::generate_note_name() } else { vault.content_hash(id)? };
        Ok(match id.extension() {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        })
    }
}

/// Temp vault with the given files, for store tests.
#[cfg(test)]
pub(crate) fn test_vault(files: &[(&str, &str)]) -> (tempfile::TempDir, Vault) {
    let dir = tempfile::TempDir::new().unwrap();
    for (path, content) in files {
        let abs = dir.path().join(path);
        std::fs::create_dir_all(abs.parent().unwrap()).unwrap();
        std::fs::write(abs, content).unwrap();
    }
    let vault = Vault::open(dir.path()).unwrap();
    (dir, vault)
}
