use serde::Serialize;
use tracing::{debug, info, warn};

use super::{Store, StoreError};
use crate::ids::{NoteId, generate_note_name};
use crate::vault::Vault;

/// A note moved (or, in a dry run, to be moved) into the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedNote {
    pub from: NoteId,
    pub to: NoteId,
}

/// Outcome of archiving a folder.
#[derive(Debug, Default, Serialize)]
pub struct ArchiveReport {
    pub archived: Vec<ArchivedNote>,
    /// Files without the archive tag, or already in the archive.
    pub skipped: Vec<NoteId>,
    pub failed: Vec<(NoteId, String)>,
}

impl Store {
    /// Whether the note's frontmatter `tags` contain the archive tag.
    ///
    /// # Errors
    /// Fails when the file cannot be read or its frontmatter is invalid.
    pub fn is_archivable(&self, vault: &Vault, id: &NoteId) -> Result<bool, StoreError> {
        if !id.is_note() {
            return Ok(false);
        }
        let Some(fm) = vault.frontmatter(id)? else {
            return Ok(false);
        };
        let wanted = self.settings.archive_tag.as_str();
        Ok(fm.string_list("tags").iter().any(|tag| tag.trim_start_matches('#') == wanted))
    }

    /// Move a tagged note into the archive folder under a fresh UUID.
    ///
    /// Returns None when the note does not carry the archive tag.
    pub fn archive_note(
        &self,
        vault: &mut Vault,
        id: &NoteId,
        dry_run: bool,
    ) -> Result<Option<NoteId>, StoreError> {
        if !self.is_archivable(vault, id)? {
            debug!(file = %id, tag = %self.settings.archive_tag, "not tagged for archive");
            return Ok(None);
        }

        let name = match id.extension() {
            Some(ext) => format!("{}.{ext}", generate_note_name()),
            None => generate_note_name(),
        };
        let dest = NoteId::join(&self.settings.archive_folder, &name);

        if !dry_run {
            vault.create_folder(&self.settings.archive_folder)?;
            vault.rename_file(id, &dest)?;
            info!(from = %id, to = %dest, "archived note");
        }
        Ok(Some(dest))
    }

    /// Archive every tagged note below `folder`, shallow files first.
    ///
    /// A failure on one note is logged and recorded; the rest still run.
    pub fn archive_folder(&self, vault: &mut Vault, folder: &str, dry_run: bool) -> ArchiveReport {
        let mut report = ArchiveReport::default();

        for id in vault.files_in(folder) {
            if id.is_within(&self.settings.archive_folder) {
                report.skipped.push(id);
                continue;
            }

            match self.archive_note(vault, &id, dry_run) {
                Ok(Some(to)) => report.archived.push(ArchivedNote { from: id, to }),
                Ok(None) => report.skipped.push(id),
                Err(e) => {
                    warn!(file = %id, "failed to archive: {e}");
                    report.failed.push((id, e.to_string()));
                }
            }
        }

        report
    }
}
