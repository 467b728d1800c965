use tracing::debug;

use super::{Store, StoreError};
use crate::aliases::{apply_aliases, existing_aliases, new_aliases};
use crate::heading::{self, RewritePlan};
use crate::ids::NoteId;
use crate::vault::Vault;

/// The plan chosen for a note and whether the note was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingOutcome {
    pub plan: RewritePlan,
    pub written: bool,
}

impl Store {
    /// Give a note a level-1 heading named after its file.
    ///
    /// # Errors
    /// `NotANote` for assets, `AlreadyInStore` for store notes (their names
    /// are UUIDs, not titles), or a heading error for a malformed outline.
    pub fn add_heading(
        &self,
        vault: &Vault,
        id: &NoteId,
        dry_run: bool,
    ) -> Result<HeadingOutcome, StoreError> {
        if !id.is_note() {
            return Err(StoreError::NotANote(id.clone()));
        }
        if self.in_store(id) {
            return Err(StoreError::AlreadyInStore(id.clone()));
        }

        let meta = vault.read_headings(id)?;
        let plan = heading::plan(id.stem(), &meta.headings, meta.frontmatter_end)?;

        let written = if dry_run || plan.is_skip() {
            false
        } else {
            vault.process(id, |text| heading::apply(&plan, text).map_err(StoreError::from))?
        };

        debug!(file = %id, route = plan.route(), written, "heading");
        Ok(HeadingOutcome { plan, written })
    }

    /// List a note's level-1 headings as frontmatter aliases.
    ///
    /// Returns the aliases that were added; an empty list means the note was
    /// left alone.
    pub fn add_aliases(
        &self,
        vault: &Vault,
        id: &NoteId,
        dry_run: bool,
    ) -> Result<Vec<String>, StoreError> {
        if !id.is_note() {
            return Err(StoreError::NotANote(id.clone()));
        }

        let meta = vault.read_headings(id)?;
        let existing = existing_aliases(meta.frontmatter.as_ref());
        let added = new_aliases(&existing, &meta.headings);
        if added.is_empty() || dry_run {
            return Ok(added);
        }

        let all: Vec<String> = existing.into_iter().chain(added.iter().cloned()).collect();
        vault.process(id, |text| apply_aliases(text, &all).map_err(StoreError::from))?;
        Ok(added)
    }
}
