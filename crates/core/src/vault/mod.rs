//! The vault: an indexed folder of notes and assets.
//!
//! [`Vault`] walks the folder once, keeps the set of files as
//! [`NoteId`]s, and performs every read and write the store operations
//! need. It also answers link queries for the collector through
//! [`LinkGraph`].

pub mod hasher;
pub mod rename;
pub mod resolver;
pub mod walker;

pub use hasher::{content_hash, content_hash_bytes};
pub use rename::{FileChange, LinkUpdate, RenamePreview, RenameResult};
pub use resolver::{link_text_for, resolve_linkpath};
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile};

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::frontmatter::{self, Frontmatter, FrontmatterParseError};
use crate::graph::{LinkGraph, LinkReference};
use crate::ids::NoteId;
use crate::metadata::{self, NoteMetadata};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk vault: {0}")]
    Walk(#[source] walkdir::Error),

    #[error("file not found in vault: {0}")]
    NotFound(NoteId),

    #[error("target file already exists: {0}")]
    AlreadyExists(NoteId),

    #[error("path is outside the vault: {0}")]
    OutsideVault(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid frontmatter in {id}: {source}")]
    Frontmatter {
        id: NoteId,
        #[source]
        source: FrontmatterParseError,
    },
}

impl VaultError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

impl From<VaultWalkerError> for VaultError {
    fn from(e: VaultWalkerError) -> Self {
        match e {
            VaultWalkerError::MissingRoot(root) => Self::MissingRoot(root),
            VaultWalkerError::WalkError(_, source) => Self::Walk(source),
        }
    }
}

/// An indexed vault rooted at a folder.
#[derive(Debug)]
pub struct Vault {
    root: PathBuf,
    files: BTreeSet<NoteId>,
}

impl Vault {
    pub fn open(root: &Path) -> Result<Self, VaultError> {
        Self::with_exclusions(root, Vec::new())
    }

    /// Index a vault, skipping the given folders.
    pub fn with_exclusions(root: &Path, excluded: Vec<PathBuf>) -> Result<Self, VaultError> {
        let walker = VaultWalker::with_exclusions(root, excluded)?;
        let files: BTreeSet<NoteId> =
            walker.walk()?.iter().map(|f| NoteId::from_path(&f.relative_path)).collect();

        debug!(root = %walker.root().display(), files = files.len(), "indexed vault");
        Ok(Self { root: walker.root().to_path_buf(), files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.files.contains(id)
    }

    /// Every indexed file, sorted by path.
    pub fn files(&self) -> &BTreeSet<NoteId> {
        &self.files
    }

    /// Files below `folder`, shallow ones first, then by path.
    pub fn files_in(&self, folder: &str) -> Vec<NoteId> {
        let mut found: Vec<NoteId> = self.files.iter().filter(|id| id.is_within(folder)).cloned().collect();
        found.sort_by(|a, b| {
            let depth = |id: &NoteId| id.as_str().matches('/').count();
            depth(a).cmp(&depth(b)).then_with(|| a.cmp(b))
        });
        found
    }

    /// Absolute filesystem path of a vault file.
    pub fn path_of(&self, id: &NoteId) -> PathBuf {
        self.root.join(id.to_path())
    }

    /// Turn a user-supplied path into an id.
    ///
    /// Absolute paths must lie inside the vault. Relative paths are taken
    /// from the vault root, or from the working directory when only that
    /// interpretation names an existing file.
    pub fn id_for(&self, path: &Path) -> Result<NoteId, VaultError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else if self.root.join(path).exists() || !path.exists() {
            return Ok(NoteId::from_path(path));
        } else {
            std::env::current_dir().map_err(|e| VaultError::io(path, e))?.join(path)
        };

        let absolute = absolute.canonicalize().unwrap_or(absolute);
        absolute
            .strip_prefix(&self.root)
            .map(NoteId::from_path)
            .map_err(|_| VaultError::OutsideVault(absolute.clone()))
    }

    fn require(&self, id: &NoteId) -> Result<PathBuf, VaultError> {
        if self.contains(id) { Ok(self.path_of(id)) } else { Err(VaultError::NotFound(id.clone())) }
    }

    pub fn read_text(&self, id: &NoteId) -> Result<String, VaultError> {
        let path = self.require(id)?;
        fs::read_to_string(&path).map_err(|e| VaultError::io(&path, e))
    }

    /// Hex SHA-256 of a file's bytes.
    pub fn content_hash(&self, id: &NoteId) -> Result<String, VaultError> {
        let path = self.require(id)?;
        content_hash(&path).map_err(|e| VaultError::io(&path, e))
    }

    /// Overwrite an existing file.
    pub fn write_text(&self, id: &NoteId, content: &str) -> Result<(), VaultError> {
        let path = self.require(id)?;
        fs::write(&path, content).map_err(|e| VaultError::io(&path, e))
    }

    /// Read a note, transform it, and write it back if it changed.
    ///
    /// Returns whether the file was written. An error from `f` leaves the
    /// file untouched.
    pub fn process<F, E>(&self, id: &NoteId, f: F) -> Result<bool, E>
    where
        F: FnOnce(&str) -> Result<String, E>,
        E: From<VaultError>,
    {
        let text = self.read_text(id)?;
        let updated = f(&text)?;
        if updated == text {
            return Ok(false);
        }
        self.write_text(id, &updated)?;
        info!(file = %id, "rewrote note");
        Ok(true)
    }

    /// Metadata of a note; empty for assets.
    ///
    /// Unreadable frontmatter does not fail this call.
    pub fn read_headings(&self, id: &NoteId) -> Result<NoteMetadata, VaultError> {
        if !id.is_note() {
            self.require(id)?;
            return Ok(NoteMetadata::default());
        }
        Ok(metadata::extract(&self.read_text(id)?))
    }

    /// Parsed frontmatter of a note, strictly: invalid YAML is an error.
    pub fn frontmatter(&self, id: &NoteId) -> Result<Option<Frontmatter>, VaultError> {
        let text = self.read_text(id)?;
        frontmatter::parse(&text)
            .map(|doc| doc.frontmatter)
            .map_err(|source| VaultError::Frontmatter { id: id.clone(), source })
    }

    /// Create a folder and its parents. Existing folders are fine.
    pub fn create_folder(&self, folder: &str) -> Result<(), VaultError> {
        let path = self.root.join(NoteId::new(folder).to_path());
        fs::create_dir_all(&path).map_err(|e| VaultError::io(&path, e))
    }

    /// Create a new file, refusing to overwrite.
    pub fn create_file(&mut self, id: &NoteId, content: &str) -> Result<(), VaultError> {
        let path = self.path_of(id);
        if self.contains(id) || path.exists() {
            return Err(VaultError::AlreadyExists(id.clone()));
        }
        self.create_folder(id.parent())?;
        fs::write(&path, content).map_err(|e| VaultError::io(&path, e))?;
        self.files.insert(id.clone());
        info!(file = %id, "created file");
        Ok(())
    }

    /// Copy a file, overwriting the destination.
    pub fn copy_file(&mut self, from: &NoteId, to: &NoteId) -> Result<(), VaultError> {
        let source = self.require(from)?;
        if from == to {
            return Ok(());
        }
        let target = self.path_of(to);
        self.create_folder(to.parent())?;
        fs::copy(&source, &target).map_err(|e| VaultError::io(&target, e))?;
        self.files.insert(to.clone());
        info!(from = %from, to = %to, "copied file");
        Ok(())
    }

    pub fn resolve_link(&self, link_text: &str, source: &NoteId) -> Option<NoteId> {
        resolve_linkpath(&self.files, link_text, source)
    }
}

impl LinkGraph for Vault {
    type Error = VaultError;

    fn links_of(&self, id: &NoteId) -> Result<Vec<LinkReference>, VaultError> {
        Ok(self
            .read_headings(id)?
            .links
            .into_iter()
            .map(|link| LinkReference::new(link.path, id.clone()))
            .collect())
    }

    fn resolve(&self, link_text: &str, source: &NoteId) -> Result<Option<NoteId>, VaultError> {
        Ok(self.resolve_link(link_text, source))
    }
}
