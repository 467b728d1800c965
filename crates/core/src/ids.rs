//! Identifiers for vault files and generated store names.
//!
//! Every file in a vault is addressed by a [`NoteId`], its vault-relative
//! path with `/` separators. Files filed into the store are renamed to a
//! random UUID (notes) or to the hex SHA-256 of their content (assets, see
//! [`crate::vault::hasher`]).

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .unwrap()
});

static CONTENT_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[0-9a-f]{64}$").unwrap());

/// Vault-relative path of a note or asset.
///
/// The id is an opaque key: two ids are the same file exactly when their
/// strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Build an id from a vault-relative path, normalizing separators.
    ///
    /// ```
    /// use notestore_core::ids::NoteId;
    ///
    /// assert_eq!(NoteId::new("notes//a.md").as_str(), "notes/a.md");
    /// assert_eq!(NoteId::new("/notes/./a.md").as_str(), "notes/a.md");
    /// ```
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(normalize(path.as_ref()))
    }

    /// Build an id from a relative filesystem path.
    pub fn from_path(path: &Path) -> Self {
        let parts: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self(parts.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative filesystem path for this id.
    pub fn to_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }

    /// File name including extension.
    pub fn name(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        let name = self.name();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }

    /// Extension without the dot, if any.
    pub fn extension(&self) -> Option<&str> {
        let name = self.name();
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Parent folder; the empty string for files at the vault root.
    pub fn parent(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(parent, _)| parent)
    }

    /// Whether this id names a markdown note.
    pub fn is_note(&self) -> bool {
        self.extension().is_some_and(|e| e.eq_ignore_ascii_case("md"))
    }

    /// Whether this id lies inside `folder` (at any depth).
    pub fn is_within(&self, folder: &str) -> bool {
        folder.is_empty()
            || self.0.strip_prefix(folder).is_some_and(|rest| rest.starts_with('/'))
    }

    /// Join a file name onto a folder.
    pub fn join(folder: &str, name: &str) -> Self {
        if folder.is_empty() { Self::new(name) } else { Self::new(format!("{folder}/{name}")) }
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Normalize a vault path: collapse separators, drop `.` segments and
/// resolve `..` segments that stay inside the vault.
///
/// ```
/// use notestore_core::ids::normalize;
///
/// assert_eq!(normalize("/store/"), "store");
/// assert_eq!(normalize("a/b/../c"), "a/c");
/// assert_eq!(normalize("a\\b"), "a/b");
/// ```
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            p => parts.push(p),
        }
    }
    parts.join("/")
}

/// Like [`normalize`], but `None` when a `..` segment climbs above the
/// vault root.
///
/// ```
/// use notestore_core::ids::normalize_within;
///
/// assert_eq!(normalize_within("a/../b.md").as_deref(), Some("b.md"));
/// assert_eq!(normalize_within("a/../../b.md"), None);
/// ```
pub fn normalize_within(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            p => parts.push(p),
        }
    }
    Some(parts.join("/"))
}

/// Generate a fresh store name for a note (a random UUID v4).
pub fn generate_note_name() -> String {
    Uuid::new_v4().to_string()
}

/// Whether a file stem looks like a generated note name.
///
/// ```
/// use notestore_core::ids::is_uuid;
///
/// assert!(is_uuid("0f8fad5b-d9cb-469f-a165-70867728950e"));
/// assert!(!is_uuid("meeting notes"));
/// ```
pub fn is_uuid(stem: &str) -> bool {
    UUID_RE.is_match(stem)
}

/// Whether a file stem looks like a generated asset name.
pub fn is_content_hash(stem: &str) -> bool {
    CONTENT_HASH_RE.is_match(stem)
}
