use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Folder that filed notes and assets are moved into.
    #[serde(default = "default_store_folder")]
    pub store_folder: String,
    /// Vault-relative note whose text seeds every new store note.
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default = "default_pack_folder")]
    pub pack_folder: String,
    /// Folders to exclude from vault operations (relative to vault_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArchiveConfig {
    #[serde(default = "default_archive_folder")]
    pub folder: String,
    /// Frontmatter tag marking a note as ready for the archive.
    #[serde(default = "default_archive_tag")]
    pub tag: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self { folder: default_archive_folder(), tag: default_archive_tag() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_store_folder() -> String {
    "store".to_string()
}

pub(crate) fn default_pack_folder() -> String {
    "pack".to_string()
}

pub(crate) fn default_archive_folder() -> String {
    "archive".to_string()
}

pub(crate) fn default_archive_tag() -> String {
    "archive".to_string()
}

/// Store behaviour of the active profile, with folders normalized to
/// vault-relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub store_folder: String,
    pub template: Option<String>,
    pub pack_folder: String,
    pub archive_folder: String,
    pub archive_tag: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_folder: default_store_folder(),
            template: None,
            pack_folder: default_pack_folder(),
            archive_folder: default_archive_folder(),
            archive_tag: default_archive_tag(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    /// Folders to exclude from vault operations (resolved to absolute paths).
    pub excluded_folders: Vec<PathBuf>,
    pub store: StoreSettings,
    pub logging: LoggingConfig,
}
