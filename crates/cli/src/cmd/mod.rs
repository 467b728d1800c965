pub mod aliases;
pub mod archive;
pub mod doctor;
pub mod heading;
pub mod move_cmd;
pub mod new;
pub mod pack;

use std::path::Path;
use std::process::exit;

use notestore_core::config::ConfigLoader;
use notestore_core::ids::NoteId;
use notestore_core::store::Store;
use notestore_core::vault::Vault;

/// The vault and store described by the loaded config.
pub struct Session {
    pub vault: Vault,
    pub store: Store,
}

/// Load the config, start logging and scan the vault. Exits on failure.
pub fn open(config: Option<&Path>, profile: Option<&str>) -> Session {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            exit(1);
        }
    };

    crate::logging::init(&rc.logging);

    let vault = match Vault::with_exclusions(&rc.vault_root, rc.excluded_folders.clone()) {
        Ok(vault) => vault,
        Err(e) => {
            eprintln!("Error opening vault: {e}");
            exit(1);
        }
    };

    let store = Store::new(rc.store.clone());
    Session { vault, store }
}

/// Map a command-line path to a vault id, printing why it could not be.
pub fn note_id(vault: &Vault, path: &Path) -> Option<NoteId> {
    match vault.id_for(path) {
        Ok(id) if vault.contains(&id) => Some(id),
        Ok(id) => {
            eprintln!("Error: not found in vault: {id}");
            None
        }
        Err(e) => {
            eprintln!("Error: {}: {e}", path.display());
            None
        }
    }
}

/// Exit with status 1 when any item of a batch failed.
pub fn finish(failed: usize) {
    if failed > 0 {
        eprintln!("{failed} failed");
        exit(1);
    }
}
