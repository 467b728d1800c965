use notestore_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc.logging);
            tracing::debug!(profile = %rc.active_profile, "config loaded");

            let store = &rc.store;
            println!("OK   nstore doctor");
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());
            println!("store_folder: {}", store.store_folder);
            println!("template: {}", store.template.as_deref().unwrap_or("(none)"));
            println!("pack_folder: {}", store.pack_folder);
            println!("archive.folder: {}", store.archive_folder);
            println!("archive.tag: {}", store.archive_tag);
            for folder in &rc.excluded_folders {
                println!("excluded: {}", folder.display());
            }
            if !rc.vault_root.is_dir() {
                println!("warning: vault_root is not a directory");
            }
        }
        Err(e) => {
            println!("FAIL nstore doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
