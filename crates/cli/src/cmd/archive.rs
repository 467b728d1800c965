use std::path::Path;

use super::{finish, open};
use crate::ArchiveArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &ArchiveArgs) {
    let mut session = open(config, profile);
    let vault = &mut session.vault;

    let id = match vault.id_for(&args.path) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}: {e}", args.path.display());
            std::process::exit(1);
        }
    };
    let verb = if args.dry_run { "Would archive" } else { "Archived" };

    if vault.path_of(&id).is_dir() {
        let report = session.store.archive_folder(vault, id.as_str(), args.dry_run);
        for note in &report.archived {
            println!("{verb}: {} -> {}", note.from, note.to);
        }
        for (file, error) in &report.failed {
            eprintln!("Error: {file}: {error}");
        }
        println!(
            "{} archived, {} skipped, {} failed",
            report.archived.len(),
            report.skipped.len(),
            report.failed.len()
        );
        finish(report.failed.len());
        return;
    }

    if !vault.contains(&id) {
        eprintln!("Error: not found in vault: {id}");
        std::process::exit(1);
    }

    match session.store.archive_note(vault, &id, args.dry_run) {
        Ok(Some(to)) => println!("{verb}: {id} -> {to}"),
        Ok(None) => {
            println!("Skipped: {id} is not tagged '{}'", session.store.settings().archive_tag)
        }
        Err(e) => {
            eprintln!("Error: {id}: {e}");
            std::process::exit(1);
        }
    }
}
