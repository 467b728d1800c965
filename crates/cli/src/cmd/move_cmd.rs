//! Move command: file notes and assets into the store.

use std::path::Path;

use tracing::warn;

use super::{finish, note_id, open};
use crate::MoveArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &MoveArgs) {
    let mut session = open(config, profile);
    let mut failed = 0;

    for path in &args.paths {
        let Some(id) = note_id(&session.vault, path) else {
            failed += 1;
            continue;
        };

        match session.store.move_to_store(&mut session.vault, &id) {
            Ok(result) => {
                println!("Moved: {} -> {}", result.from, result.to);
                if result.references_updated > 0 {
                    println!(
                        "  {} references updated in {} files",
                        result.references_updated,
                        result.files_modified.len()
                    );
                }
            }
            Err(e) => {
                warn!(file = %id, "move failed: {e}");
                eprintln!("Error: {id}: {e}");
                failed += 1;
            }
        }
    }

    finish(failed);
}
