use std::path::Path;

use tracing::warn;

use super::{finish, note_id, open};
use crate::BatchArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &BatchArgs) {
    let session = open(config, profile);
    let mut failed = 0;

    for path in &args.paths {
        let Some(id) = note_id(&session.vault, path) else {
            failed += 1;
            continue;
        };

        match session.store.add_aliases(&session.vault, &id, args.dry_run) {
            Ok(added) if added.is_empty() => println!("{id}: no new aliases"),
            Ok(added) => println!("{id}: + {}", added.join(", ")),
            Err(e) => {
                warn!(file = %id, "aliases failed: {e}");
                eprintln!("Error: {id}: {e}");
                failed += 1;
            }
        }
    }

    if args.dry_run {
        println!();
        println!("(dry-run mode - no changes made)");
    }
    finish(failed);
}
