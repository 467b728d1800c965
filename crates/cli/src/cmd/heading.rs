use std::path::Path;

use notestore_core::heading::RewritePlan;
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

        match session.store.add_heading(&session.vault, &id, args.dry_run) {
            Ok(outcome) => match &outcome.plan {
                RewritePlan::Skip(reason) => println!("skip     {id} ({reason})"),
                plan => println!("{:<8} {id}", plan.route()),
            },
            Err(e) => {
                warn!(file = %id, "heading failed: {e}");
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
