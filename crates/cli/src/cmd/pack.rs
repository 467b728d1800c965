use std::path::Path;

use notestore_core::store::PackReport;

use super::{note_id, open};
use crate::PackArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &PackArgs) {
    let mut session = open(config, profile);

    let Some(root) = note_id(&session.vault, &args.path) else {
        std::process::exit(1);
    };

    let report = match session.store.pack(&mut session.vault, &root, args.dry_run) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {root}: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

fn print_report(report: &PackReport) {
    if report.dry_run {
        println!("Would pack {} files into {}:", report.files.len(), report.folder);
        for file in &report.files {
            println!("  {}", file.from);
        }
        return;
    }

    println!("Packed {} files into {}:", report.files.len(), report.folder);
    for file in &report.files {
        println!("  {} -> {}", file.from, file.to);
    }
}
