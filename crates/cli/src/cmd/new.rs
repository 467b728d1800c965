use std::path::Path;

use super::open;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let mut session = open(config, profile);

    match session.store.create_note(&mut session.vault) {
        Ok(id) => println!("{}", session.vault.path_of(&id).display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
