use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

/// Temp dir holding `vault/` with the given files and a config pointing at it.
fn setup(files: &[(&str, &str)]) -> (TempDir, PathBuf, PathBuf) {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    fs::create_dir_all(&vault).unwrap();
    for (path, content) in files {
        let abs = vault.join(path);
        fs::create_dir_all(abs.parent().unwrap()).unwrap();
        fs::write(abs, content).unwrap();
    }

    let cfg = tmp.path().join("config.toml");
    let toml = format!(
        "version = 1\n[profiles.default]\nvault_root = \"{}\"\ntemplate = \"templates/store.md\"\n",
        vault.display()
    );
    fs::write(&cfg, toml).unwrap();
    (tmp, vault, cfg)
}

fn nstore(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nstore"));
    cmd.arg("--config").arg(cfg);
    cmd
}

fn store_files(vault: &Path) -> Vec<PathBuf> {
    match fs::read_dir(vault.join("store")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn new_creates_note_from_template() {
    let (_tmp, vault, cfg) = setup(&[("templates/store.md", "---\ntags: []\n---\n")]);

    let output = nstore(&cfg).arg("new").output().unwrap();
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout).unwrap();
    let path = PathBuf::from(printed.trim());
    assert!(path.starts_with(vault.join("store")));
    assert_eq!(path.file_stem().unwrap().len(), 36);
    assert_eq!(fs::read_to_string(&path).unwrap(), "---\ntags: []\n---\n");
}

#[test]
fn move_files_note_and_updates_links() {
    let (_tmp, vault, cfg) = setup(&[("Inbox/Idea.md", "# Idea"), ("index.md", "See [[Idea]]")]);

    nstore(&cfg)
        .args(["move", "Inbox/Idea.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved: Inbox/Idea.md -> store/"))
        .stdout(predicate::str::contains("1 references updated in 1 files"));

    let moved = store_files(&vault);
    assert_eq!(moved.len(), 1);
    assert!(!vault.join("Inbox/Idea.md").exists());

    let stem = moved[0].file_stem().unwrap().to_str().unwrap().to_string();
    assert_eq!(fs::read_to_string(vault.join("index.md")).unwrap(), format!("See [[{stem}]]"));
}

#[test]
fn move_continues_past_failures() {
    let (_tmp, vault, cfg) = setup(&[("a.png", "bytes")]);

    nstore(&cfg)
        .args(["move", "missing.md", "a.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in vault: missing.md"))
        .stdout(predicate::str::contains("Moved: a.png -> store/"));

    assert_eq!(store_files(&vault).len(), 1);
}

#[test]
fn heading_inserts_title() {
    let (_tmp, vault, cfg) = setup(&[("Daily Plan.md", "Some text\n")]);

    nstore(&cfg)
        .args(["heading", "Daily Plan.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("insert   Daily Plan.md"));

    let text = fs::read_to_string(vault.join("Daily Plan.md")).unwrap();
    assert!(text.starts_with("# Daily Plan\n"));
    assert!(text.contains("Some text"));
}

#[test]
fn heading_dry_run_and_skip() {
    let (_tmp, vault, cfg) = setup(&[("a.md", "text"), ("b.md", "# Titled\n")]);

    nstore(&cfg)
        .args(["heading", "--dry-run", "a.md", "b.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("insert   a.md"))
        .stdout(predicate::str::contains("skip     b.md (note already has a title)"))
        .stdout(predicate::str::contains("dry-run"));

    assert_eq!(fs::read_to_string(vault.join("a.md")).unwrap(), "text");
}

#[test]
fn heading_rejects_assets() {
    let (_tmp, _vault, cfg) = setup(&[("pic.png", "x")]);

    nstore(&cfg)
        .args(["heading", "pic.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a markdown note"));
}

#[test]
fn aliases_added_from_titles() {
    let (_tmp, vault, cfg) = setup(&[("n.md", "# Hello\n")]);

    nstore(&cfg)
        .args(["aliases", "n.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n.md: + Hello"));

    let text = fs::read_to_string(vault.join("n.md")).unwrap();
    assert!(text.starts_with("---\naliases:\n- Hello\n---\n"));

    nstore(&cfg)
        .args(["aliases", "n.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("n.md: no new aliases"));
}

#[test]
fn archive_folder_moves_tagged_notes() {
    let (_tmp, vault, cfg) = setup(&[
        ("projects/done.md", "---\ntags: [archive]\n---\nbody"),
        ("projects/open.md", "---\ntags: [work]\n---\nbody"),
    ]);

    nstore(&cfg)
        .args(["archive", "projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived: projects/done.md -> archive/"))
        .stdout(predicate::str::contains("1 archived, 1 skipped, 0 failed"));

    assert!(!vault.join("projects/done.md").exists());
    assert!(vault.join("projects/open.md").exists());
    assert_eq!(fs::read_dir(vault.join("archive")).unwrap().count(), 1);
}

#[test]
fn archive_untagged_note_is_skipped() {
    let (_tmp, vault, cfg) = setup(&[("keep.md", "plain")]);

    nstore(&cfg)
        .args(["archive", "keep.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped: keep.md is not tagged 'archive'"));

    assert!(vault.join("keep.md").exists());
}

#[test]
fn pack_reports_json() {
    let (_tmp, vault, cfg) = setup(&[
        ("Project.md", "[[Task]] ![[img/pic.png]]"),
        ("Task.md", "back to [[Project]]"),
        ("img/pic.png", "png"),
        ("Other.md", ""),
    ]);

    let output = nstore(&cfg).args(["pack", "--json", "Project.md"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["root"], "Project.md");
    assert_eq!(report["folder"], "pack/Project");
    assert_eq!(report["files"].as_array().unwrap().len(), 3);
    assert_eq!(report["files"][0]["to"], "pack/Project/Project.md");

    assert_eq!(fs::read_to_string(vault.join("pack/Project/img/pic.png")).unwrap(), "png");
    assert!(!vault.join("pack/Project/Other.md").exists());
}

#[test]
fn pack_dry_run_copies_nothing() {
    let (_tmp, vault, cfg) = setup(&[("Project.md", "[[Task]]"), ("Task.md", "")]);

    nstore(&cfg)
        .args(["pack", "--dry-run", "Project.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would pack 2 files into pack/Project"))
        .stdout(predicate::str::contains("  Task.md"));

    assert!(!vault.join("pack").exists());
}
