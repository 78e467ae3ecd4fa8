//! Integration tests for capturing, listing, showing and deleting entries

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{add_entry, bind_default_account, fjour_in, init_journal};

fn journal_with_account() -> TempDir {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());
    bind_default_account(temp.path());
    temp
}

fn entries_json(root: &std::path::Path) -> serde_json::Value {
    let raw = fs::read_to_string(root.join(".fjour/storage/%40entries.value")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_add_without_account_fails() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());

    fjour_in(temp.path())
        .args(["add", "--title", "North Field", "--lat", "-25.7", "--lon", "28.2"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("scan your QR code"));
}

#[test]
fn test_add_with_explicit_account_without_binding() {
    let temp = TempDir::new().unwrap();
    init_journal(temp.path());

    add_entry(temp.path(), "North Field", &["--account", "acct9"]);

    assert_eq!(entries_json(temp.path())[0]["accountId"], "acct9");
}

#[test]
fn test_add_stores_entry_json() {
    let temp = journal_with_account();

    let id = add_entry(
        temp.path(),
        "North Field",
        &["--note", "Maize at V6", "--template", "general"],
    );

    let json = entries_json(temp.path());
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], id.as_str());
    assert_eq!(entries[0]["title"], "North Field");
    assert_eq!(entries[0]["note"], "Maize at V6");
    assert_eq!(entries[0]["template"], "general");
    assert_eq!(entries[0]["accountId"], "acct1");
    assert_eq!(entries[0]["synced"], false);
    assert_eq!(entries[0]["location"]["latitude"], -25.7);
    assert_eq!(entries[0]["location"]["longitude"], 28.2);
    assert!(id.parse::<u64>().is_ok());
}

#[test]
fn test_add_rejects_blank_title_and_bad_location() {
    let temp = journal_with_account();

    fjour_in(temp.path())
        .args(["add", "--title", "  ", "--lat", "0", "--lon", "0"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Title is required"));

    fjour_in(temp.path())
        .args(["add", "--title", "Edge", "--lat", "91", "--lon", "0"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("out of range"));

    fjour_in(temp.path())
        .args(["add", "--title", "Edge", "--lat", "0", "--lon", "0", "--template", "survey"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Invalid template"));
}

#[test]
fn test_add_with_media_copies_files() {
    let temp = journal_with_account();
    let photo = temp.path().join("IMG_0001.tmp");
    let clip = temp.path().join("voice.tmp");
    fs::write(&photo, b"jpeg").unwrap();
    fs::write(&clip, b"m4a").unwrap();

    let id = add_entry(
        temp.path(),
        "Pest Control Assessment",
        &[
            "--photo",
            photo.to_str().unwrap(),
            "--audio",
            clip.to_str().unwrap(),
        ],
    );

    assert!(photo.exists());
    assert!(clip.exists());

    let json = entries_json(temp.path());
    let media = json[0]["media"].as_array().unwrap();
    assert_eq!(media.len(), 2);
    assert_eq!(media[0]["type"], "photo");
    assert_eq!(media[1]["type"], "audio");
    assert!(media[0]["filename"].as_str().unwrap().ends_with(".jpg"));
    assert!(media[1]["filename"].as_str().unwrap().ends_with(".m4a"));
    let uri = media[0]["uri"].as_str().unwrap();
    assert!(std::path::Path::new(uri).is_absolute());
    assert_eq!(fs::read(uri).unwrap(), b"jpeg");

    fjour_in(temp.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pest Control Assessment"))
        .stdout(predicate::str::contains("photo"))
        .stdout(predicate::str::contains("audio"));
}

#[test]
fn test_add_with_missing_media_saves_nothing() {
    let temp = journal_with_account();

    fjour_in(temp.path())
        .args(["add", "--title", "Ghost", "--lat", "1", "--lon", "1"])
        .arg("--photo")
        .arg(temp.path().join("missing.jpg"))
        .assert()
        .failure();

    fjour_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_list_orders_and_filters() {
    let temp = journal_with_account();
    let first = add_entry(temp.path(), "Irrigation Check", &["--note", "pivot 3"]);
    let second = add_entry(temp.path(), "Soil Analysis", &[]);

    let output = fjour_in(temp.path()).arg("list").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let first_pos = stdout.find("Irrigation Check").unwrap();
    let second_pos = stdout.find("Soil Analysis").unwrap();
    assert!(second_pos < first_pos, "newest should come first:\n{}", stdout);

    let output = fjour_in(temp.path())
        .args(["list", "--oldest", "--limit", "1"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains(&first));
    assert!(!stdout.contains(&second));

    fjour_in(temp.path())
        .args(["list", "--search", "PIVOT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Irrigation Check"))
        .stdout(predicate::str::contains("Soil Analysis").not());
}

#[test]
fn test_mark_synced_and_unsynced_listing() {
    let temp = journal_with_account();
    let first = add_entry(temp.path(), "North Field", &[]);
    add_entry(temp.path(), "South Field", &[]);

    fjour_in(temp.path())
        .args(["mark-synced", &first, "does-not-exist"])
        .assert()
        .success();

    fjour_in(temp.path())
        .args(["list", "--unsynced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("South Field"))
        .stdout(predicate::str::contains("North Field").not());

    fjour_in(temp.path())
        .args(["list", "--synced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("North Field"))
        .stdout(predicate::str::contains("synced"));
}

#[test]
fn test_delete_removes_entry_and_media() {
    let temp = journal_with_account();
    let photo = temp.path().join("capture.tmp");
    fs::write(&photo, b"jpeg").unwrap();
    let id = add_entry(
        temp.path(),
        "North Field",
        &["--photo", photo.to_str().unwrap()],
    );
    let json = entries_json(temp.path());
    let uri = json[0]["media"][0]["uri"].as_str().unwrap().to_string();
    assert!(std::path::Path::new(&uri).exists());

    fjour_in(temp.path())
        .args(["delete", &id])
        .assert()
        .success();

    assert!(!std::path::Path::new(&uri).exists());
    assert!(entries_json(temp.path()).as_array().unwrap().is_empty());

    fjour_in(temp.path())
        .args(["show", &id])
        .assert()
        .code(3);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let temp = journal_with_account();
    add_entry(temp.path(), "North Field", &[]);
    let before = fs::read(temp.path().join(".fjour/storage/%40entries.value")).unwrap();

    fjour_in(temp.path())
        .args(["delete", "nonexistent"])
        .assert()
        .success();

    let after = fs::read(temp.path().join(".fjour/storage/%40entries.value")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_templates_remembers_last_used() {
    let temp = journal_with_account();

    add_entry(
        temp.path(),
        "Block 7 scouting",
        &["--template", "field", "--field", "Block 7"],
    );

    fjour_in(temp.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("* field"))
        .stdout(predicate::str::contains("General Note"));

    add_entry(temp.path(), "Follow-up", &["--field", "Block 7"]);
    let json = entries_json(temp.path());
    assert_eq!(json[1]["template"], "field");
    assert_eq!(json[1]["field"], "Block 7");
}

#[test]
fn test_parallel_add_processes_keep_every_entry() {
    let temp = journal_with_account();

    std::thread::scope(|scope| {
        for n in 0..4 {
            let root = temp.path();
            scope.spawn(move || add_entry(root, &format!("Parallel {}", n), &[]));
        }
    });

    let json = entries_json(temp.path());
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    let ids: std::collections::HashSet<_> =
        entries.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 4);
}
