#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn fjour_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fjour").unwrap();
    cmd.env_remove("FJOUR_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run `fjour` inside an initialized journal at `root`
pub fn fjour_in(root: &Path) -> Command {
    let mut cmd = fjour_cmd();
    cmd.current_dir(root);
    cmd
}

pub fn init_journal(root: &Path) {
    fjour_cmd().arg("init").arg(root).assert().success();
}

pub fn bind_default_account(root: &Path) {
    fjour_in(root)
        .arg("bind")
        .arg(r#"{"accountId":"acct1","affiliation":"melior","displayName":"Thandi"}"#)
        .assert()
        .success();
}

/// Add an entry and return its id as printed by `fjour add`
pub fn add_entry(root: &Path, title: &str, extra: &[&str]) -> String {
    let output = fjour_in(root)
        .args(["add", "--title", title, "--lat", "-25.7", "--lon", "28.2"])
        .args(extra)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .trim()
        .strip_prefix("Saved entry ")
        .unwrap_or_else(|| panic!("unexpected add output: {}", stdout))
        .to_string()
}
