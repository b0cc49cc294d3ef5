//! CLI dispatch through the compiled binary: exit codes and output shapes.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::json;
use tempfile::TempDir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_holotable")
}

fn write_json(root: &Path, rel: &str, value: serde_json::Value) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("dirs");
    fs::write(path, value.to_string()).expect("fixture file");
}

fn fixture_tree() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path();
    write_json(
        root,
        "galacticempire/tie-ln-fighter.json",
        json!({
            "name": "TIE/ln Fighter",
            "xws": "tielnfighter",
            "pilots": [{"name": "Iden Versio", "xws": "idenversio", "cost": 40}]
        }),
    );
    write_json(
        root,
        "upgrades/talent.json",
        json!([{"name": "Elusive", "xws": "elusive", "cost": 3}]),
    );
    tmp
}

#[test]
fn missing_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: holotable"));
}

#[test]
fn hydrate_without_path_prints_usage() {
    let output = Command::new(bin())
        .arg("hydrate")
        .output()
        .expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: holotable hydrate"));
}

#[test]
fn hydrate_command_emits_per_pilot_json() {
    let tmp = fixture_tree();
    let squad_path = tmp.path().join("squad.json");
    fs::write(
        &squad_path,
        json!({
            "faction": "Galactic Empire",
            "pilots": [{"xws": "idenversio", "ship": "tielnfighter", "points": 43,
                        "upgrades": {"talent": ["elusive"]}}]
        })
        .to_string(),
    )
    .expect("squad fixture");

    let output = Command::new(bin())
        .args(["hydrate", squad_path.to_string_lossy().as_ref()])
        .env("HOLOTABLE_DATA", tmp.path())
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(payload[0]["status"], "ok");
    assert_eq!(payload[0]["pilot"]["upgrades"][0]["record"]["xws"], "elusive");
}

#[test]
fn hydrate_command_fails_nonzero_when_a_pilot_cannot_resolve() {
    let tmp = fixture_tree();
    let squad_path = tmp.path().join("squad.json");
    fs::write(
        &squad_path,
        json!({
            "faction": "Galactic Empire",
            "pilots": [{"xws": "idenversio", "ship": "ghostship", "points": 43}]
        })
        .to_string(),
    )
    .expect("squad fixture");

    let output = Command::new(bin())
        .args(["hydrate", squad_path.to_string_lossy().as_ref()])
        .env("HOLOTABLE_DATA", tmp.path())
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 pilot(s) failed"));
}

#[test]
fn catalog_command_rejects_unknown_category() {
    let tmp = fixture_tree();
    let output = Command::new(bin())
        .args(["catalog", "epic"])
        .env("HOLOTABLE_DATA", tmp.path())
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown upgrade category 'epic'"));
}

#[test]
fn catalog_command_lists_category_records() {
    let tmp = fixture_tree();
    let output = Command::new(bin())
        .args(["catalog", "talent"])
        .env("HOLOTABLE_DATA", tmp.path())
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(payload[0]["name"], "Elusive");
}

#[test]
fn validate_command_returns_non_zero_on_broken_tree() {
    let tmp = fixture_tree();
    // Duplicate pilot id on one fragment: a data error the sweep must catch.
    write_json(
        tmp.path(),
        "galacticempire/tie-advanced-x1.json",
        json!({
            "name": "TIE Advanced x1",
            "xws": "tieadvancedx1",
            "pilots": [
                {"name": "Darth Vader", "xws": "darthvader", "cost": 67},
                {"name": "Darth Vader (clone)", "xws": "darthvader", "cost": 67}
            ]
        }),
    );

    let output = Command::new(bin())
        .args(["validate", tmp.path().to_string_lossy().as_ref()])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate pilot id 'darthvader'"));
    assert!(stderr.contains("validation failed"));
}

#[test]
fn validate_command_passes_on_clean_tree() {
    let tmp = fixture_tree();
    let output = Command::new(bin())
        .args(["validate", tmp.path().to_string_lossy().as_ref()])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}
