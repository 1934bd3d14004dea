//! CLI Interface Tests
//!
//! Runs the dtkt binary against small source trees in temporary
//! directories. Each workspace carries its own empty `dtkt.toml` so user
//! configuration never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the dtkt binary
fn dtkt_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dtkt"))
}

/// A temporary directory with an empty configuration file.
fn workspace() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(temp_dir.path().join("dtkt.toml"), "").expect("Failed to write config");
    temp_dir
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write source");
    path
}

fn dtkt(dir: &Path) -> Command {
    let mut cmd = Command::new(dtkt_bin());
    cmd.current_dir(dir)
        .env_remove("DTKT_CONFIG")
        .env_remove("DTKT_VERBOSE")
        .env("DTKT_NO_COLOR", "true");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = workspace();
    dtkt(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage").and(predicate::str::contains("check")));
}

#[test]
fn test_cli_version() {
    let dir = workspace();
    dtkt(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dtkt"));
}

#[test]
fn test_cli_languages() {
    let dir = workspace();
    dtkt(dir.path())
        .arg("languages")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("decohack")
                .and(predicate::str::contains("*.dh"))
                .and(predicate::str::contains("doommake.script")),
        );
}

#[test]
fn test_cli_languages_keywords_json() {
    let dir = workspace();
    let output = dtkt(dir.path())
        .args(["languages", "--keywords", "--format", "json"])
        .output()
        .expect("Failed to run dtkt");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let defswani = value
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["name"] == "defswani")
        .unwrap();
    assert_eq!(defswani["keywords"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_tokens_text() {
    let dir = workspace();
    write(dir.path(), "imp.dh", "thing 3001 \"Imp\"\n");

    dtkt(dir.path())
        .args(["tokens", "imp.dh"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("(decohack)")
                .and(predicate::str::contains("ReservedWord"))
                .and(predicate::str::contains("\"\\\"Imp\\\"\"")),
        );
}

#[test]
fn test_cli_tokens_json_line() {
    let dir = workspace();
    write(dir.path(), "build.rscript", "a = 1;\n/* open\nstill */ b;\n");

    let output = dtkt(dir.path())
        .args(["tokens", "build.rscript", "--line", "2", "-F", "json"])
        .output()
        .expect("Failed to run dtkt");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let line = &value[0]["lines"][0];
    assert_eq!(line["line"], 2);
    assert_eq!(line["end_state"], "BlockComment");
    assert_eq!(line["tokens"][0]["kind"], "CommentMultiline");
    assert_eq!(line["tokens"][0]["offset"], 7);
}

#[test]
fn test_cli_tokens_unknown_language() {
    let dir = workspace();
    write(dir.path(), "notes.md", "hello");

    dtkt(dir.path())
        .args(["tokens", "notes.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot determine language"));
}

#[test]
fn test_cli_tokens_language_flag() {
    let dir = workspace();
    write(dir.path(), "TEXTURE1.txt", "BIGDOOR1 128 96\n");

    dtkt(dir.path())
        .args(["tokens", "TEXTURE1.txt", "--language", "deutex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TextureName"));
}

#[test]
fn test_cli_check_clean() {
    let dir = workspace();
    write(dir.path(), "merge.wadm", "create out\nfinish out $1\n");

    dtkt(dir.path())
        .args(["check", "."])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_check_reports_errors() {
    let dir = workspace();
    write(dir.path(), "ok.dh", "thing 1 \"Imp\"\n");
    write(dir.path(), "bad.dh", "health 0x\n");

    dtkt(dir.path())
        .args(["check", ".", "--jobs", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("bad.dh:1:8: malformed number: 0x"))
        .stdout(predicate::str::contains("ok.dh").not());
}

#[test]
fn test_cli_check_config_extension_override() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("dtkt.toml"),
        "[lex.extensions]\nlmp = \"deutex\"\n",
    )
    .unwrap();
    write(dir.path(), "patches.lmp", "wall 1\n");

    dtkt(dir.path())
        .args(["check", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "patches.lmp:1:1: unrecognized identifier character: wall",
        ));
}

#[test]
fn test_cli_stats() {
    let dir = workspace();
    write(dir.path(), "anim.txt", "[FLATS]\n8 NUKAGE3 NUKAGE1\n");

    dtkt(dir.path())
        .args(["stats", "anim.txt", "-l", "defswani"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 line(s)")
                .and(predicate::str::contains("ReservedWord"))
                .and(predicate::str::contains("NumberDecimal")),
        );
}

#[test]
fn test_cli_init_and_force() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let target = dir.path().join("project");

    dtkt(dir.path())
        .args(["init", "--path"])
        .arg(&target)
        .assert()
        .success();
    assert!(target.join("dtkt.toml").exists());

    dtkt(dir.path())
        .args(["init", "--path"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    dtkt(dir.path())
        .args(["init", "--force", "--path"])
        .arg(&target)
        .assert()
        .success();
}

#[test]
fn test_cli_missing_config_file() {
    let dir = workspace();
    dtkt(dir.path())
        .args(["--config", "missing.toml", "languages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
