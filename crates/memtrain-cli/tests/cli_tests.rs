//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn memtrain() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("memtrain").unwrap()
}

const ONE_ROW: &str = "\
Capitals
Cue,Response,Synonym,Tag
The capital of France is {{}}.,Paris,,europe
";

fn write_table(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    memtrain()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    memtrain()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("memtrain"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    memtrain()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created capitals.csv"));

    assert!(dir.path().join("capitals.csv").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    write_table(&dir, "capitals.csv", ONE_ROW);

    memtrain()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));

    let content = std::fs::read_to_string(dir.path().join("capitals.csv")).unwrap();
    assert_eq!(content, ONE_ROW);
}

#[test]
fn init_then_inspect() {
    let dir = TempDir::new().unwrap();
    memtrain().current_dir(dir.path()).arg("init").assert().success();

    memtrain()
        .current_dir(dir.path())
        .args(["inspect", "capitals.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("World capitals"))
        .stdout(predicate::str::contains("nquestions"))
        .stdout(predicate::str::contains("responses"));
}

#[test]
fn inspect_json() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    let output = memtrain()
        .arg("inspect")
        .arg(&table)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["settings"]["title"], "Capitals");
    assert_eq!(value["counts"]["responses"], 1);
    assert_eq!(value["aliases"], 1);
}

#[test]
fn train_padded_session() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);
    let summary = dir.path().join("summary.json");

    memtrain()
        .arg("train")
        .arg(&table)
        .args(["-n", "2", "-l", "3", "--seed", "1", "--summary-json"])
        .arg(&summary)
        .write_stdin("paris\nPariss\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 3"))
        .stdout(predicate::str::contains("Response 2 of 2"))
        .stdout(predicate::str::contains("Incorrect. Answer: Paris"))
        .stdout(predicate::str::contains("Training session complete."))
        .stdout(predicate::str::contains("Correct: 1/2 (50.0%)"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(saved["number_correct"], 1);
    assert_eq!(saved["incorrect_responses"][0], "Paris");
}

#[test]
fn train_accepts_alias() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    memtrain()
        .arg("train")
        .arg(&table)
        .args(["--level", "3", "--seed", "4"])
        .write_stdin("p\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct: 1/1 (100.0%)"));
}

#[test]
fn train_stops_on_end_of_input() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    memtrain()
        .arg("train")
        .arg(&table)
        .args(["-n", "3", "-l", "2"])
        .write_stdin("paris\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));
}

#[test]
fn train_nonexistent_file() {
    memtrain()
        .args(["train", "nonexistent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("nonexistent.csv"));
}

#[test]
fn train_disabled_level_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(
        &dir,
        "locked.csv",
        "settings: !level1\nCue,Response,Synonym\nOne,1,\n",
    );

    memtrain()
        .arg("train")
        .arg(&table)
        .args(["--level", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("level"));
}

#[test]
fn train_unknown_tag_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    memtrain()
        .arg("train")
        .arg(&table)
        .args(["--tags", "asia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("asia"));
}

#[test]
fn train_rejects_negative_count() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    memtrain()
        .arg("train")
        .arg(&table)
        .args(["-n", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn train_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    memtrain()
        .arg("train")
        .arg(&table)
        .args(["--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn rust_log_enables_engine_debug_output() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    memtrain()
        .env("RUST_LOG", "memtrain=debug")
        .arg("inspect")
        .arg(&table)
        .assert()
        .success()
        .stderr(predicate::str::contains("ingested table"));
}

#[test]
fn quiet_logging_by_default() {
    let dir = TempDir::new().unwrap();
    let table = write_table(&dir, "one.csv", ONE_ROW);

    memtrain()
        .env_remove("RUST_LOG")
        .arg("inspect")
        .arg(&table)
        .assert()
        .success()
        .stderr(predicate::str::contains("ingested table").not());
}
