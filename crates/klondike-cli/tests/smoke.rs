use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn klondike() -> Command {
    Command::cargo_bin("klondike").expect("binary built")
}

#[test]
fn seeded_game_plays_and_quits() {
    klondike()
        .args(["--seed", "42"])
        .write_stdin("show\nhint\ndraw\nundo\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed 42"))
        .stdout(predicate::str::contains("Hint: ").or(predicate::str::contains("No moves found.")))
        .stdout(predicate::str::contains("Drew "))
        .stdout(predicate::str::contains("Undone."))
        .stdout(predicate::str::contains("Bye."));
}

#[test]
fn same_seed_same_board() {
    let run = || {
        let output = klondike()
            .args(["--seed", "7"])
            .write_stdin("json\n")
            .output()
            .expect("runs");
        String::from_utf8(output.stdout).expect("utf8")
    };
    assert_eq!(run(), run());
}

#[test]
fn end_of_input_exits_cleanly() {
    klondike()
        .args(["--seed", "1"])
        .write_stdin("bogus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command 'bogus'"));
}

#[test]
fn rejects_out_of_range_hint_depth() {
    klondike()
        .args(["--hint-depth", "0", "--validate-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hint.max_depth"));
}

#[test]
fn config_file_sets_seed_and_structured_logs() {
    let dir = tempdir().expect("temp dir");
    let log_path = dir.path().join("logs").join("play.jsonl");
    let config_path = dir.path().join("play.yaml");
    fs::write(
        &config_path,
        format!(
            "seed: 99\nhint:\n  max_depth: 4\nlogging:\n  enable_structured: true\n  tracing_level: \"debug\"\n  log_path: \"{}\"\n",
            log_path.display()
        ),
    )
    .expect("write config");

    klondike()
        .arg("--config")
        .arg(&config_path)
        .env_remove("RUST_LOG")
        .write_stdin("draw\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed 99"));

    let logs = fs::read_to_string(&log_path).expect("log file written");
    let first = logs.lines().next().expect("at least one event");
    let event: serde_json::Value = serde_json::from_str(first).expect("json line");
    assert!(event.get("fields").is_some());
    assert!(logs.contains("\"seed\":99"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().expect("temp dir");
    klondike()
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}
