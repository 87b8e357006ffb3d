use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("simulate"));
}

#[test]
fn classify_by_template() {
    Command::cargo_bin("cli")
        .unwrap()
        .args([
            "classify",
            "--template",
            "systems/dsa5/templates/dialog/regeneration-dialog.hbs",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ExactTemplate"));
}

#[test]
fn classify_miss_prints_no_match() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["classify", "--title", "Attack roll"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn roll_is_deterministic_per_seed() {
    let run = || {
        let output = Command::cargo_bin("cli")
            .unwrap()
            .args(["roll", "--seed", "7", "--rolls", "10"])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn simulate_builtin_warrior_forces_four() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["simulate", "--id", "warrior", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recovered_total\": 4"));
}

#[test]
fn simulate_unknown_actor_fails() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["simulate", "--id", "dragon"])
        .assert()
        .failure();
}
