//! Integration tests for Coverdesk CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn coverdesk() -> Command {
    Command::cargo_bin("coverdesk").unwrap()
}

fn json_stdout(args: &[&str]) -> serde_json::Value {
    let output = coverdesk().args(args).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Test the version command
#[test]
fn test_cli_version() {
    coverdesk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("coverdesk"));
}

/// Test the help command
#[test]
fn test_cli_help() {
    coverdesk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("insurance policy catalog"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("types"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_search_text_lists_everything() {
    coverdesk()
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("Secure Future Term Life"))
        .stdout(predicate::str::contains("Wellness Complete Health"))
        .stdout(predicate::str::contains("5 of 5 policies"));
}

#[test]
fn test_search_json_sorted_ascending() {
    let json = json_stdout(&["search", "--sort", "asc", "--format", "json"]);
    let premiums: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["premium"].as_i64().unwrap())
        .collect();
    assert_eq!(premiums, vec![2000, 3000, 3500, 4500, 5000]);
}

#[test]
fn test_verbose_search_keeps_json_on_stdout() {
    let json = json_stdout(&["-v", "search", "--type", "Health", "--format", "json"]);
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn test_search_json_unknown_sort_keeps_order() {
    let json = json_stdout(&["search", "--sort", "up", "--format", "json"]);
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_search_type_and_min_premium() {
    let json = json_stdout(&[
        "search",
        "--type",
        "Health",
        "--min-premium",
        "3200",
        "--format",
        "json",
    ]);
    let policies = json.as_array().unwrap();
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0]["name"], "Wellness Complete Health");
    assert_eq!(policies[0]["type"], "Health");
}

#[test]
fn test_search_no_matches() {
    coverdesk()
        .args(["search", "--name", "boat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No policies match"))
        .stdout(predicate::str::contains("0 of 5 policies"));
}

#[test]
fn test_search_rejects_non_numeric_premium() {
    coverdesk()
        .args(["search", "--min-premium", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_show_policy() {
    coverdesk()
        .args(["show", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Car Protect Plan"))
        .stdout(predicate::str::contains("Type: Vehicle"));
}

#[test]
fn test_show_missing_policy_fails() {
    coverdesk()
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No policy with id 42"));
}

#[test]
fn test_types_json() {
    let json = json_stdout(&["types", "--format", "json"]);
    let mut types: Vec<String> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap().to_string())
        .collect();
    types.sort();
    assert_eq!(types, vec!["Health", "Term Life", "Vehicle"]);
}

#[test]
fn test_types_text() {
    coverdesk()
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Policy Types"))
        .stdout(predicate::str::contains("Term Life"));
}

#[test]
fn test_serve_with_invalid_config_fails() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "bind_address = \"nowhere\"").unwrap();

    coverdesk()
        .arg("serve")
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bind_address"));
}

#[test]
fn test_serve_with_unknown_config_key_fails() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "workers = 4").unwrap();

    coverdesk()
        .arg("serve")
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
