use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pocket(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pocket").unwrap();
    cmd.env("POCKET_LEDGER_DATA_DIR", dir).env_remove("RUST_LOG");
    cmd
}

fn add_coffee(dir: &Path) -> String {
    let output = pocket(dir)
        .args(["txn", "add", "50", "-c", "Food & Groceries", "-t", "Coffee"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: "))
        .unwrap()
        .to_string()
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("txn"))
        .stdout(predicate::str::contains("recurring"));
}

#[test]
fn test_add_and_list_transaction() {
    let temp = TempDir::new().unwrap();
    add_coffee(temp.path());

    pocket(temp.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"))
        .stdout(predicate::str::contains("₹50"));
}

#[test]
fn test_transactions_are_encrypted_at_rest() {
    let temp = TempDir::new().unwrap();
    add_coffee(temp.path());

    let slot = temp
        .path()
        .join("slots")
        .join("budget_tracker_transactions.dat");
    let raw = fs::read_to_string(slot).unwrap();
    assert!(!raw.contains("Coffee"));
    assert!(temp.path().join("slots").join("app_vault_seed.dat").exists());
}

#[test]
fn test_delete_transaction() {
    let temp = TempDir::new().unwrap();
    let id = add_coffee(temp.path());

    pocket(temp.path())
        .args(["txn", "delete", &id])
        .assert()
        .success();
    pocket(temp.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
    pocket(temp.path())
        .args(["txn", "delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_rejects_zero_amount() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .args(["txn", "add", "0", "-c", "Transportation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn test_sentinel_category_is_protected() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .args(["category", "delete", "Income"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be removed"));

    pocket(temp.path())
        .args(["category", "add", "Pets"])
        .assert()
        .success();
    pocket(temp.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pets"))
        .stdout(predicate::str::contains("custom"));
}

#[test]
fn test_budget_set_twice_keeps_latest() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .args(["budget", "set", "Pets", "300"])
        .assert()
        .success();
    pocket(temp.path())
        .args(["budget", "set", "Pets", "450"])
        .assert()
        .success();

    let output = pocket(temp.path()).args(["budget", "list"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("Pets").count(), 1);
    assert!(stdout.contains("₹450"));
}

#[test]
fn test_export_json_is_plaintext() {
    let temp = TempDir::new().unwrap();
    add_coffee(temp.path());

    let out = temp.path().join("backup.json");
    pocket(temp.path())
        .args(["export", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(json[0]["title"], "Coffee");
    assert_eq!(json[0]["isExpense"], true);
}

#[test]
fn test_export_csv_to_stdout() {
    let temp = TempDir::new().unwrap();
    add_coffee(temp.path());

    pocket(temp.path())
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID,Date,Title"))
        .stdout(predicate::str::contains("Coffee"));
}

#[test]
fn test_sms_flag() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .args(["sms", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));
    pocket(temp.path())
        .args(["sms", "enable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled"));
}

#[test]
fn test_wipe_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    add_coffee(temp.path());

    pocket(temp.path()).arg("wipe").assert().failure();
    assert!(temp.path().join("slots").join("app_vault_seed.dat").exists());

    pocket(temp.path()).args(["wipe", "--yes"]).assert().success();
    assert!(!temp.path().join("slots").join("app_vault_seed.dat").exists());
    pocket(temp.path())
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_summary() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .args(["txn", "add", "1000", "-c", "Income", "--income", "-d", "2024-05-03"])
        .assert()
        .success();
    pocket(temp.path())
        .args(["txn", "add", "250", "-c", "Transportation", "-d", "2024-05-04"])
        .assert()
        .success();

    pocket(temp.path())
        .args(["summary", "--month", "2024-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary for 2024-05"))
        .stdout(predicate::str::contains("₹750 (75%)"));
}

#[test]
fn test_recurring_add_list_delete() {
    let temp = TempDir::new().unwrap();
    let output = pocket(temp.path())
        .args(["recurring", "add", "Rent", "15000", "-f", "monthly", "-c", "Housing & Utilities"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID: "))
        .unwrap()
        .to_string();

    pocket(temp.path())
        .args(["recurring", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing due."));
    pocket(temp.path())
        .args(["recurring", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("Monthly"));
    pocket(temp.path())
        .args(["recurring", "delete", &id])
        .assert()
        .success();
}

#[test]
fn test_rejects_oversized_amount() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .args(["txn", "add", "50000000000000000", "-c", "Transportation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn test_recurring_add_needs_a_real_frequency() {
    let temp = TempDir::new().unwrap();
    pocket(temp.path())
        .args(["recurring", "add", "Gym", "900", "-f", "none", "-c", "Transportation"])
        .assert()
        .failure();
    pocket(temp.path())
        .args(["recurring", "add", "Gym", "900", "-f", "monthly", "-c", "Pets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_writes_settings_and_reports_collections() {
    let temp = TempDir::new().unwrap();
    add_coffee(temp.path());

    assert!(temp.path().join("config.json").exists());
    pocket(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("budget_tracker_transactions"))
        .stdout(predicate::str::contains("readable"));
}
