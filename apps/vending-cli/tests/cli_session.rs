//! End-to-end tests of the `vending` binary fed through stdin.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"id": "1", "name": "Water", "quantity": 2, "price": 1.3},
    {"id": "2", "name": "Crisps", "quantity": 1, "price": 3.47},
    {"id": "3", "name": "Gum", "quantity": 0, "price": 0.4}
]"#;

fn machine_dir(catalog: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("products.json"), catalog).unwrap();
    dir
}

fn vending(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vending").unwrap();
    cmd.current_dir(dir)
        .env("RUST_LOG", "off")
        .env_remove("VENDING_CONFIG")
        .env_remove("VENDING_CURRENCY")
        .env_remove("VENDING_CATALOG_PATH")
        .env_remove("VENDING_CHANGE_STRATEGY");
    cmd
}

#[test]
fn test_startup_lists_catalog() {
    let dir = machine_dir(CATALOG);

    vending(dir.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Vending Oasis"))
        .stdout(predicate::str::contains("1: Water 1.30EUR [2 left]"))
        .stdout(predicate::str::contains("3: Gum 0.40EUR [sold out]"));
}

#[test]
fn test_purchase_prints_change() {
    let dir = machine_dir(CATALOG);

    vending(dir.path())
        .write_stdin("select 2\ncoin 2\ncoin 2\ncoin 1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Change:\n[1x] 1.00EUR\n[1x] 0.50EUR\n[1x] 0.02EUR\n[1x] 0.01EUR\nThanks for your purchase!",
        ));
}

#[test]
fn test_exact_payment() {
    let dir = machine_dir(CATALOG);

    vending(dir.path())
        .write_stdin("buy 1\ncoin 1\ncoin 0.2\ncoin 0.1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Change: 0\nThanks for your purchase!"));
}

#[test]
fn test_errors_keep_machine_running() {
    let dir = machine_dir(CATALOG);

    vending(dir.path())
        .write_stdin("select 3\nselect 1\ncoin 0.03\ndance\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: Gum is sold out"))
        .stdout(predicate::str::contains("error: Coin 0.03 is not accepted"))
        .stdout(predicate::str::contains("error: Unknown command: dance"))
        .stdout(predicate::str::contains("Bill: 1.30EUR"));
}

#[test]
fn test_paid_bill_locks_until_reset() {
    let dir = machine_dir(CATALOG);

    vending(dir.path())
        .write_stdin("select 1\ncoin 2\ncoin 1\nselect 1\nreset\nselect 1\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: Bill already paid"))
        .stdout(predicate::str::contains("Machine reset"))
        .stdout(predicate::str::contains("Inserted: 0.00EUR"));
}

#[test]
fn test_status_json() {
    let dir = machine_dir(CATALOG);

    vending(dir.path())
        .write_stdin("select 1\ncoin 2\nstatus --json\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"paid\": true"))
        .stdout(predicate::str::contains("\"tendered\": 200"));
}

#[test]
fn test_load_replaces_catalog() {
    let dir = machine_dir(CATALOG);
    fs::write(
        dir.path().join("new.json"),
        r#"{"products": [{"_id": "9", "name": "Cola", "quantity": 3, "price": "2.50"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("bad.json"),
        r#"[{"id": "9", "name": "Cola", "quantity": 30, "price": 2.5}]"#,
    )
    .unwrap();

    vending(dir.path())
        .write_stdin("load bad.json\nload new.json\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: quantity must be between 1 and 15"))
        .stdout(predicate::str::contains("Catalog saved: 1 products"))
        .stdout(predicate::str::contains("9: Cola 2.50EUR [3 left]"));
}

#[test]
fn test_empty_catalog() {
    let dir = machine_dir("[]");

    vending(dir.path())
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("No products available!\n"));
}

#[test]
fn test_missing_catalog_fails() {
    let dir = TempDir::new().unwrap();

    vending(dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Loading catalog"));
}

#[test]
fn test_config_file_and_strategy_flag() {
    let dir = machine_dir(r#"[{"id": "1", "name": "Token", "quantity": 5, "price": 0.04}]"#);
    fs::write(
        dir.path().join("vending.toml"),
        r#"
currency = "USD"

[[coins]]
label = "Dime"
value = "0.10"

[[coins]]
label = "Nickel"
value = "0.05"

[[coins]]
label = "Two"
value = "0.02"
"#,
    )
    .unwrap();

    // 0.10 - 0.04 = 0.06: greedy takes a nickel and is left with 0.01
    vending(dir.path())
        .write_stdin("select 1\ncoin 0.10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inserted 0.10USD (total 0.10USD, bill 0.04USD)\nUnable to compute change\n",
        ));

    vending(dir.path())
        .args(["--strategy", "minimum_coins"])
        .write_stdin("select 1\ncoin 0.10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Change:\n[3x] 0.02USD"));
}
