use std::fs;
use std::path::Path;
use std::thread;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn coffee_shop(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("coffee-shop");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .expect("utf-8 stdout")
        .trim()
        .to_string()
}

fn deploy(dir: &Path, price: &str) -> String {
    stdout_of(coffee_shop(dir).args(["deploy", "--owner", "owner", "--price", price]))
}

fn state(dir: &Path, contract: &str) -> serde_json::Value {
    let json = stdout_of(coffee_shop(dir).args(["state", "--contract", contract]));
    serde_json::from_str(&json).expect("state should be JSON")
}

#[test]
fn purchase_and_withdraw_flow() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    let contract = deploy(dir, "1000");
    assert!(contract.starts_with("0x"));
    assert!(dir.join("coffee-shop.state.json").exists());

    coffee_shop(dir)
        .args(["fund", "alice", "5000"])
        .assert()
        .success()
        .stdout("5000\n");

    coffee_shop(dir)
        .args(["purchase", "--contract", contract.as_str(), "--from", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"topic\":\"coffee_purchased\""))
        .stdout(predicate::str::contains("\"amount\":1000"));

    let shop = state(dir, contract.as_str());
    assert_eq!(shop["purchase_count"], 1);
    assert_eq!(shop["balance"], 1000);
    assert_eq!(shop["price"], 1000);

    coffee_shop(dir)
        .args(["withdraw", "--contract", contract.as_str(), "--from", "alice"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unauthorized caller"));

    coffee_shop(dir)
        .args(["withdraw", "--contract", contract.as_str(), "--from", "owner"])
        .assert()
        .success()
        .stdout("1000\n");

    coffee_shop(dir)
        .args(["balance", "owner"])
        .assert()
        .success()
        .stdout("1000\n");
    coffee_shop(dir)
        .args(["balance", "alice"])
        .assert()
        .success()
        .stdout("4000\n");

    coffee_shop(dir)
        .args(["withdraw", "--contract", contract.as_str(), "--from", "owner"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Nothing to withdraw"));
}

#[test]
fn concurrent_purchases_are_all_saved() {
    const BUYERS: usize = 16;

    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    let contract = deploy(dir, "100");
    let buyers: Vec<String> = (0..BUYERS).map(|i| format!("buyer-{i}")).collect();
    for buyer in &buyers {
        coffee_shop(dir)
            .args(["fund", buyer.as_str(), "100"])
            .assert()
            .success();
    }

    let succeeded = thread::scope(|scope| {
        let handles: Vec<_> = buyers
            .iter()
            .map(|buyer| {
                let contract = contract.as_str();
                scope.spawn(move || {
                    coffee_shop(dir)
                        .args(["purchase", "--contract", contract, "--from", buyer.as_str()])
                        .output()
                        .expect("purchase should run")
                        .status
                        .success()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("purchase thread should not panic"))
            .filter(|succeeded| *succeeded)
            .count()
    });
    assert_eq!(succeeded, BUYERS);

    let shop = state(dir, contract.as_str());
    assert_eq!(shop["purchase_count"], BUYERS);
    assert_eq!(shop["balance"], 100 * BUYERS);

    let log = stdout_of(coffee_shop(dir).args(["events"]));
    assert_eq!(log.lines().count(), BUYERS);
    for buyer in &buyers {
        coffee_shop(dir)
            .args(["balance", buyer.as_str()])
            .assert()
            .success()
            .stdout("0\n");
    }
}

#[test]
fn wrong_payment_is_rejected_without_effect() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    let contract = deploy(dir, "1000");
    coffee_shop(dir).args(["fund", "bob", "5000"]).assert().success();

    coffee_shop(dir)
        .args([
            "purchase",
            "--contract",
            contract.as_str(),
            "--from",
            "bob",
            "--value",
            "999",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "incorrect payment amount: expected 1000, got 999",
        ));

    let shop = state(dir, contract.as_str());
    assert_eq!(shop["purchase_count"], 0);
    assert_eq!(shop["balance"], 0);

    coffee_shop(dir)
        .args(["balance", "bob"])
        .assert()
        .success()
        .stdout("5000\n");
    coffee_shop(dir)
        .args(["events"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn config_sets_default_price_and_state_path() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    fs::write(
        dir.join("coffee-shop.toml"),
        "state = \"ledger/state.json\"\ndefault_price = 7\n",
    )
    .expect("write config");

    let contract = stdout_of(coffee_shop(dir).args(["deploy", "--owner", "owner"]));

    assert!(dir.join("ledger/state.json").exists());
    assert!(!dir.join("coffee-shop.state.json").exists());
    assert_eq!(state(dir, contract.as_str())["price"], 7);
}

#[test]
fn call_dispatches_by_function_name() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    let contract = deploy(dir, "10");
    coffee_shop(dir).args(["fund", "carol", "10"]).assert().success();

    coffee_shop(dir)
        .args([
            "call",
            "--contract",
            contract.as_str(),
            "--from",
            "carol",
            "--value",
            "10",
            "purchase",
        ])
        .assert()
        .success()
        .stdout("null\n");

    coffee_shop(dir)
        .args(["call", "--contract", contract.as_str(), "--from", "carol", "purchase_count"])
        .assert()
        .success()
        .stdout("1\n");

    coffee_shop(dir)
        .args([
            "call",
            "--contract",
            contract.as_str(),
            "--from",
            "carol",
            "--value",
            "5",
            "price",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not accept value"));

    coffee_shop(dir)
        .args(["call", "--contract", contract.as_str(), "--from", "carol", "self_destruct"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown function 'self_destruct'"));
}

#[test]
fn events_filter_by_sequence_and_contract() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    let first = deploy(dir, "1");
    let second = deploy(dir, "2");
    coffee_shop(dir).args(["fund", "dave", "10"]).assert().success();

    for contract in [first.as_str(), second.as_str(), first.as_str()] {
        coffee_shop(dir)
            .args(["purchase", "--contract", contract, "--from", "dave"])
            .assert()
            .success();
    }

    let all = stdout_of(coffee_shop(dir).args(["events"]));
    assert_eq!(all.lines().count(), 3);

    let later = stdout_of(coffee_shop(dir).args(["events", "--since", "1"]));
    assert_eq!(later.lines().count(), 2);

    let from_first = stdout_of(coffee_shop(dir).args(["events", "--contract", first.as_str()]));
    assert_eq!(from_first.lines().count(), 2);
    assert!(from_first.lines().all(|line| line.contains(&first)));
}

#[test]
fn unknown_contract_and_corrupt_state_fail() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path();
    let missing = format!("0x{}", "11".repeat(32));

    coffee_shop(dir)
        .args(["state", "--contract", missing.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown contract"));

    fs::write(dir.join("coffee-shop.state.json"), "{ not json").expect("write state");
    coffee_shop(dir)
        .args(["balance", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt state file"));
}

#[test]
fn schema_lists_functions_and_events() {
    let tmp = tempdir().expect("tempdir");
    let json = stdout_of(coffee_shop(tmp.path()).args(["schema"]));
    let schema: serde_json::Value = serde_json::from_str(&json).expect("schema should be JSON");

    let names: Vec<_> = schema["functions"]
        .as_array()
        .expect("functions array")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(
        names,
        ["purchase", "withdraw_funds", "owner", "price", "purchase_count"]
    );
    assert_eq!(schema["events"][0]["topic"], "coffee_purchased");
}
