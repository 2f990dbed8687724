use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn plan_text_shows_tables_and_marks() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.env("NO_COLOR", "1")
        .arg("plan")
        .arg(fixture("fixtures/dual-wan-policy.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("- fiber table=to-wan1 probe=8.8.8.8"))
        .stdout(predicate::str::contains("- dsl table=to-wan2 probe=1.1.1.1 gateway=pppoe-out2"))
        .stdout(predicate::str::contains("- guest in=vlan20 -> to-wan2 (dsl, mapped)"))
        .stdout(predicate::str::contains("- vlan 20 network=vlan20 tagged=bridge-lan,ether4,sfp1"));
}

#[test]
fn plan_json_lists_skipped_uplinks() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    let output = cmd
        .arg("plan")
        .arg(fixture("fixtures/lte-backup.json"))
        .arg("--format")
        .arg("json")
        .output()
        .expect("run plan");
    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json plan");
    assert_eq!(plan["failover"]["skipped"][0], "lte");
    assert_eq!(plan["failover"]["uplinks"][0]["table"], "to-wan1");
    assert_eq!(plan["policy"]["active"], false);
}
