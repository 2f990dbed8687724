use std::path::PathBuf;
use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn compile_writes_script_to_stdout() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.arg("compile")
        .arg(fixture("fixtures/single-static.toml"))
        .arg("--generated-at")
        .arg("2024-06-01T08:30:00Z")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "# ros-topology configuration for shop-01\n# --- system ---\n# generated 2024-06-01T08:30:00Z\n",
        ))
        .stdout(predicate::str::contains(
            "/ip route add dst-address=8.8.8.8/32 gateway=203.0.113.1 scope=10",
        ))
        .stdout(predicate::str::contains("# --- heartbeat ---"));
}

#[test]
fn compile_writes_output_file() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("shop-01.rsc");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.arg("compile")
        .arg(fixture("fixtures/dual-wan-policy.toml"))
        .arg("--output")
        .arg(path_as_str(&out))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("sections=8"));

    let text = fs::read_to_string(&out).expect("read script");
    assert!(text.contains("new-routing-mark=to-wan2"));
    assert!(text.is_ascii());
}

#[test]
fn compile_refuses_to_overwrite_model() {
    let dir = tempdir().expect("tempdir");
    let model = dir.path().join("site.toml");
    fs::copy(fixture("fixtures/single-static.toml"), &model).expect("copy fixture");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.arg("compile")
        .arg(path_as_str(&model))
        .arg("-o")
        .arg(path_as_str(&model))
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));
}

#[test]
fn compile_fails_on_invalid_model() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.arg("compile")
        .arg(fixture("fixtures/invalid-duplicate-vlan.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("VLAN 10"));
}

#[test]
fn compile_rejects_too_many_uplinks_unless_truncating() {
    let dir = tempdir().expect("tempdir");
    let model = dir.path().join("six.toml");
    let mut raw = String::from(
        "identity = \"six\"\n\n[management]\ntoken = \"t\"\nheartbeat_url = \"https://h.example/hb\"\n\n[dns]\nservers = [\"1.1.1.1\"]\n",
    );
    for i in 1..=6 {
        raw.push_str(&format!(
            "\n[[ports]]\nname = \"ether{i}\"\nhardware_type = \"ether\"\ndefault_role = \"wan\"\n\n[[uplinks]]\nid = \"wan{i}\"\ninterface = \"ether{i}\"\nkind = \"static\"\naddress = \"198.51.{i}.2/30\"\ngateway = \"198.51.{i}.1\"\n"
        ));
    }
    fs::write(&model, raw).expect("write model");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.arg("compile")
        .arg(path_as_str(&model))
        .assert()
        .failure()
        .stderr(predicate::str::contains("6 uplinks supplied"));

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.arg("compile")
        .arg(path_as_str(&model))
        .arg("--truncate-uplinks")
        .assert()
        .success()
        .stdout(predicate::str::contains("name=to-wan5"))
        .stdout(predicate::str::contains("name=to-wan6").not());
}

#[test]
fn compile_uses_profile_override() {
    let dir = tempdir().expect("tempdir");
    let profile = dir.path().join("site-profile.toml");
    fs::write(
        &profile,
        "bridge_name = \"br-core\"\nprobe_addresses = [\"192.0.2.53\"]\n",
    )
    .expect("write profile");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.arg("compile")
        .arg(fixture("fixtures/single-static.toml"))
        .arg("--profile")
        .arg(path_as_str(&profile))
        .assert()
        .success()
        .stdout(predicate::str::contains("/interface bridge add name=br-core"))
        .stdout(predicate::str::contains("dst-address=192.0.2.53/32"));
}

#[test]
fn compile_warns_about_unassigned_lan_ports() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.env_remove("RUST_LOG")
        .arg("compile")
        .arg(fixture("fixtures/lte-backup.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "LAN port wlan1 has no assignment; left off the bridge",
        ));

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-topology"));
    cmd.env_remove("RUST_LOG")
        .arg("-q")
        .arg("compile")
        .arg(fixture("fixtures/lte-backup.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("wlan1").not());
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}
