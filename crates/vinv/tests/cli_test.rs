//! Integration tests for the `vinv` CLI binary.
//!
//! Everything runs against a backup workdir built in a tempdir, so no
//! vManage controller is needed.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vinv` binary with env isolation.
///
/// Clears all `VMANAGE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn vinv_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vinv");
    cmd.env("HOME", "/tmp/vinv-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vinv-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("VMANAGE_PROFILE")
        .env_remove("VMANAGE_IP")
        .env_remove("VMANAGE_PORT")
        .env_remove("VMANAGE_USER")
        .env_remove("VMANAGE_PASSWORD")
        .env_remove("VMANAGE_TENANT")
        .env_remove("VMANAGE_TIMEOUT")
        .env_remove("VMANAGE_INSECURE");
    cmd
}

/// Like [`vinv_cmd`], but with config directories rooted in `home`.
fn vinv_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = vinv_cmd();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

/// Write `contents` to the config file the binary resolves under `home`.
fn write_config(home: &Path, contents: &str) -> PathBuf {
    let output = vinv_cmd_in(home).args(["config", "path"]).output().unwrap();
    assert!(output.status.success());
    let path = PathBuf::from(String::from_utf8(output.stdout).unwrap().trim());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_payload(root: &Path, file: &str, payload: &Value) {
    let dir = root.join("inventory");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), payload.to_string()).unwrap();
}

/// Backup with two devices and two certificates.
fn backup() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    write_payload(
        tmp.path(),
        "device.json",
        &json!({ "data": [
            {
                "uuid": "u1", "host-name": "r1", "deviceId": "10.0.0.1", "site-id": "100",
                "reachability": "reachable", "device-type": "vedge",
                "device-model": "ModelX", "version": "1.0"
            },
            {
                "uuid": "u2", "host-name": "r2", "deviceId": "10.0.0.2", "site-id": "200",
                "reachability": "down", "device-type": "cisco-router",
                "device-model": "ModelY", "version": "2.0"
            }
        ]}),
    );
    write_payload(
        tmp.path(),
        "device_models.json",
        &json!({ "data": [{ "name": "ModelX", "deviceClass": "cisco-router" }] }),
    );
    write_payload(
        tmp.path(),
        "certificates.json",
        &json!({ "data": [
            { "host-name": "r1", "chassisNumber": "C8K-AAA", "serialNumber": "01",
              "vedgeCertificateState": "certinstalled", "validity": "valid" },
            { "chassisNumber": "C8K-BBB", "serialNumber": "02",
              "vedgeCertificateState": "tokengenerated", "validity": "valid" }
        ]}),
    );
    tmp
}

fn inventory(workdir: &Path) -> assert_cmd::Command {
    let mut cmd = vinv_cmd();
    cmd.arg("--workdir").arg(workdir).arg("inventory");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vinv_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    vinv_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("inventory")
            .and(predicate::str::contains("certificate"))
            .and(predicate::str::contains("--workdir")),
    );
}

#[test]
fn test_help_documents_password_env() {
    vinv_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("VMANAGE_PASSWORD"));
}

#[test]
fn test_version_flag() {
    vinv_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vinv"));
}

#[test]
fn test_completions_bash() {
    vinv_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vinv"));
}

#[test]
fn test_config_path() {
    vinv_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Inventory from backup ───────────────────────────────────────────

#[test]
fn test_inventory_csv_all_devices_in_order() {
    let tmp = backup();
    let output = inventory(tmp.path()).args(["-o", "csv"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "uuid,name,system_ip,site_id,state,model,version,device_type\n\
         u1,r1,10.0.0.1,100,reachable,ModelX,1.0,cedge\n\
         u2,r2,10.0.0.2,200,down,ModelY,2.0,cisco-router\n"
    );
}

#[test]
fn test_inventory_reachable() {
    let tmp = backup();
    inventory(tmp.path())
        .args(["--reachable", "-o", "plain"])
        .assert()
        .success()
        .stdout("u1\n");
}

#[test]
fn test_inventory_site_json() {
    let tmp = backup();
    let output = inventory(tmp.path())
        .args(["--site", "200", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let devices: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.as_array().unwrap().len(), 1);
    assert_eq!(devices[0]["uuid"], "u2");
    assert_eq!(devices[0]["device_type"], "cisco-router");
}

#[test]
fn test_inventory_regex_and_not_regex() {
    let tmp = backup();
    inventory(tmp.path())
        .args(["--regex", "^r1$", "-o", "plain"])
        .assert()
        .success()
        .stdout("u1\n");
    inventory(tmp.path())
        .args(["--not-regex", "^r1$", "-o", "plain"])
        .assert()
        .success()
        .stdout("u2\n");
}

#[test]
fn test_inventory_device_type_uses_derived_type() {
    let tmp = backup();
    inventory(tmp.path())
        .args(["--device-type", "cedge", "-o", "plain"])
        .assert()
        .success()
        .stdout("u1\n");
}

#[test]
fn test_inventory_table_has_headers() {
    let tmp = backup();
    inventory(tmp.path()).assert().success().stdout(
        predicate::str::contains("System IP")
            .and(predicate::str::contains("r1"))
            .and(predicate::str::contains("cisco-router")),
    );
}

#[test]
fn test_inventory_save_csv_and_json() {
    let tmp = backup();
    let csv_path = tmp.path().join("out.csv");
    let json_path = tmp.path().join("out.json");

    inventory(tmp.path())
        .args(["--reachable", "-q", "--save-csv"])
        .arg(&csv_path)
        .arg("--save-json")
        .arg(&json_path)
        .assert()
        .success()
        .stdout("");

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        csv,
        "uuid,name,system_ip,site_id,state,model,version,device_type\n\
         u1,r1,10.0.0.1,100,reachable,ModelX,1.0,cedge\n"
    );
    let json: Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json[0]["name"], "r1");
}

// ── Validation ──────────────────────────────────────────────────────

#[test]
fn test_regex_and_not_regex_together_is_rejected() {
    let tmp = backup();
    inventory(tmp.path())
        .args(["--regex", "^r1$", "--not-regex", "^r2$"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("regex"));
}

#[test]
fn test_invalid_regex() {
    let tmp = backup();
    inventory(tmp.path())
        .args(["--regex", "r1("])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("regex"));
}

#[test]
fn test_invalid_site_and_system_ip() {
    let tmp = backup();
    inventory(tmp.path())
        .args(["--site", "4294967296"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("site"));
    inventory(tmp.path())
        .args(["--system-ip", "10.0.0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("system_ip"));
}

#[test]
fn test_validation_happens_before_reading_backup() {
    let tmp = tempfile::tempdir().unwrap();
    inventory(&tmp.path().join("does-not-exist"))
        .args(["--site", "abc"])
        .assert()
        .code(2);
}

#[test]
fn test_validation_precedes_credential_lookup() {
    // No password anywhere: resolving the controller would fail with exit 3.
    vinv_cmd()
        .args(["-a", "198.18.1.10", "-u", "admin", "inventory"])
        .args(["--regex", "a", "--not-regex", "b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("regex"));
}

#[test]
fn test_validation_precedes_source_resolution() {
    vinv_cmd()
        .args(["inventory", "--site", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("site"));
    vinv_cmd()
        .args(["certificate", "--regex", "r1("])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("regex"));
}

// ── Data source errors ──────────────────────────────────────────────

#[test]
fn test_missing_backup_files_exit_4() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("inventory")).unwrap();
    inventory(tmp.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("device_models.json"));
}

#[test]
fn test_no_source_configured() {
    let output = vinv_cmd().arg("inventory").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("--workdir"), "Expected source hint in output:\n{text}");
}

// ── Certificates ────────────────────────────────────────────────────

#[test]
fn test_certificate_matches_chassis() {
    let tmp = backup();
    vinv_cmd()
        .arg("--workdir")
        .arg(tmp.path())
        .args(["certificate", "--regex", "BBB", "-o", "plain"])
        .assert()
        .success()
        .stdout("C8K-BBB\n");
}

#[test]
fn test_certificate_csv() {
    let tmp = backup();
    vinv_cmd()
        .arg("--workdir")
        .arg(tmp.path())
        .args(["certificate", "-o", "csv"])
        .assert()
        .success()
        .stdout(
            "hostname,chassis,serial,state,status\n\
             r1,C8K-AAA,01,certinstalled,valid\n\
             -,C8K-BBB,02,tokengenerated,valid\n",
        );
}

// ── Config file ─────────────────────────────────────────────────────

const LAB_CONFIG: &str = "\
default_profile = \"lab\"

[profiles.lab]
address = \"198.18.1.10\"

[profiles.prod]
address = \"10.10.10.10\"
";

#[test]
fn test_config_set_keeps_other_profiles() {
    let home = tempfile::tempdir().unwrap();
    let path = write_config(home.path(), LAB_CONFIG);

    vinv_cmd_in(home.path())
        .args(["config", "set", "tenant", "acme"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("[profiles.prod]"), "{saved}");
    assert!(saved.contains("tenant = \"acme\""), "{saved}");
}

#[test]
fn test_malformed_config_is_not_overwritten() {
    let home = tempfile::tempdir().unwrap();
    let malformed = format!("{LAB_CONFIG}bogus_line\n");
    let path = write_config(home.path(), &malformed);

    vinv_cmd_in(home.path())
        .args(["config", "set", "tenant", "acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
    vinv_cmd_in(home.path())
        .args(["config", "use", "prod"])
        .assert()
        .code(1);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), malformed);
}
