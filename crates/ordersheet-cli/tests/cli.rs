use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SHEET: &str = "Box of crackers 150rb
- [x] Alice +62 811-2222-3333
- [ ] Bob 0812-1111-2222
- [x] Carol (+3 box) 0813-4444-5555 (urgent)
";

/// The binary with an empty per-user config location.
fn ordersheet() -> Command {
    let mut cmd = Command::cargo_bin("ordersheet").unwrap();
    cmd.env(
        "XDG_CONFIG_HOME",
        std::env::temp_dir().join("ordersheet-cli-tests-no-config"),
    );
    cmd
}

#[test]
fn parse_prints_json_model() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("orders.txt");
    fs::write(&input, SHEET).unwrap();

    let output = ordersheet().arg("parse").arg(&input).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sheet"]["items"][0]["name"], "Box of crackers");
    assert_eq!(value["sheet"]["items"][0]["price"], 150000);
    assert_eq!(value["sheet"]["items"][0]["purchases"][1]["quantity"], 3);
    assert_eq!(value["sheet"]["items"][0]["purchases"][1]["notes"], "(urgent)");
    assert_eq!(value["sheet"]["customers"].as_object().unwrap().len(), 2);
}

#[test]
fn parse_csv_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("orders.txt");
    let output = dir.path().join("orders.csv");
    fs::write(&input, SHEET).unwrap();

    ordersheet()
        .args(["parse", "--format", "csv", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.contains("Box of crackers,150000,Carol,+62 813-4444-5555,3,(urgent),450000"));
    assert!(!csv.contains("Bob"));
}

#[test]
fn parse_missing_input_fails() {
    ordersheet()
        .args(["parse", "/nonexistent/orders.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn report_billing_text() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("orders.txt");
    fs::write(&input, SHEET).unwrap();

    ordersheet()
        .arg("report")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice (+62 811-2222-3333)"))
        .stdout(predicate::str::contains("Box of crackers (urgent)"))
        .stdout(predicate::str::contains("2 customers, grand total 600000"));
}

#[test]
fn report_top_spenders_json_respects_limit() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("orders.txt");
    fs::write(&input, SHEET).unwrap();

    let output = ordersheet()
        .args(["report", "--kind", "top-spenders", "--format", "json", "--limit", "1"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ranked = value.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["customer"]["name"], "Carol");
    assert_eq!(ranked[0]["total"], 450000);
}

#[test]
fn config_file_changes_skip_marker() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("orders.txt");
    let config = dir.path().join("config.json");
    fs::write(&input, "Teh 20rb\n- [x] Ani\nSTOP\nKopi 35rb\n- [x] Budi\n").unwrap();
    fs::write(&config, r#"{"parser": {"skip_marker": "STOP"}}"#).unwrap();

    let output = ordersheet()
        .arg("--config")
        .arg(&config)
        .arg("parse")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["sheet"]["items"].as_array().unwrap().len(), 1);
}

#[cfg(target_os = "linux")]
#[test]
fn user_config_applies_without_config_flag() {
    let dir = tempdir().unwrap();
    let config_home = dir.path().join("xdg");
    let input = dir.path().join("orders.txt");
    fs::write(&input, "Teh 20rb\n- [x] Ani\nSTOP\nKopi 30rb\n- [x] Budi\n").unwrap();

    ordersheet()
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["config", "set", "parser.skip_marker", "STOP"])
        .assert()
        .success();
    assert!(config_home.join("ordersheet").join("config.json").exists());

    let output = ordersheet()
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["report", "--kind", "revenue", "--format", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["items_sold"], 1);
    assert_eq!(value["total_revenue"], 20000);
}

#[test]
fn config_init_then_set_and_get() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");

    ordersheet()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    ordersheet()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "report.top_limit", "3"])
        .assert()
        .success();

    ordersheet()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "report.top_limit"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));

    ordersheet()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "report.top_limit", "0"])
        .assert()
        .failure();

    ordersheet()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), SHEET).unwrap();
    fs::write(dir.path().join("b.txt"), "Teh 20rb\n- [x] Ani\n").unwrap();
    fs::write(dir.path().join("c.txt"), b"Teh 20rb\n\xff\n").unwrap();
    fs::write(dir.path().join("ignored.pdf"), "not a sheet").unwrap();

    let pattern = format!("{}/*", dir.path().display());

    ordersheet()
        .args(["batch", &pattern, "--summary", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"))
        .stdout(predicate::str::contains("Failed files:"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("c.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("a.txt,success,1,2,2,600000,"));
    assert!(rows[2].starts_with("b.txt,success,1,1,1,20000,"));
    assert!(rows[3].starts_with("c.txt,error,"));
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), b"\xff\xfe\n").unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());

    ordersheet()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempdir().unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());

    ordersheet()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}
