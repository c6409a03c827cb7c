use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn inkvoice(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("inkvoice").unwrap();
    // Keep a developer's own config file out of the picture.
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn world_famous_dump() -> serde_json::Value {
    json!([
        {
            "index": 1,
            "fragments": [
                { "text": "Sales Order SO-1042", "x": 10.0, "y": 760.0 },
                { "text": "$92.50", "x": 500.0, "y": 700.0 },
                { "text": "0", "x": 10.0, "y": 700.0 },
                { "text": "0", "x": 40.0, "y": 700.0 },
                { "text": "10", "x": 70.0, "y": 700.0 },
                { "text": "$9.25", "x": 420.0, "y": 700.0 },
                { "text": "KSG6", "x": 10.0, "y": 688.0 },
                { "text": "Kuro Sumi Greywash", "x": 10.0, "y": 676.0 }
            ]
        },
        {
            "index": 2,
            "fragments": [
                { "text": "0 0 2 $9.25 $18.50", "x": 10.0, "y": 700.0 },
                { "text": "WFBB2", "x": 10.0, "y": 688.0 },
                { "text": "World Famous Tattoo Ink - Blue Black", "x": 10.0, "y": 676.0 },
                { "text": "Page 2 of 2", "x": 10.0, "y": 20.0 }
            ]
        }
    ])
}

fn write_dump(dir: &Path, name: &str, dump: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(dump).unwrap()).unwrap();
    path
}

#[test]
fn test_parse_json_output() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());

    let output = inkvoice(dir.path())
        .args(["parse", "--vendor", "worldFamous"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        items,
        json!([
            { "itemCode": "KSG6", "color": "Kuro Sumi Greywash", "size": "6oz", "quantity": 10 },
            { "itemCode": "WFBB2", "color": "Blue Black", "size": "2oz", "quantity": 2 }
        ])
    );
}

#[test]
fn test_parse_json_with_diagnostics() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());

    let output = inkvoice(dir.path())
        .args(["parse", "--vendor", "world-famous", "--diagnostics"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["vendor"], "worldFamous");
    assert_eq!(outcome["pageCount"], 2);
    assert_eq!(outcome["items"].as_array().unwrap().len(), 2);
    assert_eq!(outcome["diagnostics"][0]["reason"], "boilerplate");
}

#[test]
fn test_parse_csv_output() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());

    inkvoice(dir.path())
        .args(["parse", "--vendor", "worldFamous", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(
            "itemCode,color,size,quantity\n\
             KSG6,Kuro Sumi Greywash,6oz,10\n\
             WFBB2,Blue Black,2oz,2\n",
        );
}

#[test]
fn test_parse_text_output_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());
    let out = dir.path().join("order.txt");

    inkvoice(dir.path())
        .args(["parse", "--vendor", "worldFamous", "-f", "text", "-o"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("Vendor: World Famous\n"));
    assert!(text.contains("Items: 2 (12 units, 2 pages)"));
    assert!(text.contains("Kuro Sumi Greywash (6oz)"));
}

#[test]
fn test_unsupported_vendor_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());

    inkvoice(dir.path())
        .args(["parse", "--vendor", "dynamic"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported vendor: dynamic"));
}

#[test]
fn test_wrong_vendor_finds_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());

    inkvoice(dir.path())
        .args(["parse", "--vendor", "solidInk"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no items could be parsed from the solidInk invoice",
        ));
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();

    inkvoice(dir.path())
        .args(["parse", "--vendor", "eternal", "nope.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_lines_output() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());

    inkvoice(dir.path())
        .args(["lines", "--vendor", "worldFamous"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("1:760 Sales Order SO-1042"))
        .stdout(predicate::str::contains("0 0 10 $9.25 $92.50"))
        .stdout(predicate::str::contains("2:20 Page 2 of 2"));
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();

    write_dump(&inbox, "first.json", &world_famous_dump());
    write_dump(&inbox, "second.json", &json!([{ "index": 1, "fragments": [] }]));
    fs::write(inbox.join("notes.txt"), "not an invoice").unwrap();

    let pattern = format!("{}/*", inbox.display());
    inkvoice(dir.path())
        .args(["batch", "--vendor", "worldFamous", "--summary", "--continue-on-error"])
        .arg("--output-dir")
        .arg(&out)
        .arg(&pattern)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("Failed files:"));

    assert!(out.join("first.json").exists());
    assert!(!out.join("second.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let mut rows = summary.lines();
    assert_eq!(
        rows.next(),
        Some("filename,status,items,units,skipped_lines,processing_time_ms,error")
    );
    assert!(summary.contains("first.json,success,2,12,2,"));
    assert!(summary.contains("second.json,error,,,,,no items could be parsed"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    write_dump(dir.path(), "empty.json", &json!([{ "index": 1, "fragments": [] }]));

    let pattern = format!("{}/*.json", dir.path().display());
    inkvoice(dir.path())
        .args(["batch", "--vendor", "eternal"])
        .arg(&pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed"));
}

#[test]
fn test_config_lifecycle() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("inkvoice.json");

    inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.lookahead_lines", "5"])
        .assert()
        .success();

    inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.lookahead_lines"])
        .assert()
        .success()
        .stdout("5\n");

    inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "extraction.lookahead_lines", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_drives_parsing() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("inkvoice.json");
    fs::write(&config, r#"{"extraction":{"collect_diagnostics":false}}"#).unwrap();
    let input = write_dump(dir.path(), "order.json", &world_famous_dump());

    let output = inkvoice(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["parse", "--vendor", "worldFamous", "--diagnostics"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["diagnostics"], json!([]));
}
