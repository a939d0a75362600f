//! Integration tests for CLI commands.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "docforge", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

fn json_files(dir: &Path) -> Vec<std::path::PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

#[test]
fn test_gen_writes_documents_and_ground_truth() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let out_str = out.to_string_lossy().to_string();

    let (success, stdout, _) = run_cli(&[
        "gen",
        "--invoices",
        "2",
        "--statements",
        "1",
        "--seed",
        "7",
        "--as-of",
        "2024-06-01",
        "--out",
        &out_str,
    ]);
    assert!(success);
    assert!(stdout.contains("DOCUMENT_ID"));
    assert!(stdout.contains("Generated 3 document(s), 0 failure(s)"));

    assert_eq!(json_files(&out.join("invoices")).len(), 2);
    assert_eq!(json_files(&out.join("bank_statements")).len(), 1);
    assert!(out.join("invoices_ground_truth.csv").exists());
    assert!(out.join("invoices_summary.csv").exists());
    assert!(out.join("bank_statements_ground_truth.csv").exists());
    assert!(out.join("bank_statements_summary.csv").exists());

    // Everything the generator wrote re-verifies cleanly.
    let (success, stdout, _) = run_cli(&["verify", &out_str, "--strict"]);
    assert!(success);
    assert!(stdout.contains("3 document(s) checked, 0 defective"));
}

#[test]
fn test_gen_rejects_an_empty_request() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");

    let (success, _, stderr) = run_cli(&["gen", "--out", &out.to_string_lossy()]);
    assert!(!success);
    assert!(stderr.contains("invalid configuration"));
}

#[test]
fn test_gen_with_same_seed_is_reproducible() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");

    for out in [&first, &second] {
        let (success, _, _) = run_cli(&[
            "gen",
            "--receipts",
            "3",
            "--seed",
            "99",
            "--as-of",
            "2024-06-01",
            "--out",
            &out.to_string_lossy(),
        ]);
        assert!(success);
    }

    let first_csv = fs::read(first.join("receipts_ground_truth.csv")).unwrap();
    let second_csv = fs::read(second.join("receipts_ground_truth.csv")).unwrap();
    assert_eq!(first_csv, second_csv);
}

#[test]
fn test_verify_flags_a_tampered_document() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let out_str = out.to_string_lossy().to_string();

    let (success, _, _) = run_cli(&[
        "gen",
        "--invoices",
        "1",
        "--seed",
        "4",
        "--as-of",
        "2024-06-01",
        "--out",
        &out_str,
    ]);
    assert!(success);

    let path = json_files(&out.join("invoices")).remove(0);
    let mut value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    value["totals"]["total"] = serde_json::Value::String("999999.99".to_string());
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();

    let (success, stdout, _) = run_cli(&["verify", &out_str, "--strict"]);
    assert!(!success);
    assert!(stdout.contains("DEFECT"));

    // Without --strict the command still succeeds but reports the defect.
    let (success, stdout, _) = run_cli(&["verify", &out_str]);
    assert!(success);
    assert!(stdout.contains("1 defective"));
}

#[test]
fn test_verify_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let out_str = out.to_string_lossy().to_string();

    let (success, _, _) = run_cli(&[
        "gen",
        "--statements",
        "1",
        "--seed",
        "12",
        "--as-of",
        "2024-06-01",
        "--out",
        &out_str,
    ]);
    assert!(success);

    let (success, stdout, _) = run_cli(&["verify", &out_str, "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["ok"], serde_json::Value::Bool(true));
    assert_eq!(entries[0]["doc_type"], "bank_statement");
}
