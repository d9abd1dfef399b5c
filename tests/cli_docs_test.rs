use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_docs_command(storage: &Path, args: &[&str]) -> Output {
    Command::new("cargo")
        .arg("run")
        .arg("--")
        .arg("docs")
        .args(args)
        .env("CAROUSEL_STORAGE", storage)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_docs_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = temp_dir.path().join("documents.json");

    // First list synthesizes the default document
    let output = run_docs_command(&storage, &["list"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Untitled"), "Missing default document");

    // Add a document, then rename it
    let output = run_docs_command(&storage, &["add", "--name", "Launch deck"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let output = run_docs_command(&storage, &["list"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Launch deck"),
        "Renamed document missing from list: {}",
        stdout
    );
    assert_eq!(stdout.lines().count(), 2, "Expected two documents");

    // The new document became active
    let active_line = stdout
        .lines()
        .find(|l| l.starts_with('*'))
        .expect("No active marker in list");
    assert!(active_line.contains("Launch deck"));
}

#[test]
fn test_docs_show_prints_default_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let storage = temp_dir.path().join("documents.json");

    let output = run_docs_command(&storage, &["show"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("markdown to carousel"),
        "Default content missing: {}",
        stdout
    );
}
