//! CLI smoke tests for the foodgram-server binary.

use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_foodgram_server(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_foodgram-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute foodgram-server")
}

/// Config rooted in a temp dir so runs never touch the real home directory.
fn write_config(dir: &TempDir, extra: &str) -> String {
    let home = dir.path().join("home");
    let path = dir.path().join("config.yaml");
    let yaml = format!(
        "server:\n  home_dir: \"{}\"\n  host: \"127.0.0.1\"\n  port: 8087\n  timeout_sec: 10\n\
         database:\n  url: \"sqlite://data/foodgram.db\"\n{extra}",
        home.display().to_string().replace('\\', "/")
    );
    std::fs::write(&path, yaml).expect("Failed to write config");
    path.to_string_lossy().into_owned()
}

#[test]
fn help_lists_subcommands() {
    let output = run_foodgram_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    for sub in ["run", "check", "import-ingredients", "add-tag", "add-user"] {
        assert!(stdout.contains(sub), "help should mention '{sub}'");
    }
    assert!(stdout.contains("--config"));
}

#[test]
fn version_is_printed() {
    let output = run_foodgram_server(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("foodgram-server"));
}

#[test]
fn unknown_subcommand_fails() {
    let output = run_foodgram_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn missing_config_file_fails_check() {
    let output = run_foodgram_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config"), "unexpected stderr: {stderr}");
}

#[test]
fn check_accepts_valid_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "");

    let output = run_foodgram_server(&["--config", &config, "check"]);

    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("port: 8087"));
}

#[test]
fn check_rejects_bad_module_section() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "modules:\n  recipes:\n    page_size: 3\n");

    let output = run_foodgram_server(&["--config", &config, "check"]);

    assert!(!output.status.success(), "unknown recipes keys should fail");
}

#[test]
fn print_config_applies_port_override() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "");

    let output = run_foodgram_server(&["--config", &config, "--port", "9191", "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9191"));
}

#[test]
fn management_commands_write_to_the_database() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(&dir, "");
    let csv = dir.path().join("ingredients.csv");
    std::fs::write(&csv, "flour,g\nmilk,ml\n").expect("Failed to write csv");

    let output = run_foodgram_server(&[
        "--config",
        &config,
        "import-ingredients",
        csv.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "import failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Imported 2 ingredients"));

    let output = run_foodgram_server(&[
        "--config",
        &config,
        "add-tag",
        "--name",
        "Breakfast",
        "--color",
        "#E26C2D",
        "--slug",
        "breakfast",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(breakfast)"));

    // Same slug again is a conflict.
    let output = run_foodgram_server(&[
        "--config",
        &config,
        "add-tag",
        "--name",
        "Morning",
        "--color",
        "#000000",
        "--slug",
        "breakfast",
    ]);
    assert!(!output.status.success());

    let output = run_foodgram_server(&[
        "--config",
        &config,
        "add-user",
        "--email",
        "chef@example.com",
        "--username",
        "chef",
        "--first-name",
        "Julia",
        "--last-name",
        "Child",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(chef)"));
}
