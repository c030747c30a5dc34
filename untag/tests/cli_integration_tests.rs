// untag/tests/cli_integration_tests.rs
//! Command-line integration tests for the `untag` binary.
//!
//! Each test spawns the compiled binary with `assert_cmd`, feeds it markup on
//! stdin or through a temporary file, and checks stdout/stderr. Environment
//! variables that could leak a developer's own settings into the run
//! (`UNTAG_CONFIG`, `RUST_LOG`) are removed first. stderr may be coloured, so
//! assertions on it go through `strip_ansi`.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

fn untag() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("untag"));
    cmd.env_remove("UNTAG_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_untag(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = untag();
    cmd.args(args);
    cmd.write_stdin(input.as_bytes());
    cmd.assert()
}

fn strip_ansi(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(bytes)).to_string()
}

#[test]
fn test_basic_sanitization() {
    run_untag("<p>Hello <b>World</b></p>", &["sanitize", "--no-summary"])
        .success()
        .stdout(predicate::str::diff("Hello World\n"));
}

#[test]
fn test_plain_text_passes_through() {
    run_untag("just some words", &["sanitize", "--no-summary"])
        .success()
        .stdout(predicate::str::diff("just some words\n"));
}

#[test]
fn test_text_without_tags_keeps_angle_brackets_and_entities() {
    run_untag("if x <y then &amp;", &["sanitize", "--no-summary"])
        .success()
        .stdout(predicate::str::diff("if x <y then &amp;\n"));
}

#[test]
fn test_empty_input_prints_empty_line() {
    run_untag("", &["sanitize", "--no-summary"])
        .success()
        .stdout(predicate::str::diff("\n"));
}

#[test]
fn test_auto_engine_decodes_entities() {
    run_untag("<p>Fish &amp; Chips</p>", &["sanitize", "--no-summary"])
        .success()
        .stdout(predicate::str::diff("Fish & Chips\n"));
}

#[test]
fn test_pattern_engine_keeps_entities() {
    run_untag("<p>Fish &amp; Chips</p>", &["sanitize", "--no-summary", "--engine", "pattern"])
        .success()
        .stdout(predicate::str::diff("Fish &amp; Chips\n"));
}

#[test]
fn test_unclosed_tag() {
    run_untag("<div>Test", &["sanitize", "--no-summary"])
        .success()
        .stdout(predicate::str::diff("Test\n"));
}

#[test]
fn test_summary_goes_to_stderr() {
    let assert = run_untag("<p>Hello</p>", &["sanitize"]).success();
    let output = assert.get_output();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello\n");
    let stderr = strip_ansi(&output.stderr);
    assert!(stderr.contains("Sanitization Summary:"), "stderr: {}", stderr);
    assert!(stderr.contains("Structural"), "stderr: {}", stderr);
    assert!(stderr.contains("Tags removed"), "stderr: {}", stderr);
}

#[test]
fn test_quiet_suppresses_stderr() {
    run_untag("<p>Hello</p>", &["--quiet", "sanitize"])
        .success()
        .stdout(predicate::str::diff("Hello\n"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_debug_flag_emits_logs() {
    let assert = run_untag("<p>Hello</p>", &["--debug", "sanitize", "--no-summary"]).success();
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("[INFO untag] untag started."), "stderr: {}", stderr);
    assert!(
        stderr.contains("[INFO untag::commands::sanitize] Starting sanitize operation."),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_input_and_output_files() -> Result<()> {
    let dir = tempdir()?;
    let input_path = dir.path().join("page.html");
    let output_path = dir.path().join("page.txt");
    fs::write(&input_path, "<h1>Title</h1>\n<p>Body &lt;text&gt;</p>\n")?;

    untag()
        .args(["--quiet", "sanitize", "-i"])
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output_path)?, "Title\nBody <text>\n\n");
    Ok(())
}

#[test]
fn test_missing_input_file_fails() {
    untag()
        .args(["sanitize", "-i", "/definitely/not/here.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_diff_view() {
    let assert = run_untag("<p>Hello <b>World</b></p>", &["sanitize", "--diff", "--no-summary"]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("--- Diff View ---"), "stdout: {}", stdout);
    assert!(stdout.contains("- <p>Hello <b>World</b></p>"), "stdout: {}", stdout);
    assert!(stdout.contains("+ Hello World"), "stdout: {}", stdout);
}

#[test]
fn test_ignore_flag_drops_script_text() {
    run_untag(
        "<p>visible</p><script>hidden()</script>",
        &["sanitize", "--no-summary", "--ignore", "script"],
    )
    .success()
    .stdout(predicate::str::diff("visible\n"));
}

#[test]
fn test_collapse_and_trim_flags() {
    run_untag(
        "\n  <ul>\n    <li>one</li>\n    <li>two</li>\n  </ul>\n",
        &["sanitize", "--no-summary", "--collapse-whitespace", "--trim"],
    )
    .success()
    .stdout(predicate::str::diff("one two\n"));
}

#[test]
fn test_config_file_selects_pattern_engine() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("untag.yaml");
    fs::write(&config_path, "engine: pattern\n")?;

    untag()
        .args(["sanitize", "--no-summary", "--config"])
        .arg(&config_path)
        .write_stdin("<i>a &amp; b</i>")
        .assert()
        .success()
        .stdout(predicate::str::diff("a &amp; b\n"));

    // The command-line flag wins over the file.
    untag()
        .args(["sanitize", "--no-summary", "--engine", "auto", "--config"])
        .arg(&config_path)
        .write_stdin("<i>a &amp; b</i>")
        .assert()
        .success()
        .stdout(predicate::str::diff("a & b\n"));
    Ok(())
}

#[test]
fn test_config_from_environment_variable() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("untag.yaml");
    fs::write(&config_path, "post_processing:\n  trim: true\n")?;

    untag()
        .env("UNTAG_CONFIG", &config_path)
        .args(["sanitize", "--no-summary"])
        .write_stdin("   <b>padded</b>   ")
        .assert()
        .success()
        .stdout(predicate::str::diff("padded\n"));
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("bad.yaml");
    fs::write(&config_path, "max_structural_bytes: 0\n")?;

    untag()
        .args(["sanitize", "--config"])
        .arg(&config_path)
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_structural_bytes"));
    Ok(())
}

#[test]
fn test_invalid_theme_fails() -> Result<()> {
    let dir = tempdir()?;
    let theme_path = dir.path().join("theme.yaml");
    fs::write(&theme_path, "info:\n  fg: octarine\n")?;

    untag()
        .arg("--theme")
        .arg(&theme_path)
        .args(["sanitize", "--no-summary"])
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown color 'octarine'"));
    Ok(())
}

#[test]
fn test_no_arguments_prints_help() {
    untag()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
