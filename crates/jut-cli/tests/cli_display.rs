//! Rendering local notebooks end to end.

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// `jut` with an isolated JUT_HOME, a fixed width and no colors.
fn jut(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("jut");
    cmd.env("JUT_HOME", home.path())
        .env_remove("JUT_LOG")
        .env_remove("RUST_LOG")
        .args(["--width", "80"]);
    cmd
}

fn sample() -> String {
    fixture("sample.ipynb").display().to_string()
}

#[test]
fn test_default_shows_first_ten_cells() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .arg(sample())
        .assert()
        .success()
        .stdout(predicate::str::contains("In [1]:"))
        .stdout(predicate::str::contains("In [10]:"))
        .stdout(predicate::str::contains("In [11]:").not());
}

#[test]
fn test_head_limits_cells() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In [5]:"))
        .stdout(predicate::str::contains("In [6]:").not());
}

#[test]
fn test_tail_keeps_absolute_numbers() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--tail", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In [12]:"))
        .stdout(predicate::str::contains("value_12 = 12"))
        .stdout(predicate::str::contains("In [11]:").not());
}

#[test]
fn test_range_is_inclusive() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--start", "2", "--end", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In [1]:").not())
        .stdout(predicate::str::contains("In [2]:"))
        .stdout(predicate::str::contains("Out [2]:"))
        .stdout(predicate::str::contains("loaded"))
        .stdout(predicate::str::contains("Out [3]:"))
        .stdout(predicate::str::contains("42"))
        .stdout(predicate::str::contains("In [4]:").not());
}

#[test]
fn test_invalid_range_fails() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--start", "10", "--end", "3"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn test_zero_head_fails() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--head"));
}

#[test]
fn test_full_display_shows_everything() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--full-display"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales report"))
        .stdout(predicate::str::contains("raw cell body"))
        .stdout(predicate::str::contains("In [12]:"));
}

#[test]
fn test_images_render_as_placeholder() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "-s", "4", "-e", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Out [4]:"))
        .stdout(predicate::str::contains("Not rendering png"))
        .stdout(predicate::str::contains("iVBORw0KGgo").not());
}

#[test]
fn test_exclude_output_cells() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "3", "--exclude-output-cells"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In [3]:"))
        .stdout(predicate::str::contains("Out [").not());
}

#[test]
fn test_borders_can_be_disabled() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("╭"));

    jut(&home)
        .args([sample().as_str(), "--head", "2", "--no-cell-border"])
        .assert()
        .success()
        .stdout(predicate::str::contains("╭").not());
}

#[test]
fn test_output_is_plain_when_piped() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_force_colors_emits_escapes() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "2", "--force-colors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}["));
}

#[test]
fn test_reads_stdin() {
    let home = TempDir::new().unwrap();
    let json = std::fs::read_to_string(fixture("sample.ipynb")).unwrap();

    jut(&home)
        .args(["-", "--tail", "2"])
        .write_stdin(json)
        .assert()
        .success()
        .stdout(predicate::str::contains("In [11]:"))
        .stdout(predicate::str::contains("In [12]:"));
}

#[test]
fn test_missing_file_fails() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .arg("does-not-exist.ipynb")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist.ipynb"));
}

#[test]
fn test_non_notebook_fails() {
    let home = TempDir::new().unwrap();

    jut(&home)
        .arg(fixture("not_a_notebook.ipynb"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not a proper notebook"));
}

#[test]
fn test_config_default_head() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.toml"), "default_head = 2\n").unwrap();

    jut(&home)
        .arg(sample())
        .assert()
        .success()
        .stdout(predicate::str::contains("In [2]:"))
        .stdout(predicate::str::contains("In [3]:").not());
}

#[test]
fn test_disabled_default_head_requires_a_flag() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.toml"), "default_head = 0\n").unwrap();

    jut(&home)
        .arg(sample())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no selection mode"));
}

#[test]
fn test_broken_config_fails() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.toml"), "cell_border = \"maybe\"\n").unwrap();

    jut(&home)
        .arg(sample())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config.toml"));
}

#[cfg(unix)]
#[test]
fn test_single_page_uses_configured_pager() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.toml"), "pager = \"cat\"\n").unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "1", "--single-page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In [1]:"));
}

#[test]
fn test_single_page_falls_back_without_pager() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "pager = \"jut-no-such-pager\"\n",
    )
    .unwrap();

    jut(&home)
        .args([sample().as_str(), "--head", "1", "-p"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In [1]:"))
        .stderr(predicate::str::contains("pager unavailable"));
}
