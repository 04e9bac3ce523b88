//! Exit status and fatal error reporting

use super::{run_vecscan, stderr, stdout};
use crate::common::fixtures::example_tree;
use tempfile::TempDir;

#[test]
fn test_missing_root_exits_one() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nowhere");

    let output = run_vecscan(home.path(), &[missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let log = stderr(&output);
    assert!(log.contains("FATAL: Invalid scan root"), "stderr: {log}");
    assert!(log.contains("path does not exist"), "stderr: {log}");
    assert!(log.contains("HINT:"), "stderr: {log}");
}

#[test]
fn test_file_root_exits_one() {
    let tree = example_tree();
    let home = TempDir::new().unwrap();
    let file = tree.path().join("a.txt");

    let output = run_vecscan(home.path(), &[file.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("path is not a directory"));
}

#[test]
fn test_missing_config_file_exits_one() {
    let tree = example_tree();
    let home = TempDir::new().unwrap();
    let config = home.path().join("missing.toml");

    let output = run_vecscan(
        home.path(),
        &[
            "--config-file",
            config.to_str().unwrap(),
            tree.path().to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn test_usage_error_exits_two() {
    let home = TempDir::new().unwrap();

    let output = run_vecscan(home.path(), &["--max-depth", "lots"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();

    let output = run_vecscan(home.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_matches_is_success() {
    let home = TempDir::new().unwrap();
    let tree = TempDir::new().unwrap();
    std::fs::write(tree.path().join("plain.txt"), "vector3(1,2)\n").unwrap();

    let output = run_vecscan(home.path(), &[tree.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}
