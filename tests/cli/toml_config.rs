//! Configuration file handling of the binary

use super::{run_vecscan, stderr, stdout};
use crate::common::fixtures::{create_tree, example_tree};
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_explicit_config_applies() {
    let tree = example_tree();
    let home = TempDir::new().unwrap();
    let config = write_config(&home, "scan.toml", "[output]\nformat = \"json\"\n");

    let output = run_vecscan(
        home.path(),
        &["-c", config.to_str().unwrap(), tree.path().to_str().unwrap()],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with('{'));
    assert_eq!(stdout(&output).lines().count(), 2);
}

#[test]
fn test_cli_overrides_config() {
    let tree = example_tree();
    let home = TempDir::new().unwrap();
    let config = write_config(&home, "scan.toml", "[output]\nformat = \"json\"\n");

    let output = run_vecscan(
        home.path(),
        &[
            "-c",
            config.to_str().unwrap(),
            "--format",
            "text",
            tree.path().to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("pos = vector3(1.0, -2.5, 0)\n\n"));
    assert!(!stdout(&output).starts_with('{'));
}

// dirs resolves the config directory from XDG_CONFIG_HOME on Linux only
#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location_is_used() {
    let tree = create_tree(&[
        ("top.txt", b"vector3(1,2,3)\n"),
        ("a/b/deep.txt", b"vector3(4,5,6)\n"),
    ]);
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("Vecscan");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("vecscan.toml"), "[scanner]\nmax_depth = 1\n").unwrap();

    let output = run_vecscan(home.path(), &[tree.path().to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("top.txt:1"));
    assert!(!text.contains("deep.txt"));
}

#[test]
fn test_unknown_config_key_exits_one() {
    let tree = example_tree();
    let home = TempDir::new().unwrap();
    let config = write_config(&home, "bad.toml", "[scanner]\nrecursive = true\n");

    let output = run_vecscan(
        home.path(),
        &["-c", config.to_str().unwrap(), tree.path().to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let log = stderr(&output);
    assert!(log.contains("Cannot parse configuration file"), "stderr: {log}");
}
