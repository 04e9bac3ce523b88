//! Directory tree fixtures

use std::path::Path;
use tempfile::TempDir;

/// Create a temporary tree from `(relative path, contents)` pairs
pub fn create_tree(files: &[(&str, &[u8])]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (relative, contents) in files {
        write_file(dir.path(), relative, contents);
    }
    dir
}

pub fn write_file(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, contents).expect("write fixture file");
}

/// `a.txt` with a literal on line 2 and `sub/b.txt` with one on line 1
pub fn example_tree() -> TempDir {
    create_tree(&[
        ("a.txt", b"foo\npos = vector3(1.0, -2.5, 0)\n"),
        ("sub/b.txt", b"vector4(1,1,1,1) end\n"),
    ])
}

/// Many files, each full of matching lines
pub fn large_tree(files: usize, lines_per_file: usize) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let body = "spawn(vector3(1, 2, 3))\n".repeat(lines_per_file);
    for i in 0..files {
        write_file(
            dir.path(),
            &format!("d{:02}/f{:04}.lua", i % 10, i),
            body.as_bytes(),
        );
    }
    dir
}
