//! Full scans over small trees

use crate::common::fixtures::{create_tree, example_tree};
use crate::common::scanner_helpers::{collect_messages, relative, relative_matches};
use futures::StreamExt;
use std::collections::HashSet;
use std::path::PathBuf;
use vecscan::scanner::api::{
    InvalidRootReason, ScanError, ScanMessage, ScanRequest, Scanner, ScannerConfig,
};

#[tokio::test]
async fn test_documented_example() {
    let dir = example_tree();

    let (messages, stats) = collect_messages(&Scanner::new(), dir.path()).await;

    assert_eq!(messages.len(), 3);
    assert_eq!(
        relative_matches(dir.path(), &messages),
        vec![
            (
                PathBuf::from("a.txt"),
                2,
                "pos = vector3(1.0, -2.5, 0)".to_string()
            ),
            (
                PathBuf::from("sub").join("b.txt"),
                1,
                "vector4(1,1,1,1) end".to_string()
            ),
        ]
    );
    assert_eq!(messages[2], ScanMessage::Completed);
    assert_eq!(stats.files_scanned, 2);
    assert_eq!(stats.matches, 2);
    assert!(!stats.cancelled);
}

#[tokio::test]
async fn test_file_paths_are_joined_with_root() {
    let dir = example_tree();

    let (messages, _) = collect_messages(&Scanner::new(), dir.path()).await;

    match &messages[0] {
        ScanMessage::Match(event) => assert_eq!(event.file_path, dir.path().join("a.txt")),
        other => panic!("expected a match, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_scans_are_identical() {
    let dir = create_tree(&[
        ("m/z.lua", b"vector3(1,2,3)\nvector4(1,2,3,4)\n"),
        ("m/a.lua", b"nothing\n  vector3(0, 0, 0)  \n"),
        ("b.txt", b"vector3(-1.5,2,3)\n"),
        ("c/d/e.cfg", b"vector4( 1 , 2 , 3 , 4 )\n"),
    ]);
    let scanner = Scanner::new();

    let (first, _) = collect_messages(&scanner, dir.path()).await;
    let (second, _) = collect_messages(&scanner, dir.path()).await;

    assert_eq!(first, second);
    assert_eq!(relative_matches(dir.path(), &first).len(), 5);
}

#[tokio::test]
async fn test_unsorted_scan_yields_same_multiset() {
    let dir = create_tree(&[
        ("q.txt", b"vector3(1,2,3)\n"),
        ("a/b.txt", b"vector3(4,5,6)\n"),
        ("k/l/m.txt", b"x\nvector4(1,1,1,1)\n"),
    ]);

    let (sorted, _) = collect_messages(&Scanner::new(), dir.path()).await;
    let unsorted_scanner = Scanner::with_config(ScannerConfig {
        sort_entries: false,
        ..Default::default()
    });
    let (unsorted, _) = collect_messages(&unsorted_scanner, dir.path()).await;

    let sorted: HashSet<_> = relative_matches(dir.path(), &sorted).into_iter().collect();
    let unsorted: HashSet<_> = relative_matches(dir.path(), &unsorted)
        .into_iter()
        .collect();
    assert_eq!(sorted, unsorted);
    assert_eq!(sorted.len(), 3);
}

#[tokio::test]
async fn test_sorted_order_across_directories() {
    let dir = create_tree(&[
        ("b.txt", b"vector3(2,2,2)\n"),
        ("a/z.txt", b"vector3(1,1,1)\n"),
        ("c.txt", b"vector3(3,3,3)\n"),
    ]);

    let (messages, _) = collect_messages(&Scanner::new(), dir.path()).await;
    let paths: Vec<PathBuf> = relative_matches(dir.path(), &messages)
        .into_iter()
        .map(|(path, _, _)| path)
        .collect();

    assert_eq!(
        paths,
        vec![
            PathBuf::from("a").join("z.txt"),
            PathBuf::from("b.txt"),
            PathBuf::from("c.txt"),
        ]
    );
}

#[tokio::test]
async fn test_max_depth_limits_descent() {
    let dir = create_tree(&[
        ("top.txt", b"vector3(1,2,3)\n"),
        ("one/mid.txt", b"vector3(1,2,3)\n"),
        ("one/two/deep.txt", b"vector3(1,2,3)\n"),
    ]);
    let scanner = Scanner::with_config(ScannerConfig {
        max_depth: Some(2),
        ..Default::default()
    });

    let (messages, stats) = collect_messages(&scanner, dir.path()).await;

    assert_eq!(relative_matches(dir.path(), &messages).len(), 2);
    assert_eq!(stats.files_scanned, 2);
}

#[tokio::test]
async fn test_stream_and_callback_delivery_agree() {
    let dir = example_tree();
    let scanner = Scanner::new();

    let streamed: Vec<ScanMessage> = scanner
        .scan(ScanRequest::new(dir.path()))
        .unwrap()
        .into_stream()
        .collect()
        .await;

    let mut delivered = Vec::new();
    let stats = scanner
        .scan(ScanRequest::new(dir.path()))
        .unwrap()
        .for_each_match(|event| delivered.push(event))
        .await
        .unwrap();

    assert_eq!(streamed.last(), Some(&ScanMessage::Completed));
    let streamed_matches: Vec<_> = streamed
        .into_iter()
        .filter_map(|m| match m {
            ScanMessage::Match(event) => Some(event),
            _ => None,
        })
        .collect();
    assert_eq!(streamed_matches, delivered);
    assert_eq!(stats.matches, 2);
    assert_eq!(
        relative(dir.path(), &delivered[1]).0,
        PathBuf::from("sub").join("b.txt")
    );
}

#[tokio::test]
async fn test_empty_root_completes_without_matches() {
    let dir = create_tree(&[]);

    let (messages, stats) = collect_messages(&Scanner::new(), dir.path()).await;

    assert_eq!(messages, vec![ScanMessage::Completed]);
    assert_eq!(stats.files_scanned, 0);
}

#[tokio::test]
async fn test_missing_root_is_rejected() {
    let dir = create_tree(&[]);
    let missing = dir.path().join("does-not-exist");

    let err = Scanner::new()
        .scan(ScanRequest::new(&missing))
        .unwrap_err();

    assert_eq!(
        err,
        ScanError::InvalidRoot {
            path: missing,
            reason: InvalidRootReason::NotFound
        }
    );
}

#[tokio::test]
async fn test_file_root_is_rejected() {
    let dir = example_tree();
    let file = dir.path().join("a.txt");

    let err = Scanner::new().scan(ScanRequest::new(&file)).unwrap_err();

    assert!(matches!(
        err,
        ScanError::InvalidRoot {
            reason: InvalidRootReason::NotADirectory,
            ..
        }
    ));
}
