use assert_fs::prelude::*;
use mirror_fs::{EntryKind, Error, io};
use predicates::prelude::*;
use std::fs;
use std::time::{Duration, SystemTime};

#[test]
fn test_copy_file_creates_destination() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("hello world").unwrap();
    let dst = temp.child("dst.txt");

    let bytes = io::copy_file(src.path(), dst.path()).unwrap();

    assert_eq!(bytes, 11);
    dst.assert("hello world");
}

#[test]
fn test_copy_file_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("updated").unwrap();
    let dst = temp.child("dst.txt");
    dst.write_str("original content that is longer").unwrap();

    io::copy_file(src.path(), dst.path()).unwrap();

    dst.assert("updated");
}

#[test]
fn test_copy_file_preserves_modification_time() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("content").unwrap();

    let past = SystemTime::now() - Duration::from_secs(86_400 * 30);
    let file = fs::OpenOptions::new().write(true).open(src.path()).unwrap();
    file.set_modified(past).unwrap();
    drop(file);

    let dst = temp.child("dst.txt");
    io::copy_file(src.path(), dst.path()).unwrap();

    let src_mtime = fs::metadata(src.path()).unwrap().modified().unwrap();
    let dst_mtime = fs::metadata(dst.path()).unwrap().modified().unwrap();
    assert_eq!(src_mtime, dst_mtime);
}

#[test]
fn test_copy_file_into_missing_directory_fails_with_path() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("x").unwrap();
    let dst = temp.child("missing/dst.txt");

    let err = io::copy_file(src.path(), dst.path()).unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, dst.path()),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_copy_file_onto_directory_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("item");
    src.write_str("x").unwrap();
    let dst = temp.child("dst/item");
    dst.create_dir_all().unwrap();

    assert!(io::copy_file(src.path(), dst.path()).is_err());
}

#[test]
fn test_remove_dir_all_deletes_subtree() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("tree/a/b/c.txt").write_str("deep").unwrap();
    temp.child("tree/d.txt").write_str("shallow").unwrap();

    io::remove_dir_all(&temp.path().join("tree")).unwrap();

    temp.child("tree").assert(predicate::path::missing());
}

#[test]
fn test_remove_file_deletes_single_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("keep.txt").write_str("k").unwrap();
    temp.child("drop.txt").write_str("d").unwrap();

    io::remove_file(&temp.path().join("drop.txt")).unwrap();

    temp.child("drop.txt").assert(predicate::path::missing());
    temp.child("keep.txt").assert(predicate::path::exists());
}

#[test]
fn test_create_dir_all_builds_ancestors() {
    let temp = assert_fs::TempDir::new().unwrap();
    let deep = temp.path().join("a/b/c");

    io::create_dir_all(&deep).unwrap();

    assert_eq!(io::probe(&deep).unwrap(), Some(EntryKind::Directory));
}

#[cfg(unix)]
#[test]
fn test_probe_no_follow_reports_symlink_as_other() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("target").create_dir_all().unwrap();
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(temp.path().join("target"), &link).unwrap();

    assert_eq!(io::probe(&link).unwrap(), Some(EntryKind::Directory));
    assert_eq!(io::probe_no_follow(&link).unwrap(), Some(EntryKind::Other));
}

#[cfg(unix)]
#[test]
fn test_probe_dangling_symlink_is_none() {
    let temp = assert_fs::TempDir::new().unwrap();
    let link = temp.path().join("dangling");
    std::os::unix::fs::symlink(temp.path().join("nowhere"), &link).unwrap();

    assert_eq!(io::probe(&link).unwrap(), None);
    assert_eq!(io::probe_no_follow(&link).unwrap(), Some(EntryKind::Other));
}
