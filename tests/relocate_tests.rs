//! Artifact matching and relocation, independent of the build tools.

mod helpers;

use helpers::{file_names, touch};
use relbuild::artifact::{find_archives, find_packages, relocate};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_relocation_scenario() {
    let temp = TempDir::new().unwrap();
    let work = temp.path();
    let scratch = work.join("tmp.repos");
    let export = work.join("exported-artifacts");
    fs::create_dir_all(&export).unwrap();

    touch(&work.join("foo-1.0.tar.gz"));
    touch(&work.join("foo-1.0.tar.gz.asc"));
    touch(&scratch.join("a/b/foo-1.0-1.noarch.rpm"));
    touch(&scratch.join("x/foo-1.0-1.src.rpm"));

    let archives = find_archives(work, "foo").unwrap();
    relocate(&archives, &export).unwrap();
    let packages = find_packages(&scratch, ".rpm").unwrap();
    relocate(&packages, &export).unwrap();

    assert_eq!(
        file_names(&export),
        vec!["foo-1.0-1.noarch.rpm", "foo-1.0-1.src.rpm", "foo-1.0.tar.gz"]
    );
    assert!(work.join("foo-1.0.tar.gz.asc").exists());
}

#[test]
fn test_uppercase_suffix_collected() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("RPMS/x86_64/FOO-1.0-1.X86_64.RPM"));

    let found = find_packages(temp.path(), ".rpm").unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_package_scan_does_not_descend_into_export_when_separate() {
    let temp = TempDir::new().unwrap();
    let scratch = temp.path().join("tmp.repos");
    let export = temp.path().join("exported-artifacts");
    touch(&scratch.join("RPMS/noarch/foo-1.0-1.noarch.rpm"));
    touch(&export.join("old-0.1-1.noarch.rpm"));

    let found = find_packages(&scratch, ".rpm").unwrap();
    assert_eq!(found, vec![scratch.join("RPMS/noarch/foo-1.0-1.noarch.rpm")]);
}
