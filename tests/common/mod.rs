//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get an mdk command with a fixed author and no user log filter
pub fn mdk() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("mdk"));
    cmd.env("MDK_AUTHOR", "test").env_remove("MDK_LOG");
    cmd
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    mdk().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to create a unit of measure, returning its ID
pub fn create_test_uom(tmp: &TempDir, code: &str, title: &str, prefix: &str) -> String {
    let output = mdk()
        .current_dir(tmp.path())
        .args([
            "uom", "new", "--code", code, "--title", title, "--prefix", prefix, "-o", "id",
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "uom new failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Helper to create an item type, returning its ID
pub fn create_test_item_type(tmp: &TempDir, code: &str, title: &str) -> String {
    let output = mdk()
        .current_dir(tmp.path())
        .args(["item-type", "new", "--code", code, "--title", title, "-o", "id"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "item-type new failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Path of a record file inside the project
pub fn record_path(tmp: &TempDir, dir: &str, id: &str) -> PathBuf {
    tmp.path()
        .join("masterdata")
        .join(dir)
        .join(format!("{}.mdk.yaml", id))
}

/// Write a file of `size` bytes into the temp dir and return its path
pub fn write_file(tmp: &TempDir, name: &str, size: usize) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, vec![0x89u8; size]).unwrap();
    path
}
