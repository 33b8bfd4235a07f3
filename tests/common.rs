#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DAY: &str = "2025-09-01";

pub fn rc() -> Command {
    cargo_bin_cmd!("rollcall")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollcall.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema in test mode (config file untouched).
pub fn init_db(db_path: &str) {
    rc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Save Class 1 / Section A on DAY: everyone present except #5 absent.
pub fn save_class_one(db_path: &str) {
    rc().args([
        "--db", db_path, "--test", "mark", "students", "--class", "1", "--section", "A",
        "--date", DAY, "--all", "P", "--set", "5=A", "--save",
    ])
    .assert()
    .success();
}
