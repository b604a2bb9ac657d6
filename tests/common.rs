#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ffw() -> Command {
    cargo_bin_cmd!("fieldflow")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldflow.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write a tiny PNG-looking file and return its path
pub fn temp_photo(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldflow.png", name));
    fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).expect("write photo");
    path.to_string_lossy().to_string()
}

/// Common arguments: database, credentials, no simulated latency
pub fn as_user(db_path: &str, user: &str, password: &str) -> Vec<String> {
    vec![
        "--db".into(),
        db_path.into(),
        "--user".into(),
        user.into(),
        "--password".into(),
        password.into(),
        "--no-delay".into(),
    ]
}

pub fn field_worker(db_path: &str) -> Vec<String> {
    as_user(db_path, "funcionario", "func123")
}

pub fn inspector(db_path: &str) -> Vec<String> {
    as_user(db_path, "fiscal", "fiscal123")
}

pub fn contractor(db_path: &str) -> Vec<String> {
    as_user(db_path, "empresa", "empresa123")
}

/// Initialize DB (test mode: no config file written)
pub fn init_db(db_path: &str) {
    ffw()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// File one request as the field worker
pub fn submit(db_path: &str, service: &str, photo: &str) {
    ffw()
        .env_remove("FIELDFLOW_USER")
        .env_remove("FIELDFLOW_PASSWORD")
        .args(field_worker(db_path))
        .args([
            "submit",
            "--photo",
            photo,
            "--lat=-23.55052",
            "--lng=-46.63331",
            "--service",
            service,
        ])
        .assert()
        .success();
}
