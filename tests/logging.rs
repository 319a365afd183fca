use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn run_with_log_file(bin: &str, args: &[&str], log_file: &Path) -> Output {
    Command::new(bin)
        .args(args)
        .env("BITBOARD_LOG_FILE", log_file)
        .env_remove("BITBOARD_LOG")
        .output()
        .expect("Failed to run binary")
}

fn log_path(name: &str) -> PathBuf {
    let file_name = format!("bitboard-tools-{}-{}.log", std::process::id(), name);
    std::env::temp_dir().join(file_name)
}

#[test]
fn invalid_square_is_logged_to_file() {
    let path = log_path("invalid-square");
    let output = run_with_log_file(env!("CARGO_BIN_EXE_square_to_bitboard"), &["i9"], &path);

    assert_eq!(output.status.code(), Some(1));
    // stderr carries the plain message once, without the log pattern
    assert_eq!(String::from_utf8_lossy(&output.stderr), "Invalid position: 'i9'\n");

    let logged = fs::read_to_string(&path).expect("Failed to read log file");
    let _ = fs::remove_file(&path);
    assert!(logged.contains("ERROR"));
    assert!(logged.contains("Invalid position: 'i9'"));
}

#[test]
fn malformed_bitboard_is_logged_to_file() {
    let path = log_path("malformed-bitboard");
    let output = run_with_log_file(env!("CARGO_BIN_EXE_show_bitboard"), &["0xzz"], &path);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stderr).lines().count(), 1);

    let logged = fs::read_to_string(&path).expect("Failed to read log file");
    let _ = fs::remove_file(&path);
    assert!(logged.contains("ERROR"));
    assert!(logged.contains("0xzz"));
}

#[test]
fn usage_error_is_logged_to_file() {
    let path = log_path("usage");
    let output = run_with_log_file(env!("CARGO_BIN_EXE_perft_diff"), &[], &path);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("usage:"));

    let logged = fs::read_to_string(&path).expect("Failed to read log file");
    let _ = fs::remove_file(&path);
    assert!(logged.contains("usage: perft_diff <depth>"));
}
