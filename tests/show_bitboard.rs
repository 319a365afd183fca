use std::io::Write;
use std::process::{Command, Output, Stdio};

use bitboard_tools::square::Square;

fn show(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_show_bitboard"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run show_bitboard");

    child
        .stdin
        .take()
        .expect("failed to get stdin")
        .write_all(stdin.as_bytes())
        .expect("Failed to write to stdin");

    child.wait_with_output().expect("Failed to read stdout")
}

fn convert(square: &str) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_square_to_bitboard"))
        .arg(square)
        .output()
        .expect("Failed to run square_to_bitboard");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn full_board() {
    let output = show(&["0xFFFFFFFFFFFFFFFF"], "");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "X X X X X X X X\n".repeat(8) + "\n"
    );
}

#[test]
fn empty_board() {
    let output = show(&["0x0"], "");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        ". . . . . . . .\n".repeat(8) + "\n"
    );
}

#[test]
fn reads_first_line_of_stdin() {
    let output = show(&[], "0x0000000010000000\nff\n");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows[4], ". . . . X . . .");
    assert_eq!(stdout.matches('X').count(), 1);
}

#[test]
fn malformed_hex_fails() {
    let output = show(&["0xZZ"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("0xZZ"));
}

#[test]
fn empty_stdin_fails() {
    let output = show(&[], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn convert_then_render_marks_the_square() {
    for name in ["a1", "c7", "e4", "h8"] {
        let square: Square = name.parse().unwrap();
        let output = show(&[], &convert(name));
        let stdout = String::from_utf8_lossy(&output.stdout);
        let rows: Vec<&str> = stdout.lines().collect();

        let row = rows[7 - square.rank().index() as usize];
        let column = 2 * square.file().index() as usize;
        assert_eq!(&row[column..column + 1], "X", "{} not marked", name);
        assert_eq!(stdout.matches('X').count(), 1);
    }
}
