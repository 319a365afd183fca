use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const ENGINE: &str = r#"cat > /dev/null
printf 'Stockfish 16 by the Stockfish developers (see AUTHORS file)\n'
printf 'a2a3: 1\nb2b3: 1\ng1f3: 1\n\nNodes searched: 3\n\n'
"#;

// prints the depth it was given as the g1f3 count
const MOVEGEN: &str = r#"printf 'g1f3 %s\nb2b3 1\na2a3 1\n\n3\n' "$1"
"#;

const FAILING: &str = "echo 'no such position' >&2
exit 3
";

// Temporary shell script, removed when dropped
struct Script(PathBuf);

impl Drop for Script {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn script(name: &str, body: &str) -> Script {
    let path = std::env::temp_dir().join(format!(
        "bitboard-tools-{}-{}.sh",
        std::process::id(),
        name
    ));
    fs::write(&path, body).expect("Failed to write script");
    Script(path)
}

fn perft_diff(args: &[&str], engine: &Script, movegen: &Script) -> Output {
    Command::new(env!("CARGO_BIN_EXE_perft_diff"))
        .args(args)
        .env("PERFT_ENGINE", format!("sh {}", engine.0.display()))
        .env("PERFT_MOVEGEN", format!("sh {}", movegen.0.display()))
        .env_remove("PERFT_ENGINE_TRIM")
        .env_remove("PERFT_MOVEGEN_TRIM")
        .output()
        .expect("Failed to run perft_diff")
}

#[test]
fn matching_outputs_exit_zero() {
    let engine = script("match-engine", ENGINE);
    let movegen = script("match-movegen", MOVEGEN);

    let output = perft_diff(&["1"], &engine, &movegen);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn differing_outputs_exit_one() {
    let engine = script("differ-engine", ENGINE);
    let movegen = script("differ-movegen", MOVEGEN);

    let output = perft_diff(&["2"], &engine, &movegen);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "< g1f3: 1\n> g1f3: 2\n"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("g1f3"));
}

#[test]
fn missing_depth_prints_usage() {
    let engine = script("usage-engine", ENGINE);
    let movegen = script("usage-movegen", MOVEGEN);

    let output = perft_diff(&[], &engine, &movegen);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("usage:"));
}

#[test]
fn failing_program_exits_two() {
    let engine = script("fail-engine", ENGINE);
    let movegen = script("fail-movegen", FAILING);

    let output = perft_diff(&["1"], &engine, &movegen);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no such position"));
}

#[test]
fn scripts_are_removed_when_dropped() {
    let path = {
        let engine = script("drop-engine", ENGINE);
        assert!(engine.0.exists());
        engine.0.clone()
    };
    assert!(!path.exists());
}
