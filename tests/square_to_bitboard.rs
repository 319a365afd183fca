use std::process::{Command, Output};

fn convert(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_square_to_bitboard"))
        .args(args)
        .output()
        .expect("Failed to run square_to_bitboard")
}

/*
 * Generate a test converting one square on the command line
 */
macro_rules! square_test {
    ( $square:ident = $hex:literal ) => {
        paste::item! {
            #[test]
            fn [<convert_ $square>]() {
                let output = convert(&[stringify!($square)]);
                assert_eq!(output.status.code(), Some(0));
                assert_eq!(String::from_utf8_lossy(&output.stdout), format!("{}\n", $hex));
            }
        }
    };
}

square_test!(a1 = "0x0000000000000001");
square_test!(h1 = "0x0000000000000080");
square_test!(e4 = "0x0000000010000000");
square_test!(a8 = "0x0100000000000000");
square_test!(h8 = "0x8000000000000000");

macro_rules! invalid_square_test {
    ( $name:ident = $input:literal ) => {
        paste::item! {
            #[test]
            fn [<rejects_ $name>]() {
                let output = convert(&[$input]);
                assert_eq!(output.status.code(), Some(1));
                assert!(output.stdout.is_empty());
                assert!(String::from_utf8_lossy(&output.stderr).contains($input));
            }
        }
    };
}

invalid_square_test!(off_board = "i9");
invalid_square_test!(file_only = "a");
invalid_square_test!(too_long = "e44");
invalid_square_test!(uppercase = "E4");

#[test]
fn rejects_empty_square() {
    let output = convert(&[""]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_argument_prints_usage() {
    let output = convert(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("usage:"));
}

#[test]
fn several_squares_give_their_union() {
    let output = convert(&["a1", "h8"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "0x8000000000000001"
    );
}
