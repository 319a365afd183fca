use std::env;
use std::process;

use bitboard_tools::bitboard::Bitboard;
use bitboard_tools::error::{BitboardError, Result};
use bitboard_tools::logging;
use bitboard_tools::square::Square;

const USAGE: &str = "square_to_bitboard <algebraic_position> [<algebraic_position> ...]";

/*
 * One square gives a single-bit board, several give their union.
 */
fn convert(args: &[String]) -> Result<Bitboard> {
    if args.is_empty() {
        return Err(BitboardError::Usage(USAGE.to_string()));
    }

    args.iter()
        .map(|arg| arg.parse::<Square>())
        .collect::<Result<Vec<Square>>>()
        .map(Bitboard::from_squares)
}

fn main() {
    logging::init_from_env();

    let args: Vec<String> = env::args().skip(1).collect();
    match convert(&args) {
        Ok(bitboard) => println!("{}", bitboard.hex_literal()),
        Err(e) => {
            logging::report_failure(&e);
            process::exit(1);
        }
    }
}
