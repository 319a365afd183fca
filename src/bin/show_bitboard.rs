use std::env;
use std::io::{self, BufRead};
use std::process;

use bitboard_tools::bitboard::Bitboard;
use bitboard_tools::error::{BitboardError, Result};
use bitboard_tools::logging;
use log::info;

fn read_input() -> Result<String> {
    if let Some(arg) = env::args().nth(1) {
        return Ok(arg);
    }

    info!("No argument, reading bitboard from stdin");
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(BitboardError::Usage(
            "show_bitboard [<hex_u64>] (or one line on stdin)".to_string(),
        ));
    }
    Ok(line)
}

fn main() {
    logging::init_from_env();

    match read_input().and_then(|input| input.parse::<Bitboard>()) {
        Ok(bitboard) => print!("{}", bitboard),
        Err(e) => {
            logging::report_failure(&e);
            process::exit(1);
        }
    }
}
