use std::env;
use std::process;

use bitboard_tools::config::HarnessConfig;
use bitboard_tools::error::{BitboardError, Result};
use bitboard_tools::logging;
use bitboard_tools::perft::{compare_programs, PerftReport, PerftRequest};

// Exit statuses follow diff(1)
const SAME: i32 = 0;
const DIFFERENT: i32 = 1;
const TROUBLE: i32 = 2;

fn run(args: &[String]) -> Result<PerftReport> {
    let request = PerftRequest::from_args(args)?;
    let config = HarnessConfig::from_env()?;
    compare_programs(&config, &request)
}

fn main() {
    logging::init_from_env();

    let args: Vec<String> = env::args().skip(1).collect();
    let report = match run(&args) {
        Ok(report) => report,
        Err(e @ BitboardError::Usage(_)) => {
            logging::report_failure(&e);
            process::exit(1);
        }
        Err(e) => {
            logging::report_failure(&e);
            process::exit(TROUBLE);
        }
    };

    for line in report.diff.iter() {
        println!("{}", line);
    }

    if report.is_match() {
        process::exit(SAME);
    }

    eprint!("{}", report.comparison);
    process::exit(DIFFERENT);
}
