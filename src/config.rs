use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, LevelFilter};
use nom::{
    character::complete::{self, digit1, space0},
    combinator::{all_consuming, map_res},
    sequence::{delimited, separated_pair},
    Finish, IResult,
};

use crate::error::{BitboardError, Result};

pub const ENGINE_VAR: &str = "PERFT_ENGINE";
pub const MOVEGEN_VAR: &str = "PERFT_MOVEGEN";
pub const ENGINE_TRIM_VAR: &str = "PERFT_ENGINE_TRIM";
pub const MOVEGEN_TRIM_VAR: &str = "PERFT_MOVEGEN_TRIM";
pub const LOG_LEVEL_VAR: &str = "BITBOARD_LOG";
pub const LOG_FILE_VAR: &str = "BITBOARD_LOG_FILE";

const DEFAULT_ENGINE: &str = "stockfish";
const DEFAULT_MOVEGEN: &str = "cargo run --release --quiet --";

/*
 * Number of lines to drop from the start and end of a perft listing.
 *
 * Stockfish prints a banner line before the divide output and a blank line,
 * "Nodes searched: N" and another blank line after it.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trim {
    pub header: usize,
    pub trailer: usize,
}

impl Trim {
    pub const ENGINE: Trim = Trim {
        header: 1,
        trailer: 3,
    };
    pub const MOVEGEN: Trim = Trim {
        header: 0,
        trailer: 2,
    };
}

fn count_parser(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

fn trim_parser(input: &str) -> IResult<&str, Trim> {
    let (input, (header, trailer)) = delimited(
        space0,
        separated_pair(
            count_parser,
            delimited(space0, complete::char(','), space0),
            count_parser,
        ),
        space0,
    )(input)?;

    Ok((input, Trim { header, trailer }))
}

impl FromStr for Trim {
    type Err = BitboardError;

    fn from_str(s: &str) -> Result<Self> {
        all_consuming(trim_parser)(s)
            .finish()
            .map(|(_, trim)| trim)
            .map_err(|_| {
                BitboardError::ConfigError(format!(
                    "expected '<header>,<trailer>' line counts, got '{}'",
                    s
                ))
            })
    }
}

/*
 * An external program and its leading arguments, eg "cargo run --release --".
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl FromStr for CommandLine {
    type Err = BitboardError;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace().map(String::from);
        let program = words
            .next()
            .ok_or_else(|| BitboardError::ConfigError("empty command line".to_string()))?;

        Ok(CommandLine {
            program,
            args: words.collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub engine: CommandLine,
    pub movegen: CommandLine,
    pub engine_trim: Trim,
    pub movegen_trim: Trim,
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self> {
        HarnessConfig::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = HarnessConfig {
            engine: lookup(ENGINE_VAR)
                .as_deref()
                .unwrap_or(DEFAULT_ENGINE)
                .parse()?,
            movegen: lookup(MOVEGEN_VAR)
                .as_deref()
                .unwrap_or(DEFAULT_MOVEGEN)
                .parse()?,
            engine_trim: lookup(ENGINE_TRIM_VAR)
                .map(|s| s.parse::<Trim>())
                .transpose()?
                .unwrap_or(Trim::ENGINE),
            movegen_trim: lookup(MOVEGEN_TRIM_VAR)
                .map(|s| s.parse::<Trim>())
                .transpose()?
                .unwrap_or(Trim::MOVEGEN),
        };

        debug!("{:?}", config);
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: LevelFilter::Warn,
            file: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Result<Self> {
        LogConfig::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = match lookup(LOG_LEVEL_VAR) {
            Some(s) => LevelFilter::from_str(s.trim()).map_err(|_| {
                BitboardError::ConfigError(format!("unknown log level '{}'", s))
            })?,
            None => LevelFilter::Warn,
        };

        Ok(LogConfig {
            level,
            file: lookup(LOG_FILE_VAR)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }
}

#[cfg(test)]
fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[test]
fn test_harness_defaults() {
    let config = HarnessConfig::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.engine.program, "stockfish");
    assert!(config.engine.args.is_empty());
    assert_eq!(config.movegen.program, "cargo");
    assert_eq!(config.movegen.args, vec!["run", "--release", "--quiet", "--"]);
    assert_eq!(config.engine_trim, Trim::ENGINE);
    assert_eq!(config.movegen_trim, Trim::MOVEGEN);
}

#[test]
fn test_harness_overrides() {
    let config = HarnessConfig::from_lookup(lookup_from(&[
        (ENGINE_VAR, "/opt/sf/stockfish-16"),
        (MOVEGEN_VAR, "./target/release/movegen  --divide"),
        (ENGINE_TRIM_VAR, "2, 4"),
        (MOVEGEN_TRIM_VAR, "0,0"),
    ]))
    .unwrap();

    assert_eq!(config.engine.program, "/opt/sf/stockfish-16");
    assert_eq!(config.movegen.args, vec!["--divide"]);
    assert_eq!(
        config.engine_trim,
        Trim {
            header: 2,
            trailer: 4
        }
    );
    assert_eq!(
        config.movegen_trim,
        Trim {
            header: 0,
            trailer: 0
        }
    );
}

#[test]
fn test_harness_rejects_bad_values() {
    assert!(HarnessConfig::from_lookup(lookup_from(&[(ENGINE_VAR, "   ")])).is_err());
    assert!(HarnessConfig::from_lookup(lookup_from(&[(ENGINE_TRIM_VAR, "1")])).is_err());
    assert!(HarnessConfig::from_lookup(lookup_from(&[(MOVEGEN_TRIM_VAR, "-1,2")])).is_err());
}

#[test]
fn test_log_config() {
    assert_eq!(
        LogConfig::from_lookup(lookup_from(&[])).unwrap(),
        LogConfig::default()
    );

    let config = LogConfig::from_lookup(lookup_from(&[
        (LOG_LEVEL_VAR, "debug"),
        (LOG_FILE_VAR, "/tmp/bitboard.log"),
    ]))
    .unwrap();
    assert_eq!(config.level, LevelFilter::Debug);
    assert_eq!(config.file, Some(PathBuf::from("/tmp/bitboard.log")));

    assert!(LogConfig::from_lookup(lookup_from(&[(LOG_LEVEL_VAR, "loud")])).is_err());
}
