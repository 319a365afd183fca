use std::fmt;
use std::io;

use BitboardError::*;

pub type Result<T> = std::result::Result<T, BitboardError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitboardError {
    InvalidSquare(String),
    ParseError(String),
    IOError(String),
    ProcessError(String),
    ConfigError(String),
    Usage(String),
}

impl fmt::Display for BitboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSquare(input) => write!(f, "Invalid position: '{}'", input),
            ParseError(msg) => write!(f, "{}", msg),
            IOError(msg) => write!(f, "IO error: {}", msg),
            ProcessError(msg) => write!(f, "{}", msg),
            ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Usage(msg) => write!(f, "usage: {}", msg),
        }
    }
}

impl std::error::Error for BitboardError {}

impl From<io::Error> for BitboardError {
    fn from(e: io::Error) -> Self {
        IOError(e.to_string())
    }
}

#[test]
fn test_display() {
    assert_eq!(
        InvalidSquare("i9".to_string()).to_string(),
        "Invalid position: 'i9'"
    );
    assert_eq!(
        Usage("perft_diff <depth>".to_string()).to_string(),
        "usage: perft_diff <depth>"
    );
}

#[test]
fn test_from_io_error() {
    let e: BitboardError = io::Error::new(io::ErrorKind::NotFound, "no such file").into();
    assert_eq!(e, IOError("no such file".to_string()));
}
