pub mod bitboard;
pub mod config;
pub mod constants;
pub mod error;
pub mod file;
pub mod logging;
pub mod notation;
pub mod perft;
pub mod rank;
pub mod square;
