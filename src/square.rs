use core::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::{BitboardError, Result};
use crate::file::*;
use crate::rank::*;

/*
 * A square in Little-Endian Rank-File order: a1 = 0, h1 = 7, a8 = 56, h8 = 63.
 */
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct Square(usize);

impl Square {
    pub fn new(file: File, rank: Rank) -> Square {
        Square((rank.index() * 8 + file.index()) as usize)
    }

    pub fn rank(&self) -> Rank {
        Rank::from_index(self.index())
    }

    pub fn file(&self) -> File {
        File::from_index(self.index())
    }

    pub fn try_from_index(i: usize) -> Option<Square> {
        if i < N_SQUARES {
            Some(Square(i))
        } else {
            None
        }
    }

    pub fn from_index(i: usize) -> Square {
        match Square::try_from_index(i) {
            Some(square) => square,
            None => panic!("Square index {} is larger than max {}", i, N_SQUARES),
        }
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn all_squares() -> impl Iterator<Item = Square> {
        (0..N_SQUARES).map(Square)
    }
}

impl TryFrom<&str> for Square {
    type Error = BitboardError;

    fn try_from(s: &str) -> Result<Self> {
        crate::notation::parse_square(s)
    }
}

impl FromStr for Square {
    type Err = BitboardError;

    fn from_str(s: &str) -> Result<Self> {
        crate::notation::parse_square(s)
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[test]
fn test_parse_square() {
    assert_eq!(Square::try_from("a1").unwrap().index(), 0);
    assert_eq!(Square::try_from("h1").unwrap().index(), 7);
    assert_eq!(Square::try_from("e4").unwrap().index(), 28);
    assert_eq!(Square::try_from("a8").unwrap().index(), 56);
    assert_eq!(Square::try_from("h8").unwrap().index(), 63);

    assert!(Square::try_from("i8").is_err());
}

#[test]
fn test_new_matches_index() {
    assert_eq!(Square::new(File::E, Rank::_4), Square::from_index(28));
    assert_eq!(Square::new(File::H, Rank::_8), Square::from_index(63));
}

#[test]
fn test_display_round_trip() {
    for square in Square::all_squares() {
        assert_eq!(square.to_string().parse::<Square>().unwrap(), square);
    }
}

#[test]
fn test_try_from_index_bounds() {
    assert!(Square::try_from_index(63).is_some());
    assert!(Square::try_from_index(64).is_none());
}

#[test]
#[should_panic]
fn test_from_index_out_of_range() {
    Square::from_index(64);
}
