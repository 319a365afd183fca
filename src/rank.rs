use crate::constants::*;
use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Rank {
    _1,
    _2,
    _3,
    _4,
    _5,
    _6,
    _7,
    _8,
}

impl Rank {
    pub fn index(&self) -> u8 {
        use Rank::*;
        match self {
            _1 => 0,
            _2 => 1,
            _3 => 2,
            _4 => 3,
            _5 => 4,
            _6 => 5,
            _7 => 6,
            _8 => 7,
        }
    }

    /*
     * Rank of a square index, eg 28 (e4) -> _4.
     */
    pub fn from_index(i: usize) -> Self {
        if i >= N_SQUARES {
            panic!("Square index {} is larger than max {}", i, N_SQUARES);
        }
        RANKS[i / N_FILES]
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(RANKS[(c as u8 - b'1') as usize]),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        (b'1' + self.index()) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

pub const RANKS: [Rank; 8] = [
    Rank::_1,
    Rank::_2,
    Rank::_3,
    Rank::_4,
    Rank::_5,
    Rank::_6,
    Rank::_7,
    Rank::_8,
];

#[test]
fn test_from_char() {
    assert_eq!(Rank::from_char('1'), Some(Rank::_1));
    assert_eq!(Rank::from_char('8'), Some(Rank::_8));
    assert_eq!(Rank::from_char('0'), None);
    assert_eq!(Rank::from_char('9'), None);
}

#[test]
fn test_from_index() {
    assert_eq!(Rank::from_index(0), Rank::_1);
    assert_eq!(Rank::from_index(28), Rank::_4);
    assert_eq!(Rank::from_index(63), Rank::_8);
}

#[test]
#[should_panic]
fn test_from_index_out_of_range() {
    Rank::from_index(64);
}
