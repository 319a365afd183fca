use std::fmt;

use crate::constants::*;

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub fn index(&self) -> u8 {
        use File::*;

        match self {
            A => 0,
            B => 1,
            C => 2,
            D => 3,
            E => 4,
            F => 5,
            G => 6,
            H => 7,
        }
    }

    /*
     * File of a square index, eg 28 (e4) -> E.
     */
    pub fn from_index(i: usize) -> Self {
        if i >= N_SQUARES {
            panic!("Square index {} is larger than max {}", i, N_SQUARES);
        }
        FILES[i % N_FILES]
    }

    pub fn from_char(c: char) -> Option<Self> {
        use File::*;

        match c {
            'a' => Some(A),
            'b' => Some(B),
            'c' => Some(C),
            'd' => Some(D),
            'e' => Some(E),
            'f' => Some(F),
            'g' => Some(G),
            'h' => Some(H),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        (b'a' + self.index()) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

pub const FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[test]
fn test_from_char() {
    assert_eq!(File::from_char('a'), Some(File::A));
    assert_eq!(File::from_char('h'), Some(File::H));
    assert_eq!(File::from_char('i'), None);
    assert_eq!(File::from_char('A'), None);
}

#[test]
fn test_char_round_trip() {
    for file in FILES.iter() {
        assert_eq!(File::from_char(file.to_char()), Some(*file));
    }
}

#[test]
fn test_from_index() {
    assert_eq!(File::from_index(0), File::A);
    assert_eq!(File::from_index(28), File::E);
    assert_eq!(File::from_index(63), File::H);
}

#[test]
#[should_panic]
fn test_from_index_out_of_range() {
    File::from_index(64);
}
