use crate::constants::*;
use crate::error::{BitboardError, Result};
use crate::file::*;
use crate::rank::*;
use crate::square::*;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub fn empty() -> Self {
        Bitboard(0x0)
    }

    pub fn full() -> Self {
        Self(u64::MAX)
    }

    pub fn from_square(square: Square) -> Self {
        Bitboard(1 << square.index())
    }

    pub fn from_squares<I: IntoIterator<Item = Square>>(squares: I) -> Self {
        squares
            .into_iter()
            .fold(Bitboard::empty(), |board, square| board.set(square))
    }

    pub fn set(&self, square: Square) -> Self {
        Bitboard(self.0 | 1 << square.index())
    }

    pub fn unset(&self, square: Square) -> Self {
        Bitboard(self.0 & !(1 << square.index()))
    }

    pub fn contains(&self, square: Square) -> bool {
        self.0 & (1 << square.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn popcnt(&self) -> u32 {
        self.0.count_ones()
    }

    /*
     * Return all set squares in the bitboard, lowest index first
     */
    pub fn squares(&self) -> SquareIterator {
        SquareIterator::new(self)
    }

    /*
     * The square of a single-square bitboard, eg 0x10000000 -> e4.
     */
    pub fn to_algebraic(&self) -> Result<Square> {
        if self.popcnt() != 1 {
            return Err(BitboardError::InvalidSquare(self.hex_literal()));
        }
        Ok(Square::from_index(self.0.trailing_zeros() as usize))
    }

    // 0x prefix and 16 zero-padded digits
    pub fn hex_literal(&self) -> String {
        format!("{:#018x}", self.0)
    }

    /*
     * Board rows from rank 8 down to rank 1, files a through h.
     */
    pub fn rows(&self) -> Vec<[char; N_FILES]> {
        RANKS
            .iter()
            .rev()
            .map(|rank| {
                let mut row = [CLEAR_MARKER; N_FILES];
                for file in FILES.iter() {
                    if self.contains(Square::new(*file, *rank)) {
                        row[file.index() as usize] = SET_MARKER;
                    }
                }
                row
            })
            .collect()
    }
}

pub struct SquareIterator {
    bitboard: Bitboard,
}

impl SquareIterator {
    fn new(bitboard: &Bitboard) -> Self {
        SquareIterator {
            bitboard: *bitboard,
        }
    }
}

impl Iterator for SquareIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bitboard.is_empty() {
            None
        } else {
            let trailing_zeros = self.bitboard.0.trailing_zeros() as usize;
            self.bitboard.0 &= self.bitboard.0 - 1;
            Some(Square::from_index(trailing_zeros))
        }
    }
}

impl FromStr for Bitboard {
    type Err = BitboardError;

    fn from_str(s: &str) -> Result<Self> {
        crate::notation::parse_bitboard(s)
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_squares() {
    let b = Bitboard::from_squares(vec![sq("d2"), sq("h4"), sq("a6")]);
    assert_eq!(
        b.squares().collect::<Vec<Square>>(),
        vec![sq("d2"), sq("h4"), sq("a6")]
    );
}

#[test]
fn test_squares_no_panic_when_h8_is_set() {
    let squares = vec![sq("f8"), sq("h8")];
    let bitboard = Bitboard::from_squares(squares.clone());
    assert_eq!(squares, bitboard.squares().collect::<Vec<Square>>());
}

#[test]
fn test_hex_literal() {
    assert_eq!(Bitboard::from_square(sq("a1")).hex_literal(), "0x0000000000000001");
    assert_eq!(Bitboard::from_square(sq("h8")).hex_literal(), "0x8000000000000000");
    assert_eq!(Bitboard::from_square(sq("e4")).hex_literal(), "0x0000000010000000");
    assert_eq!(Bitboard::empty().hex_literal().len(), 18);
}

#[test]
fn test_print_full_and_empty() {
    let full = "X X X X X X X X\n".repeat(8) + "\n";
    let empty = ". . . . . . . .\n".repeat(8) + "\n";
    assert_eq!(Bitboard::full().to_string(), full);
    assert_eq!(Bitboard::empty().to_string(), empty);
}

#[test]
fn test_print_orientation() {
    let board = Bitboard::from_squares(vec![sq("a8"), sq("h1")]);
    let rows: Vec<String> = board.to_string().lines().map(String::from).collect();
    assert_eq!(rows[0], "X . . . . . . .");
    assert_eq!(rows[7], ". . . . . . . X");
    assert_eq!(rows[8], "");
}

#[test]
fn test_to_algebraic() {
    for square in Square::all_squares() {
        assert_eq!(Bitboard::from_square(square).to_algebraic().unwrap(), square);
    }
    assert!(Bitboard::empty().to_algebraic().is_err());
    assert!(Bitboard::from_squares(vec![sq("a1"), sq("b1")])
        .to_algebraic()
        .is_err());
}

#[test]
fn test_set_unset_contains() {
    let b = Bitboard::empty().set(sq("c3"));
    assert!(b.contains(sq("c3")));
    assert!(!b.unset(sq("c3")).contains(sq("c3")));
    // unsetting a clear square leaves it clear
    assert_eq!(Bitboard::empty().unset(sq("c3")), Bitboard::empty());
}

#[test]
fn test_rank_and_file_unions() {
    let rank_1 = Bitboard::from_squares(FILES.iter().map(|f| Square::new(*f, Rank::_1)));
    let a_file = Bitboard::from_squares(RANKS.iter().map(|r| Square::new(File::A, *r)));

    assert_eq!(rank_1, Bitboard(0x00000000000000ff));
    assert_eq!(a_file, Bitboard(0x0101010101010101));
    assert_eq!(rank_1 & a_file, Bitboard::from_square(sq("a1")));
    assert_eq!((rank_1 ^ a_file).popcnt(), 14);
    assert_eq!(!(rank_1 | a_file), Bitboard(0xfefefefefefefe00));
}
