use crate::bitboard::Bitboard;
use crate::error::{BitboardError, Result};
use crate::file::*;
use crate::rank::*;
use crate::square::*;
use log::debug;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete,
    character::complete::{alphanumeric1, digit1, hex_digit1, multispace0, one_of, space0, space1},
    combinator::{all_consuming, map_opt, map_res, opt, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, preceded},
    Finish, IResult,
};

/*
 * One line of perft divide output: the root move and the number of leaf
 * nodes below it.
 */
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DivideLine {
    pub mv: String,
    pub nodes: u64,
}

fn square_parser(input: &str) -> IResult<&str, Square> {
    map_opt(
        pair(one_of("abcdefgh"), one_of("12345678")),
        |(f, r)| Some(Square::new(File::from_char(f)?, Rank::from_char(r)?)),
    )(input)
}

/*
 * Parse an algebraic square, eg "e4". Exactly a lowercase file and a rank,
 * nothing else.
 */
pub fn parse_square(input: &str) -> Result<Square> {
    all_consuming(square_parser)(input)
        .finish()
        .map(|(_, square)| {
            debug!("Parsed square '{}' as index {}", input, square.index());
            square
        })
        .map_err(|_| BitboardError::InvalidSquare(input.to_string()))
}

fn hex_parser(input: &str) -> IResult<&str, u64> {
    let digits = recognize(separated_list1(complete::char('_'), hex_digit1));
    let value = map_res(digits, |s: &str| u64::from_str_radix(&s.replace('_', ""), 16));

    delimited(
        multispace0,
        preceded(opt(alt((tag("0x"), tag("0X")))), value),
        multispace0,
    )(input)
}

/*
 * Parse a hexadecimal bitboard, eg "0x0000000010000000", "ff00" or
 * "0xFFFF_0000_0000_0000".
 */
pub fn parse_bitboard(input: &str) -> Result<Bitboard> {
    all_consuming(hex_parser)(input)
        .finish()
        .map(|(_, value)| Bitboard(value))
        .map_err(|e| {
            BitboardError::ParseError(format!(
                "Could not parse bitboard '{}' as a 64-bit hex value: {:?}",
                input.trim(),
                e.code
            ))
        })
}

fn divide_line_parser(input: &str) -> IResult<&str, DivideLine> {
    let (input, _) = space0(input)?;
    let (input, mv) = alphanumeric1(input)?;
    let (input, _) = opt(complete::char(':'))(input)?;
    let (input, _) = space1(input)?;
    let (input, nodes) = map_res(digit1, |s: &str| s.parse::<u64>())(input)?;
    let (input, _) = space0(input)?;

    Ok((
        input,
        DivideLine {
            mv: mv.to_string(),
            nodes,
        },
    ))
}

/*
 * Parse a divide line in either engine style ("a2a3: 20") or move generator
 * style ("a2a3 20").
 */
pub fn parse_divide_line(input: &str) -> Result<DivideLine> {
    all_consuming(divide_line_parser)(input)
        .finish()
        .map(|(_, line)| line)
        .map_err(|_| BitboardError::ParseError(format!("Not a divide line: '{}'", input)))
}

#[test]
fn test_parse_square_corners() {
    assert_eq!(parse_square("a1").unwrap().index(), 0);
    assert_eq!(parse_square("h8").unwrap().index(), 63);
    assert_eq!(parse_square("e4").unwrap().index(), 28);
}

#[test]
fn test_parse_square_rejects() {
    for input in ["i9", "a", "", "e44", "E4", "a0", " e4", "4e"] {
        assert_eq!(
            parse_square(input),
            Err(BitboardError::InvalidSquare(input.to_string())),
            "accepted '{}'",
            input
        );
    }
}

#[test]
fn test_parse_bitboard() {
    assert_eq!(parse_bitboard("0x0000000010000000").unwrap(), Bitboard(1 << 28));
    assert_eq!(parse_bitboard("0X8000000000000000").unwrap(), Bitboard(1 << 63));
    assert_eq!(parse_bitboard("ff").unwrap(), Bitboard(0xff));
    assert_eq!(parse_bitboard("FfFf").unwrap(), Bitboard(0xffff));
    assert_eq!(parse_bitboard("  0x10\n").unwrap(), Bitboard(0x10));
    assert_eq!(parse_bitboard("0xffff_0000").unwrap(), Bitboard(0xffff_0000));
    assert_eq!(
        parse_bitboard("0xFFFFFFFFFFFFFFFF").unwrap(),
        Bitboard::full()
    );
}

#[test]
fn test_parse_bitboard_rejects() {
    for input in ["", "0x", "xyz", "0x1g", "0x10000000000000000", "ff_", "_ff", "1 2"] {
        assert!(parse_bitboard(input).is_err(), "accepted '{}'", input);
    }
}

#[test]
fn test_parse_divide_line() {
    let expected = DivideLine {
        mv: "a2a3".to_string(),
        nodes: 20,
    };
    assert_eq!(parse_divide_line("a2a3: 20").unwrap(), expected);
    assert_eq!(parse_divide_line("a2a3 20").unwrap(), expected);
    assert_eq!(parse_divide_line("  a2a3:   20  ").unwrap(), expected);
    assert_eq!(parse_divide_line("e7e8q: 1").unwrap().mv, "e7e8q");
}

#[test]
fn test_parse_divide_line_rejects() {
    assert!(parse_divide_line("Nodes searched: 8902").is_err());
    assert!(parse_divide_line("").is_err());
    assert!(parse_divide_line("8902").is_err());
    assert!(parse_divide_line("a2a3:20").is_err());
}
