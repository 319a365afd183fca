use bitboard_tools::bitboard::Bitboard;
use bitboard_tools::square::Square;
use itertools::Itertools;

#[test]
fn every_square_renders_a_single_marker_in_place() {
    for square in Square::all_squares() {
        let bitboard: Bitboard = Bitboard::from_square(square)
            .hex_literal()
            .parse()
            .unwrap();
        let rows = bitboard.rows();

        let marked = rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().positions(|c| *c == 'X').map(move |f| (r, f)))
            .collect::<Vec<(usize, usize)>>();

        assert_eq!(
            marked,
            vec![(
                7 - square.rank().index() as usize,
                square.file().index() as usize
            )],
            "{}",
            square
        );
        assert_eq!(bitboard.to_algebraic().unwrap(), square);
    }
}

#[test]
fn rendered_rows_are_space_separated() {
    let text = Bitboard(0xaa55aa55aa55aa55).to_string();
    let rows = text.lines().collect::<Vec<&str>>();

    assert_eq!(rows.len(), 9);
    assert!(rows[..8].iter().all(|row| row.len() == 15));
    assert_eq!(rows[0], ". X . X . X . X");
    assert_eq!(rows[8], "");
}
