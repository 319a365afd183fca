use bitboard_tools::bitboard::Bitboard;
use bitboard_tools::notation;
use bitboard_tools::perft;
use bitboard_tools::square::Square;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn convert_all_squares(c: &mut Criterion) {
    let names: Vec<String> = Square::all_squares().map(|s| s.to_string()).collect();

    c.bench_function("convert 64 squares", |b| {
        b.iter(|| {
            names
                .iter()
                .map(|name| notation::parse_square(black_box(name)).unwrap())
                .map(Bitboard::from_square)
                .fold(Bitboard::empty(), |acc, board| acc | board)
        })
    });
}

fn render(c: &mut Criterion) {
    c.bench_function("parse and render", |b| {
        b.iter(|| {
            notation::parse_bitboard(black_box("0xaa55aa55aa55aa55"))
                .unwrap()
                .to_string()
        })
    });
}

fn normalize_divide_output(c: &mut Criterion) {
    let lines: Vec<String> = Square::all_squares()
        .flat_map(|from| Square::all_squares().map(move |to| format!("{}{}: {}", from, to, 400)))
        .collect();

    c.bench_function("normalize 4096 divide lines", |b| {
        b.iter(|| perft::normalize(black_box(&lines)))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = convert_all_squares, render, normalize_divide_output
}
criterion_main!(benches);
