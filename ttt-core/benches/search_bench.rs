use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ttt_core::{Board, Searcher};

fn bench_minimax_empty_board(c: &mut Criterion) {
    c.bench_function("minimax_empty_board", |b| {
        b.iter(|| black_box(Board::new()).minimax_move());
    });
}

fn bench_minimax_after_center(c: &mut Criterion) {
    let board = Board::new().play(4);
    c.bench_function("minimax_after_center", |b| {
        b.iter(|| black_box(board).minimax_move());
    });
}

fn bench_minimax_mid_game(c: &mut Criterion) {
    // X: 0, 4  O: 8, 2
    let board = Board::new().play(0).play(8).play(4).play(2);
    c.bench_function("minimax_mid_game", |b| {
        b.iter(|| black_box(board).minimax_move());
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("minimax_full_game", |b| {
        b.iter(|| {
            let mut board = Board::new();
            while let Some(cell) = board.best_move() {
                board = board.play(cell);
            }
            board
        });
    });
}

fn bench_searcher_empty_board(c: &mut Criterion) {
    c.bench_function("searcher_empty_board", |b| {
        b.iter(|| {
            let mut searcher = Searcher::new();
            searcher.search(black_box(Board::new()))
        });
    });
}

criterion_group!(
    benches,
    bench_minimax_empty_board,
    bench_minimax_after_center,
    bench_minimax_mid_game,
    bench_full_game,
    bench_searcher_empty_board
);
criterion_main!(benches);
