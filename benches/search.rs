use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hex::board::{Board, Cell, Player, Pos};
use hex::eval::distance;
use hex::search::generate_candidates;
use hex::{AIEngine, Difficulty};
use std::hint::black_box;

/// An 11x11 middle game with a few stones each
fn midgame() -> Board {
    let mut board = Board::new(11);
    let stones = [
        (5, 5, Cell::Red),
        (4, 6, Cell::Blue),
        (6, 3, Cell::Red),
        (3, 5, Cell::Blue),
        (5, 7, Cell::Red),
        (7, 4, Cell::Blue),
        (4, 8, Cell::Red),
        (2, 6, Cell::Blue),
    ];
    for (r, c, cell) in stones {
        board.put(Pos::new(r, c), cell);
    }
    board
}

fn bench_distance(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("eval/distance", |b| {
        b.iter(|| black_box(distance(black_box(&board), Player::Red)))
    });
}

fn bench_candidates(c: &mut Criterion) {
    let mut board = midgame();
    c.bench_function("search/candidates", |b| {
        b.iter(|| black_box(generate_candidates(&mut board, Player::Red)))
    });
}

fn bench_choose_move(c: &mut Criterion) {
    let board = midgame();
    let mut group = c.benchmark_group("engine/choose_move");
    group.sample_size(10);
    for difficulty in Difficulty::ALL {
        let profile = difficulty.preset();
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &profile, |b, p| {
            let mut engine = AIEngine::new();
            b.iter(|| black_box(engine.choose_move(&board, Player::Red, p)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distance, bench_candidates, bench_choose_move);
criterion_main!(benches);
