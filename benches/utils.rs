use board_games::{Board, GameVariant, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn squares() -> impl Iterator<Item = Position> {
    (0..8).flat_map(|row| (0..8).map(move |col| Position::new(row, col)))
}

fn pattern_count(board: &Board) -> usize {
    board
        .iter_pieces()
        .map(|piece| piece.possible_moves().len())
        .sum()
}

fn legal_count(board: &Board) -> usize {
    let mut result = 0;
    for from in squares() {
        if board.get(from).is_none() {
            continue;
        }
        result += squares().filter(|to| board.check_move(from, *to)).count();
    }
    result
}

fn criterion_benchmark(c: &mut Criterion) {
    for variant in [GameVariant::Standard, GameVariant::Checkers, GameVariant::Extended] {
        let board = Board::new(variant);
        c.bench_function(&format!("{variant} patterns"), |b| {
            b.iter(|| pattern_count(black_box(&board)))
        });
        c.bench_function(&format!("{variant} legality"), |b| {
            b.iter(|| legal_count(black_box(&board)))
        });
    }
    c.bench_function("undo round trip", |b| {
        b.iter(|| {
            let mut board = Board::default();
            board.make_move(Position::new(6, 4), Position::new(4, 4));
            board.undo_move()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
