use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{collides, merge, Board, Game, Piece, SimpleRng};
use blockfall::types::{Command, BOARD_WIDTH};

fn bench_tick(c: &mut Criterion) {
    let mut game = Game::new(12345);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            game.tick(black_box(16));
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::new();
    let mut rng = SimpleRng::new(12345);
    let piece = Piece::spawn(&mut rng);

    c.bench_function("collides_empty_board", |b| {
        b.iter(|| collides(black_box(&board), black_box(&piece)))
    });
}

fn bench_merge_and_lock(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let mut piece = Piece::spawn(&mut rng);
    piece.y = 10;

    c.bench_function("merge_piece", |b| {
        b.iter(|| {
            let mut board = Board::new();
            merge(&mut board, black_box(&piece));
            board.occupied_count()
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..BOARD_WIDTH as i8 {
                    board.set(x, y, Some(0));
                }
            }
            for y in (16..20).rev() {
                board.remove_row(y);
            }
            board.occupied_count()
        })
    });
}

fn bench_commands(c: &mut Criterion) {
    let mut game = Game::new(12345);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            game.apply(Command::MoveLeft);
            game.apply(Command::MoveRight);
        })
    });

    let mut game = Game::new(12345);
    c.bench_function("rotate", |b| {
        b.iter(|| {
            game.apply(Command::Rotate);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let game = Game::new(12345);
    let mut snap = game.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_collides,
    bench_merge_and_lock,
    bench_line_clear,
    bench_commands,
    bench_snapshot
);
criterion_main!(benches);
