use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rust_chess_history::rules::{is_legal, legal_targets};
use rust_chess_history::{Board, GameSession, Square};

const MIDDLEGAME: &str = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQK2R";

fn bench_full_scan(c: &mut Criterion) {
    let boards = [
        ("startpos", Board::initial()),
        ("middlegame", Board::from_placement(MIDDLEGAME).expect("valid placement")),
    ];
    for (name, board) in boards {
        c.bench_function(&format!("is_legal_all_pairs/{}", name), |b| {
            b.iter(|| {
                let mut count = 0usize;
                for from in Square::all() {
                    for to in Square::all() {
                        if is_legal(black_box(&board), from, to) {
                            count += 1;
                        }
                    }
                }
                count
            })
        });
        c.bench_function(&format!("legal_targets/{}", name), |b| {
            b.iter(|| Square::all().map(|sq| legal_targets(black_box(&board), sq).len()).sum::<usize>())
        });
    }
}

fn bench_undo_redo(c: &mut Criterion) {
    let line = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4"), ("g8", "f6")];
    let squares: Vec<(Square, Square)> = line
        .iter()
        .map(|(f, t)| (Square::from_algebraic(f).expect("square"), Square::from_algebraic(t).expect("square")))
        .collect();
    c.bench_function("play_undo_redo_line", |b| {
        b.iter(|| {
            let mut game = GameSession::new();
            for &(from, to) in &squares {
                let _ = game.try_move(from, to);
            }
            while game.undo_depth() > 0 { game.undo(); }
            while game.redo_depth() > 0 { game.redo(); }
            black_box(game.board().zobrist_key())
        })
    });
}

criterion_group!(benches, bench_full_scan, bench_undo_redo);
criterion_main!(benches);
