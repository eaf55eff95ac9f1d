use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hk_mahjong_calc::game::{GameContext, WinType};
use hk_mahjong_calc::tiles::{Tile, Wind, parse_tiles};
use hk_mahjong_calc::{calculate_hand, decompose, score};
use std::collections::BTreeSet;

fn context() -> GameContext {
    GameContext {
        win_type: WinType::SelfPick,
        seat_wind: Wind::East,
        round_wind: Wind::East,
        seat_number: 1,
        is_dealer: false,
        fully_concealed_hand: true,
        flowers: BTreeSet::new(),
        seasons: BTreeSet::new(),
        no_flowers_seasons: false,
    }
}

fn hands() -> Vec<(&'static str, Vec<Tile>)> {
    [
        ("all_sequences", "1d 2d 3d 4b 5b 6b 7c 8c 9c 2d 3d 4d 5c 5c"),
        // Many pair candidates before the right one
        ("pure_straight_backtrack", "1d 1d 1d 2d 3d 4d 5d 6d 7d 8d 9d 9d 9d 5d"),
        ("seven_pairs", "1d 1d 5d 5d 9d 9d 2b 2b 7c 7c E E Rd Rd"),
        ("thirteen_orphans", "1d 9d 1b 9b 1c 9c E S W N Rd Gd Wd Wd"),
    ]
    .into_iter()
    .map(|(name, codes)| (name, parse_tiles(codes).unwrap()))
    .collect()
}

fn bench_decompose(c: &mut Criterion) {
    for (name, tiles) in hands() {
        c.bench_function(&format!("decompose_{name}"), |b| {
            b.iter(|| decompose(black_box(&tiles)))
        });
    }
}

fn bench_score(c: &mut Criterion) {
    let ctx = context();
    let tiles = parse_tiles("E E E S S S 1b 2b 3b 7b 8b 9b 5b 5b").unwrap();
    let decomposition = decompose(&tiles).unwrap();
    c.bench_function("score_decomposed_hand", |b| {
        b.iter(|| score(black_box(&decomposition), black_box(&ctx)))
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let ctx = context();
    let tiles = hands();
    c.bench_function("calculate_hand_all_shapes", |b| {
        b.iter(|| {
            for (_, hand) in &tiles {
                black_box(calculate_hand(black_box(hand), &ctx).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_decompose, bench_score, bench_full_pipeline);
criterion_main!(benches);
