//! Property-based invariant tests for the decomposer and scorer.
//!
//! Uses proptest to build random standard winning hands out of four melds
//! and a pair, shuffles them, and checks the pipeline's invariants.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

use hk_mahjong_calc::game::{GameContext, WinType};
use hk_mahjong_calc::hand::HandStructure;
use hk_mahjong_calc::tiles::{Dragon, Suit, Tile, TileFace, Wind};
use hk_mahjong_calc::{FAN_CAP, MINIMUM_FAN, calculate_hand, decompose, payment_for};

/// 27 suited faces followed by the 7 honours.
fn face(index: u8) -> TileFace {
    match index {
        0..=26 => TileFace::Suited(Suit::ALL[(index / 9) as usize], index % 9 + 1),
        27..=30 => TileFace::Wind(Wind::ALL[(index - 27) as usize]),
        31 => TileFace::Dragon(Dragon::Red),
        32 => TileFace::Dragon(Dragon::Green),
        _ => TileFace::Dragon(Dragon::White),
    }
}

/// A meld as (is_sequence, index). Sequence indices pick a suit and a start of 1-7.
fn meld_faces(is_sequence: bool, index: u8) -> Vec<TileFace> {
    if is_sequence {
        let suit = Suit::ALL[(index % 21 / 7) as usize];
        let start = index % 7 + 1;
        (0..3).map(|k| TileFace::Suited(suit, start + k)).collect()
    } else {
        vec![face(index % 34); 3]
    }
}

fn standard_hand() -> impl Strategy<Value = Vec<Tile>> {
    (
        prop::collection::vec((any::<bool>(), 0u8..34), 4),
        0u8..34,
        0usize..14,
        any::<bool>(),
    )
        .prop_map(|(melds, pair, rotation, reverse)| {
            let mut faces: Vec<TileFace> = melds
                .into_iter()
                .flat_map(|(is_sequence, index)| meld_faces(is_sequence, index))
                .collect();
            faces.extend([face(pair), face(pair)]);
            faces.rotate_left(rotation);
            if reverse {
                faces.reverse();
            }
            faces.into_iter().map(Tile::new).collect()
        })
        .prop_filter("at most four copies of a face", |tiles: &Vec<Tile>| {
            face_counts(tiles).values().all(|&n| n <= 4)
        })
}

fn face_counts(tiles: &[Tile]) -> BTreeMap<TileFace, usize> {
    let mut counts = BTreeMap::new();
    for tile in tiles {
        *counts.entry(tile.face).or_insert(0) += 1;
    }
    counts
}

fn context_strategy() -> impl Strategy<Value = GameContext> {
    (
        prop::sample::select(vec![
            WinType::SelfPick,
            WinType::Discard,
            WinType::KongReplacement,
            WinType::RobbingTheKong,
            WinType::MoonUnderTheSea,
        ]),
        0usize..4,
        0usize..4,
        1u8..=4,
        any::<bool>(),
    )
        .prop_map(|(win_type, seat, round, seat_number, concealed)| GameContext {
            win_type,
            seat_wind: Wind::ALL[seat],
            round_wind: Wind::ALL[round],
            seat_number,
            is_dealer: seat_number == 1,
            fully_concealed_hand: concealed,
            flowers: BTreeSet::new(),
            seasons: BTreeSet::new(),
            no_flowers_seasons: false,
        })
}

// ---------------------------------------------------------------------------
// Property-based tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any four melds plus a pair decompose, in any order, without losing tiles.
    #[test]
    fn standard_hands_always_decompose(tiles in standard_hand()) {
        let decomposition = decompose(&tiles);
        prop_assert!(decomposition.is_ok(), "{:?} failed: {:?}", tiles, decomposition);
        let decomposition = decomposition.unwrap();

        let used = decomposition.regular_tiles();
        prop_assert_eq!(used.len(), 14);
        prop_assert_eq!(face_counts(&used), face_counts(&tiles));

        if let HandStructure::Standard { melds, .. } = decomposition.structure() {
            prop_assert_eq!(melds.len(), 4);
            prop_assert!(decomposition.pair().is_some());
        }
    }

    /// Scoring the same hand twice gives the same result.
    #[test]
    fn scoring_is_deterministic(tiles in standard_hand(), ctx in context_strategy()) {
        let first = calculate_hand(&tiles, &ctx);
        let second = calculate_hand(&tiles, &ctx);
        prop_assert_eq!(&first, &second);

        let result = first.unwrap();
        let summed: u32 = result.matched_patterns.iter().map(|p| p.fan).sum();
        prop_assert_eq!(result.total_fan, summed);
        prop_assert_eq!(result.payment, payment_for(result.total_fan));
        prop_assert_eq!(result.meets_minimum, result.total_fan >= MINIMUM_FAN);
    }

    /// Payment never drops as fan grows, and stops growing at the cap.
    #[test]
    fn payment_is_monotonic(fan in 0u32..64) {
        prop_assert!(payment_for(fan + 1) >= payment_for(fan));
        if fan >= FAN_CAP {
            prop_assert_eq!(payment_for(fan), payment_for(FAN_CAP));
        }
    }
}
