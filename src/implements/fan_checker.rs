//! # Hong Kong Fan Checker
//!
//! Matches a decomposed hand and its game context against the pattern
//! catalogue, tier by tier. A special whole-hand pattern ends the search;
//! otherwise every additive tier contributes its matches.

use log::debug;
use std::collections::BTreeSet;

use super::catalogue::PatternId;
use super::types::{
    game::{GameContext, WinType},
    hand::{HandDecomposition, HandStructure, MeldType},
    tiles::{Flower, Season, Suit, TileFace},
};

/// The patterns a hand earned, in tier order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanResult {
    pub patterns: Vec<PatternId>,
    pub is_special_hand: bool,
}

/// The flowers and seasons a hand is credited with.
///
/// The context's sets win; when both are empty the bonus tiles found in the
/// hand itself are used, mapped through `Flower`/`Season` seat numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BonusCollection {
    pub flowers: BTreeSet<Flower>,
    pub seasons: BTreeSet<Season>,
}

impl BonusCollection {
    pub fn collect(decomposition: &HandDecomposition, context: &GameContext) -> Self {
        if !context.flowers.is_empty() || !context.seasons.is_empty() {
            return BonusCollection {
                flowers: context.flowers.clone(),
                seasons: context.seasons.clone(),
            };
        }

        let mut collection = BonusCollection::default();
        for tile in decomposition.bonus_tiles() {
            match tile.face {
                TileFace::Flower(f) => {
                    collection.flowers.insert(f);
                }
                TileFace::Season(s) => {
                    collection.seasons.insert(s);
                }
                _ => {}
            }
        }
        collection
    }

    pub fn total(&self) -> usize {
        self.flowers.len() + self.seasons.len()
    }
}

/// Runs every tier against the hand.
///
/// # Arguments
/// * `decomposition` - The output of `raw_hand_organizer::decompose`.
/// * `context` - How and where the hand was won.
pub fn check_all_fan(decomposition: &HandDecomposition, context: &GameContext) -> FanResult {
    let bonus = BonusCollection::collect(decomposition, context);

    if let Some(special) = special_hands::check(decomposition, context, &bonus) {
        debug!("special hand {:?} overrides additive scoring", special);
        return FanResult {
            patterns: vec![special],
            is_special_hand: true,
        };
    }

    let mut patterns = Vec::new();
    patterns.extend(win_actions::check(context));
    patterns.extend(set_types::check(decomposition, context));
    patterns.extend(honour_tiles::check(decomposition, context));
    patterns.extend(suit_and_terminals::check(decomposition));
    patterns.extend(bonus_tiles::check(context, &bonus));
    debug!("matched patterns: {:?}", patterns);

    FanResult {
        patterns,
        is_special_hand: false,
    }
}

// === Tier 1: Special Hands ===
mod special_hands {
    use super::*;

    /// The first whole-hand pattern that applies, in fixed priority order.
    pub fn check(
        decomposition: &HandDecomposition,
        context: &GameContext,
        bonus: &BonusCollection,
    ) -> Option<PatternId> {
        match decomposition.structure() {
            HandStructure::ThirteenOrphans { .. } => return Some(PatternId::ThirteenOrphans),
            HandStructure::SevenPairs { .. } => return Some(PatternId::SevenPairs),
            HandStructure::Standard { .. } => {}
        }

        match (context.win_type, context.is_dealer) {
            (WinType::BlessingOfHeaven, true) => return Some(PatternId::BlessingOfHeaven),
            (WinType::BlessingOfEarth, false) => return Some(PatternId::BlessingOfEarth),
            (WinType::BlessingOfMan, false) => return Some(PatternId::BlessingOfMan),
            _ => {}
        }

        if is_nine_gates(decomposition) {
            return Some(PatternId::NineGates);
        }

        match bonus.total() {
            8 => Some(PatternId::EightFlowers),
            7 => Some(PatternId::SevenFlowers),
            _ => None,
        }
    }

    /// 1112345678999 of one suit plus any 14th tile of that suit.
    pub fn is_nine_gates(decomposition: &HandDecomposition) -> bool {
        let tiles = decomposition.regular_tiles();
        let Some(suit) = tiles.first().and_then(|t| t.face.suit()) else {
            return false;
        };
        if tiles.len() != 14 || tiles.iter().any(|t| t.face.suit() != Some(suit)) {
            return false;
        }

        let mut counts = [0u8; 10];
        for tile in &tiles {
            match tile.face.number().and_then(|n| counts.get_mut(n as usize)) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        counts[1] >= 3 && counts[9] >= 3 && (2..=8).all(|n| counts[n] >= 1)
    }
}

// === Tier 2: Win Actions ===
mod win_actions {
    use super::*;

    pub fn check(context: &GameContext) -> Vec<PatternId> {
        let mut patterns = Vec::new();
        match context.win_type {
            WinType::SelfPick => patterns.push(PatternId::SelfPick),
            WinType::KongReplacement => patterns.push(PatternId::KongReplacement),
            WinType::DoubleKongReplacement => patterns.push(PatternId::DoubleKongReplacement),
            WinType::RobbingTheKong => patterns.push(PatternId::RobbingTheKong),
            WinType::MoonUnderTheSea => patterns.push(PatternId::MoonUnderTheSea),
            _ => {}
        }
        if context.fully_concealed_hand && context.win_type == WinType::Discard {
            patterns.push(PatternId::ConcealedHand);
        }
        patterns
    }
}

// === Tier 3: Single Set Type ===
mod set_types {
    use super::*;

    /// At most one of the set-type patterns, highest first.
    pub fn check(decomposition: &HandDecomposition, context: &GameContext) -> Option<PatternId> {
        let melds = decomposition.melds();
        if melds.is_empty() {
            return None;
        }
        let all_of = |meld_type: MeldType| melds.iter().all(|m| m.meld_type() == meld_type);

        if all_of(MeldType::Quadruplet) {
            Some(PatternId::AllQuadruplets)
        } else if all_of(MeldType::Triplet)
            && decomposition.all_concealed()
            && context.fully_concealed_hand
        {
            Some(PatternId::AllConcealedTriplets)
        } else if all_of(MeldType::Triplet) {
            Some(PatternId::AllTriplets)
        } else if all_of(MeldType::Sequence) {
            Some(PatternId::AllSequences)
        } else {
            None
        }
    }
}

// === Tier 4a: Dragons and Winds ===
mod honour_tiles {
    use super::*;

    pub fn check(decomposition: &HandDecomposition, context: &GameContext) -> Vec<PatternId> {
        let mut patterns = Vec::new();
        let triplet_faces: Vec<TileFace> = decomposition
            .melds()
            .iter()
            .filter(|m| m.meld_type().is_triplet_like())
            .map(|m| m.face())
            .collect();
        let pair_face = decomposition.pair().map(|p| p.face());

        // --- Dragons ---
        let dragon_triplets = triplet_faces
            .iter()
            .filter(|f| matches!(f, TileFace::Dragon(_)))
            .count();
        let dragon_pair = matches!(pair_face, Some(TileFace::Dragon(_)));
        match (dragon_triplets, dragon_pair) {
            (3, _) => patterns.push(PatternId::BigThreeDragons),
            (2, true) => patterns.push(PatternId::SmallThreeDragons),
            (n, _) => patterns.extend(std::iter::repeat_n(PatternId::Dragon, n)),
        }

        // --- Winds ---
        let wind_triplets: Vec<_> = triplet_faces
            .iter()
            .filter_map(|f| match f {
                TileFace::Wind(w) => Some(*w),
                _ => None,
            })
            .collect();
        let wind_pair = matches!(pair_face, Some(TileFace::Wind(_)));
        match (wind_triplets.len(), wind_pair) {
            (4, _) => patterns.push(PatternId::BigFourWinds),
            (3, true) => patterns.push(PatternId::SmallFourWinds),
            _ => {
                for wind in wind_triplets {
                    if wind == context.round_wind {
                        patterns.push(PatternId::RoundWind);
                    }
                    if wind == context.seat_wind {
                        patterns.push(PatternId::SeatWind);
                    }
                }
            }
        }

        patterns
    }
}

// === Tier 4b: Suit and Terminal Purity ===
mod suit_and_terminals {
    use super::*;

    pub fn check(decomposition: &HandDecomposition) -> Vec<PatternId> {
        let mut patterns = Vec::new();
        let tiles = decomposition.regular_tiles();
        if tiles.is_empty() {
            return patterns;
        }

        let suits: BTreeSet<Suit> = tiles.iter().filter_map(|t| t.face.suit()).collect();
        let honours = tiles.iter().filter(|t| t.is_honour()).count();

        if honours == tiles.len() {
            patterns.push(PatternId::AllHonours);
        } else if suits.len() == 1 && honours == 0 {
            patterns.push(PatternId::FullFlush);
        } else if suits.len() == 1 {
            patterns.push(PatternId::MixedFlush);
        }

        // Independent of the suit check; all honours also reads as mixed terminals.
        if tiles.iter().all(|t| t.is_terminal()) {
            patterns.push(PatternId::AllTerminals);
        } else if honours > 0 && tiles.iter().all(|t| t.is_terminal() || t.is_honour()) {
            patterns.push(PatternId::MixedTerminals);
        }

        patterns
    }
}

// === Tier 5: Flowers and Seasons ===
mod bonus_tiles {
    use super::*;

    pub fn check(context: &GameContext, bonus: &BonusCollection) -> Vec<PatternId> {
        if context.no_flowers_seasons {
            return vec![PatternId::NoFlowersSeasons];
        }

        let mut patterns = Vec::new();
        if bonus.flowers.len() == 4 {
            patterns.push(PatternId::AllFlowers);
        }
        if bonus.seasons.len() == 4 {
            patterns.push(PatternId::AllSeasons);
        }

        // Seat N owns flower N and season N
        let seat = context.seat_number;
        if Flower::from_seat_number(seat).is_some_and(|f| bonus.flowers.contains(&f)) {
            patterns.push(PatternId::SeatFlower);
        }
        if Season::from_seat_number(seat).is_some_and(|s| bonus.seasons.contains(&s)) {
            patterns.push(PatternId::SeatSeason);
        }
        patterns
    }
}
