//! # Hong Kong Scoring Pattern Catalogue
//!
//! Every pattern the fan checker can award, as a read-only table. The table
//! is indexed by `PatternId`, so the entry order must follow the enum.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
/// The six precedence tiers, in evaluation order.
pub enum PatternTier {
    SpecialHand,
    WinAction,
    SingleSetType,
    HonourTiles,
    SuitAndTerminal,
    BonusTiles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternId {
    // --- Special hands (short-circuit) ---
    ThirteenOrphans,
    SevenPairs,
    BlessingOfHeaven,
    BlessingOfEarth,
    BlessingOfMan,
    NineGates,
    EightFlowers,
    SevenFlowers,

    // --- Win actions ---
    SelfPick,
    KongReplacement,
    DoubleKongReplacement,
    ConcealedHand,
    RobbingTheKong,
    MoonUnderTheSea,

    // --- Single set type ---
    AllQuadruplets,
    AllConcealedTriplets,
    AllTriplets,
    AllSequences,

    // --- Honour tiles ---
    Dragon,
    SmallThreeDragons,
    BigThreeDragons,
    RoundWind,
    SeatWind,
    SmallFourWinds,
    BigFourWinds,

    // --- Suit and terminal purity ---
    AllHonours,
    FullFlush,
    MixedFlush,
    AllTerminals,
    MixedTerminals,

    // --- Flowers and seasons ---
    NoFlowersSeasons,
    AllFlowers,
    AllSeasons,
    SeatFlower,
    SeatSeason,
}

impl PatternId {
    pub fn pattern(self) -> &'static ScorePattern {
        &CATALOGUE[self as usize]
    }

    pub fn fan(self) -> u32 {
        self.pattern().fan
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePattern {
    pub id: PatternId,
    pub tier: PatternTier,
    pub name: &'static str,
    pub name_zh: &'static str,
    pub fan: u32,
    pub description: &'static str,
}

const fn entry(
    id: PatternId,
    tier: PatternTier,
    name: &'static str,
    name_zh: &'static str,
    fan: u32,
    description: &'static str,
) -> ScorePattern {
    ScorePattern {
        id,
        tier,
        name,
        name_zh,
        fan,
        description,
    }
}

use PatternId as P;
use PatternTier as T;

pub static CATALOGUE: [ScorePattern; 35] = [
    entry(P::ThirteenOrphans, T::SpecialHand, "Thirteen Orphans", "十三么", 13,
        "One of each one, nine, wind and dragon, plus a 14th tile matching one of them"),
    entry(P::SevenPairs, T::SpecialHand, "Seven Pairs", "七對子", 4,
        "Seven pairs"),
    entry(P::BlessingOfHeaven, T::SpecialHand, "Blessing of Heaven", "天糊", 13,
        "As dealer, your beginning hand wins"),
    entry(P::BlessingOfEarth, T::SpecialHand, "Blessing of Earth", "地糊", 13,
        "As non-dealer, you win using the dealer's first discard"),
    entry(P::BlessingOfMan, T::SpecialHand, "Blessing of Man", "人糊", 13,
        "As non-dealer, you win on your first turn with a self-pick"),
    entry(P::NineGates, T::SpecialHand, "Nine Gates", "九連寶燈", 13,
        "111 2345678 999 of a single suit, plus a 14th tile of the same suit"),
    entry(P::EightFlowers, T::SpecialHand, "Eight Flowers", "大花糊", 8,
        "Collected all 8 bonus tiles (4 flowers + 4 seasons)"),
    entry(P::SevenFlowers, T::SpecialHand, "Seven Flowers", "花糊", 3,
        "Collected 7 bonus tiles"),

    entry(P::SelfPick, T::WinAction, "Self-Pick", "自摸", 1,
        "You drew your winning tile from the wall"),
    entry(P::KongReplacement, T::WinAction, "Win by Kong Replacement", "槓上開花", 1,
        "Your winning tile is the replacement drawn after a kong"),
    entry(P::DoubleKongReplacement, T::WinAction, "Double Kong Replacement", "槓上槓", 9,
        "You won on the replacement tile of a second kong made from a first replacement"),
    entry(P::ConcealedHand, T::WinAction, "Concealed Hand", "門前清", 1,
        "You took no tiles from other players and won on a discard"),
    entry(P::RobbingTheKong, T::WinAction, "Robbing the Kong", "搶槓", 1,
        "You won on the tile another player added to a pong to make a kong"),
    entry(P::MoonUnderTheSea, T::WinAction, "Moon Under The Sea", "海底撈月", 1,
        "Your winning tile was the last tile in the wall"),

    entry(P::AllQuadruplets, T::SingleSetType, "All Quadruplets", "四槓子", 13,
        "All four sets are quadruplets"),
    entry(P::AllConcealedTriplets, T::SingleSetType, "All Concealed Triplets", "四暗刻", 8,
        "All four sets are triplets"),
    entry(P::AllTriplets, T::SingleSetType, "All Triplets", "對對糊", 3,
        "All sets are triplets"),
    entry(P::AllSequences, T::SingleSetType, "All Sequences", "平糊", 1,
        "All sets are sequences"),

    entry(P::Dragon, T::HonourTiles, "Dragon", "三元牌", 1,
        "A triplet of dragon tiles, scored per triplet"),
    entry(P::SmallThreeDragons, T::HonourTiles, "Small Three Dragons", "小三元", 5,
        "Two dragon triplets and a pair of the third dragon"),
    entry(P::BigThreeDragons, T::HonourTiles, "Big Three Dragons", "大三元", 8,
        "Three dragon triplets"),
    entry(P::RoundWind, T::HonourTiles, "Round Wind", "圈風", 1,
        "A triplet of the round wind"),
    entry(P::SeatWind, T::HonourTiles, "Seat Wind", "門風", 1,
        "A triplet of your seat wind"),
    entry(P::SmallFourWinds, T::HonourTiles, "Small Four Winds", "小四喜", 6,
        "Three wind triplets and a pair of the fourth wind"),
    entry(P::BigFourWinds, T::HonourTiles, "Big Four Winds", "大四喜", 13,
        "Four wind triplets"),

    entry(P::AllHonours, T::SuitAndTerminal, "All Honours", "字一色", 10,
        "Your hand contains only honour tiles"),
    entry(P::FullFlush, T::SuitAndTerminal, "Full Flush", "清一色", 7,
        "Your hand contains only one suit"),
    entry(P::MixedFlush, T::SuitAndTerminal, "Mixed Flush", "混一色", 3,
        "Your hand contains only one suit plus honours"),
    entry(P::AllTerminals, T::SuitAndTerminal, "All Terminals", "清么九", 13,
        "Your hand contains only ones and nines"),
    entry(P::MixedTerminals, T::SuitAndTerminal, "Mixed Terminals", "混么九", 4,
        "Your hand contains only ones, nines and honours"),

    entry(P::NoFlowersSeasons, T::BonusTiles, "No Flowers or Seasons", "無花", 1,
        "You have no flowers or seasons"),
    entry(P::AllFlowers, T::BonusTiles, "All Flowers", "一檯花", 2,
        "Collected all 4 flowers"),
    entry(P::AllSeasons, T::BonusTiles, "All Seasons", "一檯花", 2,
        "Collected all 4 seasons"),
    entry(P::SeatFlower, T::BonusTiles, "Seat Flower", "正花", 1,
        "The flower of your seat number"),
    entry(P::SeatSeason, T::BonusTiles, "Seat Season", "正花", 1,
        "The season of your seat number"),
];
