/// # Core Tile Definitions
///
/// This module defines the most basic components of a Hong Kong mahjong tile,
/// the text notation used for input, and the flower/season seat mapping.
pub mod tiles {
    use serde::{Deserialize, Serialize};
    use std::fmt;
    use std::hash::{Hash, Hasher};
    use std::str::FromStr;

    use crate::implements::errors::ParseError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    /// Represents the three numbered suits.
    pub enum Suit {
        Dot,       // 筒子 (Circles)
        Bamboo,    // 索子 (Sticks)
        Character, // 萬子 (Man)
    }

    impl Suit {
        pub const ALL: [Suit; 3] = [Suit::Dot, Suit::Bamboo, Suit::Character];

        fn code(self) -> char {
            match self {
                Suit::Dot => 'd',
                Suit::Bamboo => 'b',
                Suit::Character => 'c',
            }
        }

        fn from_code(c: char) -> Option<Suit> {
            match c {
                'd' => Some(Suit::Dot),
                'b' => Some(Suit::Bamboo),
                'c' => Some(Suit::Character),
                _ => None,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    /// Represents the four wind directions.
    pub enum Wind {
        East,  // 東
        South, // 南
        West,  // 西
        North, // 北
    }

    impl Wind {
        pub const ALL: [Wind; 4] = [Wind::East, Wind::South, Wind::West, Wind::North];

        fn code(self) -> &'static str {
            match self {
                Wind::East => "E",
                Wind::South => "S",
                Wind::West => "W",
                Wind::North => "N",
            }
        }
    }

    impl FromStr for Wind {
        type Err = ParseError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "east" | "e" => Ok(Wind::East),
                "south" | "s" => Ok(Wind::South),
                "west" | "w" => Ok(Wind::West),
                "north" | "n" => Ok(Wind::North),
                _ => Err(ParseError::UnknownName {
                    input: s.to_string(),
                    expected: "east, south, west, north",
                }),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    /// Represents the three dragons.
    pub enum Dragon {
        Red,   // 中
        Green, // 發
        White, // 白
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    /// Flower bonus tiles. Flower N belongs to seat N.
    pub enum Flower {
        Plum,
        Orchid,
        #[serde(rename = "mum", alias = "chrysanthemum")]
        Chrysanthemum,
        Bamboo,
    }

    impl Flower {
        pub const ALL: [Flower; 4] = [
            Flower::Plum,
            Flower::Orchid,
            Flower::Chrysanthemum,
            Flower::Bamboo,
        ];

        /// The seat (1-4) this flower belongs to.
        pub fn seat_number(self) -> u8 {
            match self {
                Flower::Plum => 1,
                Flower::Orchid => 2,
                Flower::Chrysanthemum => 3,
                Flower::Bamboo => 4,
            }
        }

        pub fn from_seat_number(seat: u8) -> Option<Flower> {
            Flower::ALL.into_iter().find(|f| f.seat_number() == seat)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    /// Season bonus tiles. Season N belongs to seat N.
    pub enum Season {
        Spring,
        Summer,
        Autumn,
        Winter,
    }

    impl Season {
        pub const ALL: [Season; 4] = [
            Season::Spring,
            Season::Summer,
            Season::Autumn,
            Season::Winter,
        ];

        /// The seat (1-4) this season belongs to.
        pub fn seat_number(self) -> u8 {
            match self {
                Season::Spring => 1,
                Season::Summer => 2,
                Season::Autumn => 3,
                Season::Winter => 4,
            }
        }

        pub fn from_seat_number(seat: u8) -> Option<Season> {
            Season::ALL.into_iter().find(|s| s.seat_number() == seat)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    /// What is printed on a tile. Ordering is suit then value, then winds,
    /// dragons and bonus tiles; the decomposer sorts by it.
    pub enum TileFace {
        Suited(Suit, u8), // 数牌 (1-9)
        Wind(Wind),
        Dragon(Dragon),
        Flower(Flower),
        Season(Season),
    }

    impl TileFace {
        pub fn suit(self) -> Option<Suit> {
            match self {
                TileFace::Suited(suit, _) => Some(suit),
                _ => None,
            }
        }

        pub fn number(self) -> Option<u8> {
            match self {
                TileFace::Suited(_, n) => Some(n),
                _ => None,
            }
        }

        pub fn is_suited(self) -> bool {
            matches!(self, TileFace::Suited(..))
        }

        /// `false` only for a suited face built with a value outside 1-9.
        pub fn is_valid(self) -> bool {
            match self {
                TileFace::Suited(_, n) => (1..=9).contains(&n),
                _ => true,
            }
        }

        /// Wind or dragon.
        pub fn is_honour(self) -> bool {
            matches!(self, TileFace::Wind(_) | TileFace::Dragon(_))
        }

        /// A suited 1 or 9.
        pub fn is_terminal(self) -> bool {
            matches!(self, TileFace::Suited(_, 1) | TileFace::Suited(_, 9))
        }

        /// Flower or season.
        pub fn is_bonus(self) -> bool {
            matches!(self, TileFace::Flower(_) | TileFace::Season(_))
        }

        /// The face `step` values higher in the same suit, if it exists.
        pub fn next_in_suit(self, step: u8) -> Option<TileFace> {
            match self {
                TileFace::Suited(suit, n) => n
                    .checked_add(step)
                    .filter(|next| *next <= 9)
                    .map(|next| TileFace::Suited(suit, next)),
                _ => None,
            }
        }
    }

    impl fmt::Display for TileFace {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                TileFace::Suited(suit, n) => write!(f, "{}{}", n, suit.code()),
                TileFace::Wind(w) => write!(f, "{}", w.code()),
                TileFace::Dragon(Dragon::Red) => write!(f, "Rd"),
                TileFace::Dragon(Dragon::Green) => write!(f, "Gd"),
                TileFace::Dragon(Dragon::White) => write!(f, "Wd"),
                TileFace::Flower(fl) => write!(f, "F{}", fl.seat_number()),
                TileFace::Season(s) => write!(f, "S{}", s.seat_number()),
            }
        }
    }

    impl FromStr for TileFace {
        type Err = ParseError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let unknown = || ParseError::UnknownTile { input: s.to_string() };
            let face = match s {
                "E" => TileFace::Wind(Wind::East),
                "S" => TileFace::Wind(Wind::South),
                "W" => TileFace::Wind(Wind::West),
                "N" => TileFace::Wind(Wind::North),
                "Rd" => TileFace::Dragon(Dragon::Red),
                "Gd" => TileFace::Dragon(Dragon::Green),
                "Wd" => TileFace::Dragon(Dragon::White),
                _ => {
                    let mut chars = s.chars();
                    let (first, second) = match (chars.next(), chars.next(), chars.next()) {
                        (Some(a), Some(b), None) => (a, b),
                        _ => return Err(unknown()),
                    };
                    match (first, second.to_digit(10)) {
                        ('F', Some(seat)) => TileFace::Flower(
                            Flower::from_seat_number(seat as u8).ok_or_else(unknown)?,
                        ),
                        ('S', Some(seat)) => TileFace::Season(
                            Season::from_seat_number(seat as u8).ok_or_else(unknown)?,
                        ),
                        _ => {
                            let n = first
                                .to_digit(10)
                                .filter(|n| (1..=9).contains(n))
                                .ok_or_else(unknown)?;
                            let suit = Suit::from_code(second).ok_or_else(unknown)?;
                            TileFace::Suited(suit, n as u8)
                        }
                    }
                }
            };
            Ok(face)
        }
    }

    /// The 13 distinct terminal and honour faces.
    pub const THIRTEEN_ORPHANS: [TileFace; 13] = [
        TileFace::Suited(Suit::Dot, 1),
        TileFace::Suited(Suit::Dot, 9),
        TileFace::Suited(Suit::Bamboo, 1),
        TileFace::Suited(Suit::Bamboo, 9),
        TileFace::Suited(Suit::Character, 1),
        TileFace::Suited(Suit::Character, 9),
        TileFace::Wind(Wind::East),
        TileFace::Wind(Wind::South),
        TileFace::Wind(Wind::West),
        TileFace::Wind(Wind::North),
        TileFace::Dragon(Dragon::Red),
        TileFace::Dragon(Dragon::Green),
        TileFace::Dragon(Dragon::White),
    ];

    #[derive(Debug, Clone, Copy, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    /// A single physical tile. Equality and hashing look at the face only, so
    /// a concealed 5 dot equals an exposed one.
    pub struct Tile {
        pub face: TileFace,
        pub concealed: bool,
    }

    impl Tile {
        /// A concealed tile with the given face.
        pub fn new(face: TileFace) -> Self {
            Tile { face, concealed: true }
        }

        pub fn suited(suit: Suit, n: u8) -> Self {
            Tile::new(TileFace::Suited(suit, n))
        }

        pub fn wind(wind: Wind) -> Self {
            Tile::new(TileFace::Wind(wind))
        }

        pub fn dragon(dragon: Dragon) -> Self {
            Tile::new(TileFace::Dragon(dragon))
        }

        pub fn flower(flower: Flower) -> Self {
            Tile::new(TileFace::Flower(flower))
        }

        pub fn season(season: Season) -> Self {
            Tile::new(TileFace::Season(season))
        }

        /// The same tile, marked as taken from another player.
        pub fn exposed(self) -> Self {
            Tile { concealed: false, ..self }
        }

        pub fn is_honour(&self) -> bool {
            self.face.is_honour()
        }

        pub fn is_terminal(&self) -> bool {
            self.face.is_terminal()
        }

        pub fn is_bonus(&self) -> bool {
            self.face.is_bonus()
        }
    }

    impl PartialEq for Tile {
        fn eq(&self, other: &Self) -> bool {
            self.face == other.face
        }
    }

    impl Eq for Tile {}

    impl Hash for Tile {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.face.hash(state);
        }
    }

    impl fmt::Display for Tile {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if !self.concealed {
                write!(f, "*")?;
            }
            write!(f, "{}", self.face)
        }
    }

    impl FromStr for Tile {
        type Err = ParseError;

        /// `5d`, `E`, `Rd`, `F2`; a leading `*` marks an exposed tile.
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.strip_prefix('*') {
                Some(rest) => Ok(Tile::new(rest.parse()?).exposed()),
                None => Ok(Tile::new(s.parse()?)),
            }
        }
    }

    impl TryFrom<String> for Tile {
        type Error = ParseError;

        fn try_from(s: String) -> Result<Self, Self::Error> {
            s.parse()
        }
    }

    impl From<Tile> for String {
        fn from(tile: Tile) -> String {
            tile.to_string()
        }
    }

    /// Parses a whitespace separated list of tile codes.
    pub fn parse_tiles(s: &str) -> Result<Vec<Tile>, ParseError> {
        s.split_whitespace().map(str::parse).collect()
    }

}

/// # Hand Structure and Composition
///
/// This module defines melds, pairs and the decomposer's output.
pub mod hand {
    use serde::Serialize;

    use super::tiles::{Tile, TileFace};
    use crate::implements::errors::HandError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(rename_all = "lowercase")]
    /// Represents the type of a meld (group of tiles).
    pub enum MeldType {
        Sequence,   // 順子
        Triplet,    // 刻子
        Quadruplet, // 槓子
    }

    impl MeldType {
        pub fn arity(self) -> usize {
            match self {
                MeldType::Sequence | MeldType::Triplet => 3,
                MeldType::Quadruplet => 4,
            }
        }

        /// Triplets and quadruplets both count as "triplets" for honour scoring.
        pub fn is_triplet_like(self) -> bool {
            matches!(self, MeldType::Triplet | MeldType::Quadruplet)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    /// A single meld. Sequence tiles are stored low to high.
    pub struct Meld {
        meld_type: MeldType,
        tiles: Vec<Tile>,
    }

    impl Meld {
        /// Builds a meld, checking arity, kind and shape.
        pub fn new(meld_type: MeldType, mut tiles: Vec<Tile>) -> Result<Self, HandError> {
            let invalid = HandError::InvalidMeld { meld_type };
            let unusable = |t: &Tile| t.is_bonus() || !t.face.is_valid();
            if tiles.len() != meld_type.arity() || tiles.iter().any(unusable) {
                return Err(invalid);
            }
            match meld_type {
                MeldType::Triplet | MeldType::Quadruplet => {
                    if tiles.iter().any(|t| *t != tiles[0]) {
                        return Err(invalid);
                    }
                }
                MeldType::Sequence => {
                    tiles.sort_by_key(|t| t.face);
                    let first = tiles[0].face;
                    let consecutive = first.is_suited()
                        && first.next_in_suit(1) == Some(tiles[1].face)
                        && first.next_in_suit(2) == Some(tiles[2].face);
                    if !consecutive {
                        return Err(invalid);
                    }
                }
            }
            Ok(Meld { meld_type, tiles })
        }

        /// For the decomposer, which only assembles shapes it has already checked.
        pub(crate) fn new_unchecked(meld_type: MeldType, tiles: Vec<Tile>) -> Self {
            Meld { meld_type, tiles }
        }

        pub fn meld_type(&self) -> MeldType {
            self.meld_type
        }

        pub fn tiles(&self) -> &[Tile] {
            &self.tiles
        }

        /// The lowest face in the meld (the only face, unless a sequence).
        pub fn face(&self) -> TileFace {
            self.tiles[0].face
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    /// Two equal tiles.
    pub struct Pair {
        tiles: [Tile; 2],
    }

    impl Pair {
        pub fn new(first: Tile, second: Tile) -> Result<Self, HandError> {
            if first != second || first.is_bonus() || !first.face.is_valid() {
                return Err(HandError::InvalidPair { first, second });
            }
            Ok(Pair { tiles: [first, second] })
        }

        pub(crate) fn new_unchecked(first: Tile, second: Tile) -> Self {
            Pair { tiles: [first, second] }
        }

        pub fn tiles(&self) -> &[Tile; 2] {
            &self.tiles
        }

        pub fn face(&self) -> TileFace {
            self.tiles[0].face
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "camelCase")]
    /// Represents the recognized structure of a winning hand.
    pub enum HandStructure {
        /// Four melds and one pair.
        Standard { melds: [Meld; 4], pair: Pair },
        /// 七對子 (Seven Pairs)
        SevenPairs { pairs: [Pair; 7] },
        /// 十三么 (Thirteen Orphans)
        ThirteenOrphans { tiles: [Tile; 14] },
    }

    impl HandStructure {
        /// Every regular tile in the structure.
        pub fn tiles(&self) -> Vec<Tile> {
            match self {
                HandStructure::Standard { melds, pair } => melds
                    .iter()
                    .flat_map(|m| m.tiles().iter().copied())
                    .chain(pair.tiles().iter().copied())
                    .collect(),
                HandStructure::SevenPairs { pairs } => {
                    pairs.iter().flat_map(|p| p.tiles().iter().copied()).collect()
                }
                HandStructure::ThirteenOrphans { tiles } => tiles.to_vec(),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "camelCase")]
    /// The decomposer's output: a winning structure plus the bonus tiles set aside.
    pub struct HandDecomposition {
        structure: HandStructure,
        bonus_tiles: Vec<Tile>,
        all_concealed: bool,
    }

    impl HandDecomposition {
        /// Wraps a structure, deriving `all_concealed` from its tiles.
        pub fn new(structure: HandStructure, bonus_tiles: Vec<Tile>) -> Result<Self, HandError> {
            if let Some(tile) = bonus_tiles.iter().find(|t| !t.is_bonus()) {
                return Err(HandError::NotABonusTile { tile: *tile });
            }
            if bonus_tiles.len() > 8 {
                return Err(HandError::TooManyBonusTiles {
                    found: bonus_tiles.len(),
                });
            }
            let all_concealed = structure.tiles().iter().all(|t| t.concealed);
            Ok(HandDecomposition {
                structure,
                bonus_tiles,
                all_concealed,
            })
        }

        pub fn structure(&self) -> &HandStructure {
            &self.structure
        }

        pub fn bonus_tiles(&self) -> &[Tile] {
            &self.bonus_tiles
        }

        pub fn all_concealed(&self) -> bool {
            self.all_concealed
        }

        pub fn regular_tiles(&self) -> Vec<Tile> {
            self.structure.tiles()
        }

        /// The four melds of a standard hand, empty for the special shapes.
        pub fn melds(&self) -> &[Meld] {
            match &self.structure {
                HandStructure::Standard { melds, .. } => melds.as_slice(),
                _ => &[],
            }
        }

        pub fn pair(&self) -> Option<&Pair> {
            match &self.structure {
                HandStructure::Standard { pair, .. } => Some(pair),
                _ => None,
            }
        }
    }

}

/// # Game State and Context
///
/// This module defines the situation a hand was won in. The caller supplies
/// every field; nothing here has a default.
pub mod game {
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use super::tiles::{Flower, Season, Wind};
    use crate::implements::errors::{HandError, ParseError};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    /// Represents how the hand was won.
    pub enum WinType {
        #[serde(rename = "selfPick")]
        SelfPick, // 自摸
        #[serde(rename = "discard")]
        Discard, // 食糊
        #[serde(rename = "kongReplacement")]
        KongReplacement, // 槓上開花
        #[serde(rename = "doubleKongReplacement")]
        DoubleKongReplacement, // 槓上槓
        #[serde(rename = "robbingKong")]
        RobbingTheKong, // 搶槓
        #[serde(rename = "moonUnderSea")]
        MoonUnderTheSea, // 海底撈月
        #[serde(rename = "heaven")]
        BlessingOfHeaven, // 天糊
        #[serde(rename = "earth")]
        BlessingOfEarth, // 地糊
        #[serde(rename = "man")]
        BlessingOfMan, // 人糊
    }

    impl FromStr for WinType {
        type Err = ParseError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|_| {
                ParseError::UnknownName {
                    input: s.to_string(),
                    expected: "selfPick, discard, kongReplacement, doubleKongReplacement, \
                               robbingKong, moonUnderSea, heaven, earth, man",
                }
            })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    /// Context for the winning player and the current round.
    pub struct GameContext {
        pub win_type: WinType,
        pub seat_wind: Wind,  // 門風
        pub round_wind: Wind, // 圈風
        /// 1-4; selects the seat flower and season.
        pub seat_number: u8,
        pub is_dealer: bool,
        /// No pong, chow or kong was called from a discard.
        pub fully_concealed_hand: bool,
        pub flowers: BTreeSet<Flower>,
        pub seasons: BTreeSet<Season>,
        /// The player declares they hold no flowers or seasons.
        pub no_flowers_seasons: bool,
    }

    impl GameContext {
        /// Rejects the fields the type system cannot rule out.
        pub fn validate(&self) -> Result<(), HandError> {
            if !(1..=4).contains(&self.seat_number) {
                return Err(HandError::InvalidContext {
                    message: format!("seat number {} outside 1-4", self.seat_number),
                });
            }
            if self.no_flowers_seasons && !(self.flowers.is_empty() && self.seasons.is_empty()) {
                return Err(HandError::InvalidContext {
                    message: "no flowers or seasons declared, but some were listed".to_string(),
                });
            }
            Ok(())
        }
    }

}

/// # Input Format
///
/// The JSON document the command line reads: raw tiles plus context.
pub mod input {
    use serde::{Deserialize, Serialize};

    use super::game::GameContext;
    use super::tiles::Tile;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HandInput {
        pub tiles: Vec<Tile>,
        pub context: GameContext,
    }
}

/// # Scoring Results
///
/// This module defines the final output of a score calculation.
pub mod scoring {
    use serde::Serialize;
    use std::fmt;

    use crate::implements::catalogue::ScorePattern;
    use crate::implements::score_calculator::MINIMUM_FAN;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "camelCase")]
    /// Represents the complete scoring result for a winning hand.
    pub struct ScoreResult {
        pub total_fan: u32,
        pub matched_patterns: Vec<&'static ScorePattern>,
        /// Doubling-table payment for `min(total_fan, 13)`.
        pub payment: u32,
        /// At least the table minimum of 3 fan.
        pub meets_minimum: bool,
        /// A whole-hand pattern replaced additive scoring.
        pub is_special_hand: bool,
    }

    impl fmt::Display for ScoreResult {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if self.meets_minimum {
                writeln!(f, "{} Fan - Winning hand!", self.total_fan)?;
            } else {
                writeln!(
                    f,
                    "{} Fan - Does not meet {} Fan minimum",
                    self.total_fan, MINIMUM_FAN
                )?;
            }
            for pattern in &self.matched_patterns {
                writeln!(
                    f,
                    "  {:<36} {:>2} Fan  {}",
                    format!("{} ({})", pattern.name, pattern.name_zh),
                    pattern.fan,
                    pattern.description
                )?;
            }
            write!(f, "Payment: {}", self.payment)
        }
    }
}
