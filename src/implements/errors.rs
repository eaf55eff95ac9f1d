use thiserror::Error;

use super::types::hand::MeldType;
use super::types::tiles::Tile;

/// Why a tile list could not be turned into a scored hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("Invalid hand: expected 13 or 14 regular tiles, found {found}")]
    TileCount { found: usize },

    #[error("Invalid hand: {tile} appears {count} times, at most 4 copies exist")]
    TooManyCopies { tile: Tile, count: usize },

    #[error("Invalid hand: {tile} has a value outside 1-9")]
    TileValue { tile: Tile },

    #[error("Invalid hand: {found} bonus tiles, at most 8 exist")]
    TooManyBonusTiles { found: usize },

    #[error("Invalid hand: {tile} is not a flower or season")]
    NotABonusTile { tile: Tile },

    #[error("Invalid hand: no winning decomposition found")]
    NoWinningShape,

    #[error("Invalid meld: tiles do not form a {meld_type:?}")]
    InvalidMeld { meld_type: MeldType },

    #[error("Invalid pair: {first} and {second} are not equal")]
    InvalidPair { first: Tile, second: Tile },

    #[error("Invalid context: {message}")]
    InvalidContext { message: String },
}

impl HandError {
    /// `true` for every error about the tiles themselves, `false` for context errors.
    pub fn is_structural(&self) -> bool {
        !matches!(self, HandError::InvalidContext { .. })
    }
}

/// Failure to read tile notation or one of the named context values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Parse error on '{input}': unknown tile code")]
    UnknownTile { input: String },

    #[error("Parse error on '{input}': expected one of {expected}")]
    UnknownName { input: String, expected: &'static str },
}
