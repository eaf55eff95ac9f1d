//! Hong Kong mahjong hand calculator.
//!
//! Decomposes a winning hand into melds and a pair (or one of the special
//! shapes) and scores it in fan against the Hong Kong pattern table.

pub mod implements;
pub use implements::*;
