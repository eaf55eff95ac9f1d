use log::{debug, trace};

use super::errors::HandError;
use super::types::{
    hand::{HandDecomposition, HandStructure, Meld, MeldType, Pair},
    tiles::{THIRTEEN_ORPHANS, Tile, TileFace},
};

// === Input Validation Module ===
mod input_validator {
    use super::*;
    use std::collections::HashMap;

    /// Checks the regular tile count and the physical copy limit.
    pub fn validate_regular_tiles(regular: &[Tile]) -> Result<(), HandError> {
        if regular.len() != 13 && regular.len() != 14 {
            return Err(HandError::TileCount {
                found: regular.len(),
            });
        }

        if let Some(tile) = regular.iter().find(|t| !t.face.is_valid()) {
            return Err(HandError::TileValue { tile: *tile });
        }

        let mut counts: HashMap<TileFace, usize> = HashMap::new();
        for tile in regular {
            *counts.entry(tile.face).or_default() += 1;
        }
        if let Some((face, count)) = counts
            .into_iter()
            .filter(|(_, count)| *count > 4)
            .min_by_key(|(face, _)| *face)
        {
            return Err(HandError::TooManyCopies {
                tile: Tile::new(face),
                count,
            });
        }

        Ok(())
    }

    pub fn validate_bonus_tiles(bonus: &[Tile]) -> Result<(), HandError> {
        if bonus.len() > 8 {
            return Err(HandError::TooManyBonusTiles { found: bonus.len() });
        }
        Ok(())
    }
}

// === Recursive Parsing Logic ===
mod recursive_parser {
    use super::*;

    /// Copies `tiles` without the entries at `used` (indices, any order).
    fn without(tiles: &[Tile], used: &[usize]) -> Vec<Tile> {
        tiles
            .iter()
            .enumerate()
            .filter(|(i, _)| !used.contains(i))
            .map(|(_, t)| *t)
            .collect()
    }

    /// Indices of a sequence starting at `tiles[0]`: the first copy of each
    /// of the next two values in the same suit.
    fn sequence_from_first(tiles: &[Tile]) -> Option<[usize; 3]> {
        let first = tiles[0].face;
        if !first.is_suited() || first.number()? > 7 {
            return None;
        }
        let second = first.next_in_suit(1)?;
        let third = first.next_in_suit(2)?;
        let i2 = tiles.iter().position(|t| t.face == second)?;
        let i3 = tiles.iter().position(|t| t.face == third)?;
        Some([0, i2, i3])
    }

    /// Partitions `tiles` entirely into melds, always extending the first tile.
    /// Tries a sequence, then a triplet, then a quadruplet, backtracking on failure.
    pub fn find_melds_recursive(tiles: &[Tile], melds: &mut Vec<Meld>) -> bool {
        if tiles.is_empty() {
            return true;
        } // Success: all tiles used up
        if tiles.len() < 3 {
            return false;
        }

        // --- Try to form a Sequence ---
        if let Some(used) = sequence_from_first(tiles) {
            let group = used.iter().map(|&i| tiles[i]).collect();
            melds.push(Meld::new_unchecked(MeldType::Sequence, group));
            if find_melds_recursive(&without(tiles, &used), melds) {
                return true;
            }
            // Backtrack
            melds.pop();
        }

        let same: Vec<usize> = tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == tiles[0])
            .map(|(i, _)| i)
            .collect();

        // --- Try to form a Triplet, then a Quadruplet ---
        for meld_type in [MeldType::Triplet, MeldType::Quadruplet] {
            let arity = meld_type.arity();
            if same.len() < arity {
                continue;
            }
            let used = &same[..arity];
            let group = used.iter().map(|&i| tiles[i]).collect();
            melds.push(Meld::new_unchecked(meld_type, group));
            if find_melds_recursive(&without(tiles, used), melds) {
                return true;
            }
            // Backtrack
            melds.pop();
        }

        false
    }

    /// Four melds and a pair. Each distinct face is tried once as the pair,
    /// lowest first; the first full partition wins.
    pub fn find_standard(tiles: &[Tile]) -> Option<HandStructure> {
        if tiles.len() != 14 {
            return None;
        }

        let mut tried: Vec<TileFace> = Vec::new();
        for i in 0..tiles.len() - 1 {
            for j in (i + 1)..tiles.len() {
                if tiles[i] != tiles[j] || tried.contains(&tiles[i].face) {
                    continue;
                }
                tried.push(tiles[i].face);

                let remaining = without(tiles, &[i, j]);
                let mut melds: Vec<Meld> = Vec::with_capacity(4);
                if find_melds_recursive(&remaining, &mut melds) && melds.len() == 4 {
                    debug!("standard shape found with pair {}", tiles[i].face);
                    let melds: [Meld; 4] = melds.try_into().ok()?;
                    return Some(HandStructure::Standard {
                        melds,
                        pair: Pair::new_unchecked(tiles[i], tiles[j]),
                    });
                }
                trace!("pair candidate {} leaves no meld partition", tiles[i].face);
            }
        }
        None
    }
}

// === Special Shapes ===
mod special_shapes {
    use super::*;

    /// Seven adjacent equal pairs in sorted order.
    pub fn find_seven_pairs(sorted: &[Tile]) -> Option<HandStructure> {
        if sorted.len() != 14 {
            return None;
        }
        let pairs: Vec<Pair> = sorted
            .chunks_exact(2)
            .map(|c| Pair::new(c[0], c[1]).ok())
            .collect::<Option<_>>()?;
        let pairs: [Pair; 7] = pairs.try_into().ok()?;
        debug!("seven pairs shape found");
        Some(HandStructure::SevenPairs { pairs })
    }

    /// One of each terminal and honour plus a duplicate of one of them.
    pub fn find_thirteen_orphans(tiles: &[Tile]) -> Option<HandStructure> {
        if tiles.len() != 14 {
            return None;
        }
        let mut rest = tiles.to_vec();
        let mut found = Vec::with_capacity(14);
        for face in THIRTEEN_ORPHANS {
            let index = rest.iter().position(|t| t.face == face)?;
            found.push(rest.remove(index));
        }

        // Exactly one tile is left over, and it repeats one of the thirteen
        let duplicate = rest.pop()?;
        if !THIRTEEN_ORPHANS.contains(&duplicate.face) {
            return None;
        }
        found.push(duplicate);
        debug!("thirteen orphans shape found, duplicate {}", duplicate.face);
        Some(HandStructure::ThirteenOrphans {
            tiles: found.try_into().ok()?,
        })
    }
}

// === Public Function ===

/// Decomposes a raw tile list into a winning structure.
///
/// Bonus tiles (flowers, seasons) are set aside first. The remaining tiles
/// are sorted by face, then matched against the standard shape, seven pairs
/// and thirteen orphans in that order; the first shape that fits is returned.
///
/// # Arguments
/// * `tiles` - Every tile of the hand, in any order, bonus tiles included.
pub fn decompose(tiles: &[Tile]) -> Result<HandDecomposition, HandError> {
    // 1. Separate bonus tiles from regular tiles
    let (bonus, mut regular): (Vec<Tile>, Vec<Tile>) = tiles.iter().partition(|t| t.is_bonus());

    // 2. Run all validation checks FIRST
    input_validator::validate_regular_tiles(&regular)?;
    input_validator::validate_bonus_tiles(&bonus)?;

    // 3. Stable sort: detection order only decides between equal tiles
    regular.sort_by_key(|t| t.face);

    // 4. Try each shape in priority order
    let structure = recursive_parser::find_standard(&regular)
        .or_else(|| special_shapes::find_seven_pairs(&regular))
        .or_else(|| special_shapes::find_thirteen_orphans(&regular))
        .ok_or(HandError::NoWinningShape)?;

    HandDecomposition::new(structure, bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implements::types::tiles::{Suit, parse_tiles};

    fn hand(codes: &str) -> Vec<Tile> {
        parse_tiles(codes).unwrap()
    }

    fn meld_summary(decomposition: &HandDecomposition) -> Vec<(MeldType, String)> {
        decomposition
            .melds()
            .iter()
            .map(|m| (m.meld_type(), m.face().to_string()))
            .collect()
    }

    #[test]
    fn decomposes_all_sequences_hand() {
        let d = decompose(&hand("1d 2d 3d 4b 5b 6b 7c 8c 9c 5d 6d 7d E E")).unwrap();
        assert_eq!(
            meld_summary(&d),
            vec![
                (MeldType::Sequence, "1d".to_string()),
                (MeldType::Sequence, "5d".to_string()),
                (MeldType::Sequence, "4b".to_string()),
                (MeldType::Sequence, "7c".to_string()),
            ]
        );
        assert_eq!(d.pair().unwrap().face().to_string(), "E");
        assert!(d.all_concealed());
    }

    #[test]
    fn input_order_does_not_matter() {
        let ordered = decompose(&hand("1d 2d 3d 4b 5b 6b 7c 8c 9c 5d 6d 7d E E")).unwrap();
        let shuffled = decompose(&hand("E 9c 6d 2d 5b 7d 1d E 8c 4b 3d 6b 7c 5d")).unwrap();
        assert_eq!(meld_summary(&ordered), meld_summary(&shuffled));
    }

    #[test]
    fn bonus_tiles_are_set_aside() {
        let d = decompose(&hand("F1 1d 2d 3d 4b 5b 6b S3 7c 8c 9c 5d 6d 7d E E")).unwrap();
        assert_eq!(d.bonus_tiles().len(), 2);
        assert_eq!(d.regular_tiles().len(), 14);
    }

    #[test]
    fn exposed_tile_clears_all_concealed() {
        let d = decompose(&hand("1d 2d 3d 4b 5b 6b 7c 8c 9c *5d *6d *7d E E")).unwrap();
        assert!(!d.all_concealed());
    }

    #[test]
    fn prefers_sequences_on_ambiguous_runs() {
        // 111222333d can be three triplets or three sequences; sequences come first.
        let d = decompose(&hand("1d 1d 1d 2d 2d 2d 3d 3d 3d 9c 9c 9c N N")).unwrap();
        let types: Vec<MeldType> = d.melds().iter().map(|m| m.meld_type()).collect();
        assert_eq!(
            types,
            vec![
                MeldType::Sequence,
                MeldType::Sequence,
                MeldType::Sequence,
                MeldType::Triplet
            ]
        );
    }

    #[test]
    fn lowest_pair_candidate_wins() {
        // Both 11d + 123d + 444d and 111d + 234d + 44d fit; 1d is the lower pair face.
        let d = decompose(&hand("1d 1d 1d 2d 3d 4d 4d 4d 5b 5b 5b Rd Rd Rd")).unwrap();
        assert_eq!(d.pair().unwrap().face().to_string(), "1d");
        assert_eq!(d.melds()[0].meld_type(), MeldType::Sequence);
        assert_eq!(d.melds()[0].face().to_string(), "1d");
    }

    #[test]
    fn seven_pairs_shape() {
        let d = decompose(&hand("1d 1d 5d 5d 9d 9d 2b 2b 7c 7c E E Rd Rd")).unwrap();
        assert!(matches!(d.structure(), HandStructure::SevenPairs { .. }));
        assert!(d.pair().is_none());
    }

    #[test]
    fn seven_pairs_in_standard_shape_stays_standard() {
        // Two each of 1d-7d also reads as 234d 234d 567d 567d + 11d; standard is tried first.
        let d = decompose(&hand("1d 1d 2d 2d 3d 3d 4d 4d 5d 5d 6d 6d 7d 7d")).unwrap();
        assert!(matches!(d.structure(), HandStructure::Standard { .. }));
    }

    #[test]
    fn thirteen_orphans_shape() {
        let d = decompose(&hand("1d 9d 1b 9b 1c 9c E S W N Rd Gd Wd Rd")).unwrap();
        match d.structure() {
            HandStructure::ThirteenOrphans { tiles } => {
                assert_eq!(tiles[13].face.to_string(), "Rd");
            }
            other => panic!("expected thirteen orphans, got {other:?}"),
        }
    }

    #[test]
    fn thirteen_orphans_needs_terminal_duplicate() {
        let result = decompose(&hand("1d 9d 1b 9b 1c 9c E S W N Rd Gd Wd 5d"));
        assert_eq!(result, Err(HandError::NoWinningShape));
    }

    #[test]
    fn wrong_tile_counts_are_rejected() {
        let twelve = hand("1d 2d 3d 4b 5b 6b 7c 8c 9c 5d 6d 7d");
        assert_eq!(decompose(&twelve), Err(HandError::TileCount { found: 12 }));

        let fifteen = hand("1d 2d 3d 4b 5b 6b 7c 8c 9c 5d 6d 7d E E E");
        assert_eq!(decompose(&fifteen), Err(HandError::TileCount { found: 15 }));
    }

    #[test]
    fn thirteen_tiles_pass_the_count_but_never_win() {
        let thirteen = hand("1d 2d 3d 4b 5b 6b 7c 8c 9c 5d 6d 7d E");
        assert_eq!(decompose(&thirteen), Err(HandError::NoWinningShape));
    }

    #[test]
    fn five_copies_are_rejected() {
        let result = decompose(&hand("5d 5d 5d 5d 5d 1b 2b 3b 4b 5b 6b 7b 8b 9b"));
        assert_eq!(
            result,
            Err(HandError::TooManyCopies {
                tile: Tile::suited(Suit::Dot, 5),
                count: 5
            })
        );
    }

    #[test]
    fn suited_values_past_nine_are_rejected() {
        let mut tiles = hand("1d 1d 1d 2d 3d 4d 5d 6d 7d 9d 9d");
        tiles.extend([Tile::suited(Suit::Dot, 10); 3]);
        assert_eq!(
            decompose(&tiles),
            Err(HandError::TileValue {
                tile: Tile::suited(Suit::Dot, 10)
            })
        );
    }

    #[test]
    fn nine_bonus_tiles_are_rejected() {
        let result = decompose(&hand(
            "F1 F2 F3 F4 S1 S2 S3 S4 F1 1d 2d 3d 4b 5b 6b 7c 8c 9c 5d 6d 7d E E",
        ));
        assert_eq!(result, Err(HandError::TooManyBonusTiles { found: 9 }));
    }

    #[test]
    fn unmatched_hand_is_invalid() {
        let result = decompose(&hand("1d 3d 5d 7d 9d 1b 3b 5b 7b 9b E S W N"));
        assert_eq!(result, Err(HandError::NoWinningShape));
    }
}
