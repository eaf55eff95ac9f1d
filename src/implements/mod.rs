pub mod types;
pub use types::*;
pub mod errors;
pub use errors::*;
pub mod catalogue;
pub use catalogue::*;
pub mod raw_hand_organizer;
pub use raw_hand_organizer::*;
pub mod fan_checker;
pub use fan_checker::*;
pub mod score_calculator;
pub use score_calculator::*;

use crate::implements::game::GameContext;
use crate::implements::hand::HandDecomposition;
use crate::implements::scoring::ScoreResult;
use crate::implements::tiles::Tile;

/// Scores an already decomposed hand. Never fails.
pub fn score(decomposition: &HandDecomposition, context: &GameContext) -> ScoreResult {
    let fan_result = check_all_fan(decomposition, context);
    calculate_score(fan_result)
}

pub fn calculate_hand(tiles: &[Tile], context: &GameContext) -> Result<ScoreResult, HandError> {
    // 1. Reject context fields outside their range
    context.validate()?;

    // 2. Step 1: Organize Hand
    // The `?` operator will automatically return the Err if `decompose` fails.
    let decomposition = decompose(tiles)?;

    // 3. Step 2 + 3: Check fan and calculate the final score
    Ok(score(&decomposition, context))
}
