//! # Hong Kong Mahjong Score Calculator
//!
//! This module takes the output from the `fan_checker` (`FanResult`)
//! and turns it into the final `ScoreResult`: total fan, the matched
//! pattern entries, and the payment from the doubling table.

use log::debug;

use super::catalogue::ScorePattern;
use super::fan_checker::FanResult;
use super::types::scoring::ScoreResult;

/// Fewest fan a hand needs to be paid as a win.
pub const MINIMUM_FAN: u32 = 3;

/// Fan beyond this pays the same as this.
pub const FAN_CAP: u32 = 13;

/// Payment by fan, doubling from 1 at 0 fan to 8192 at the cap.
pub const PAYMENT_TABLE: [u32; FAN_CAP as usize + 1] = [
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192,
];

// --- Main Public Function ---

/// Calculates the final score of a winning hand.
///
/// # Arguments
/// * `fan_result` - The output from `fan_checker::check_all_fan`.
///
/// # Returns
/// * `ScoreResult` - A struct containing the full score breakdown.
pub fn calculate_score(fan_result: FanResult) -> ScoreResult {
    let matched_patterns: Vec<&'static ScorePattern> =
        fan_result.patterns.iter().map(|id| id.pattern()).collect();
    let total_fan = calculate_fan(&matched_patterns);
    let payment = payment_for(total_fan);
    debug!("{} fan over {} patterns pays {}", total_fan, matched_patterns.len(), payment);

    ScoreResult {
        total_fan,
        matched_patterns,
        payment,
        meets_minimum: total_fan >= MINIMUM_FAN,
        is_special_hand: fan_result.is_special_hand,
    }
}

// --- Helper Functions ---

/// Sums the fan value of every matched pattern.
fn calculate_fan(patterns: &[&ScorePattern]) -> u32 {
    patterns.iter().map(|p| p.fan).sum()
}

/// Looks up the payment for a fan total, capped at `FAN_CAP`.
pub fn payment_for(fan: u32) -> u32 {
    PAYMENT_TABLE[fan.min(FAN_CAP) as usize]
}
