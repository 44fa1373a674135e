//! Score-to-XP formulas shared by the learning flows.
//!
//! All rounding is half-up on exact integers.

use crate::model::Percent;

/// XP available for a perfect final test.
pub const FINAL_TEST_MAX_XP: u32 = 300;

/// Minimum flashcard score that counts as a pass.
pub const FLASHCARD_PASS_SCORE: u8 = 60;

/// `round(xp_reward * score / 100)` for a section quiz.
#[must_use]
pub fn quiz_xp(xp_reward: u32, score: Percent) -> u32 {
    scaled(xp_reward, u64::from(score.value()), 100)
}

/// Flat `round(xp_reward * 0.3)` for a passed flashcard round, `None` below
/// the pass mark. Repeated passes earn it again.
#[must_use]
pub fn flashcard_xp(xp_reward: u32, score: Percent) -> Option<u32> {
    flashcards_passed(score).then(|| scaled(xp_reward, 3, 10))
}

#[must_use]
pub fn flashcards_passed(score: Percent) -> bool {
    score.value() >= FLASHCARD_PASS_SCORE
}

/// `round(300 * score / 100)` for the final test.
#[must_use]
pub fn final_test_xp(score: Percent) -> u32 {
    quiz_xp(FINAL_TEST_MAX_XP, score)
}

fn scaled(value: u32, numerator: u64, denominator: u64) -> u32 {
    let rounded = (u64::from(value) * numerator * 2 + denominator) / (denominator * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
