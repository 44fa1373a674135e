use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score must be between 0 and 100, got {0}")]
    OutOfRange(u32),

    #[error("cannot score an exercise with no questions")]
    NoQuestions,

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    TooManyCorrect { correct: u32, total: u32 },
}

/// Integer percentage in `0..=100`.
///
/// Used for section scores, flashcard results and the final test.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const PERFECT: Percent = Percent(100);

    /// Creates a percentage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` if `value > 100`.
    pub fn new(value: u32) -> Result<Self, ScoreError> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ScoreError::OutOfRange(value)),
        }
    }

    /// Scores `correct` out of `total` answers, rounding half up.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::NoQuestions` when `total == 0` and
    /// `ScoreError::TooManyCorrect` when `correct > total`.
    pub fn from_ratio(correct: u32, total: u32) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::NoQuestions);
        }
        if correct > total {
            return Err(ScoreError::TooManyCorrect { correct, total });
        }
        let correct = u64::from(correct);
        let total = u64::from(total);
        let rounded = (200 * correct + total) / (2 * total);
        // correct <= total keeps this within 0..=100
        Ok(Self(u8::try_from(rounded).unwrap_or(100)))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_perfect(self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<u32> for Percent {
    type Error = ScoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl fmt::Debug for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
