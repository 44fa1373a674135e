use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::level::{Level, LevelProgress, level_for_xp};
use crate::model::{AchievementId, Percent, SectionId};
use crate::time::Clock;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("module time must be a finite, non-negative number of seconds, got {0}")]
    InvalidModuleTime(f64),
}

//
// ─── XP GAIN ───────────────────────────────────────────────────────────────────
//

/// Result of applying an XP delta to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    pub amount: u32,
    pub total_xp: u32,
    pub before: &'static Level,
    pub after: &'static Level,
}

impl XpGain {
    #[must_use]
    pub fn leveled_up(&self) -> bool {
        self.after.number > self.before.number
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// The learner's complete progress state.
///
/// `current_level` is not stored: it is always derived from `total_xp`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub(crate) completed_sections: Vec<SectionId>,
    pub(crate) section_scores: BTreeMap<SectionId, Percent>,
    pub(crate) total_xp: u32,
    pub(crate) unlocked_achievements: Vec<AchievementId>,
    pub(crate) final_test_score: Option<Percent>,
    pub(crate) last_visit: Option<DateTime<Utc>>,
    pub(crate) login_streak: u32,
    pub(crate) visit_dates: Vec<NaiveDate>,
    pub(crate) correct_streak: u32,
    pub(crate) max_correct_streak: u32,
    pub(crate) fastest_module_time: Option<f64>,
    pub(crate) flashcard_progress: BTreeMap<String, Value>,
}

impl ProgressRecord {
    /// Fresh record for a first visit: no XP, a one-day streak starting today.
    #[must_use]
    pub fn initial(clock: &Clock) -> Self {
        let now = clock.now();
        Self {
            completed_sections: Vec::new(),
            section_scores: BTreeMap::new(),
            total_xp: 0,
            unlocked_achievements: Vec::new(),
            final_test_score: None,
            last_visit: Some(now),
            login_streak: 1,
            visit_dates: vec![clock.calendar_day(now)],
            correct_streak: 0,
            max_correct_streak: 0,
            fastest_module_time: None,
            flashcard_progress: BTreeMap::new(),
        }
    }

    // ─── XP & levels ──────────────────────────────────────────────────────

    /// Adds XP and reports the level transition.
    ///
    /// Saturates at `u32::MAX`; the total never decreases.
    pub fn add_xp(&mut self, amount: u32) -> XpGain {
        let before = self.current_level();
        self.total_xp = self.total_xp.saturating_add(amount);
        XpGain {
            amount,
            total_xp: self.total_xp,
            before,
            after: self.current_level(),
        }
    }

    #[must_use]
    pub fn total_xp(&self) -> u32 {
        self.total_xp
    }

    #[must_use]
    pub fn current_level(&self) -> &'static Level {
        level_for_xp(self.total_xp)
    }

    #[must_use]
    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::for_xp(self.total_xp)
    }

    // ─── Sections ─────────────────────────────────────────────────────────

    /// Marks a section completed and records its latest score.
    ///
    /// Returns `true` the first time the section is completed. Retakes
    /// overwrite the score even when it is lower.
    pub fn complete_section(&mut self, section_id: SectionId, score: Percent) -> bool {
        let newly_completed = !self.completed_sections.contains(&section_id);
        if newly_completed {
            self.completed_sections.push(section_id.clone());
        }
        self.section_scores.insert(section_id, score);
        newly_completed
    }

    #[must_use]
    pub fn completed_sections(&self) -> &[SectionId] {
        &self.completed_sections
    }

    #[must_use]
    pub fn is_section_completed(&self, section_id: &SectionId) -> bool {
        self.completed_sections.contains(section_id)
    }

    #[must_use]
    pub fn section_score(&self, section_id: &SectionId) -> Option<Percent> {
        self.section_scores.get(section_id).copied()
    }

    #[must_use]
    pub fn section_scores(&self) -> &BTreeMap<SectionId, Percent> {
        &self.section_scores
    }

    // ─── Achievements ─────────────────────────────────────────────────────

    /// Records an achievement as unlocked. Returns `false` if it already was.
    pub fn unlock_achievement(&mut self, id: &AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked_achievements.push(id.clone());
        true
    }

    #[must_use]
    pub fn is_unlocked(&self, id: &AchievementId) -> bool {
        self.unlocked_achievements.contains(id)
    }

    #[must_use]
    pub fn unlocked_achievements(&self) -> &[AchievementId] {
        &self.unlocked_achievements
    }

    // ─── Quiz statistics ──────────────────────────────────────────────────

    /// Latest final test result; retakes overwrite it.
    pub fn record_final_test(&mut self, score: Percent) {
        self.final_test_score = Some(score);
    }

    #[must_use]
    pub fn final_test_score(&self) -> Option<Percent> {
        self.final_test_score
    }

    /// Updates the consecutive-correct-answer counters.
    pub fn record_answer(&mut self, correct: bool) {
        if correct {
            self.correct_streak = self.correct_streak.saturating_add(1);
            self.max_correct_streak = self.max_correct_streak.max(self.correct_streak);
        } else {
            self.correct_streak = 0;
        }
    }

    #[must_use]
    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    #[must_use]
    pub fn max_correct_streak(&self) -> u32 {
        self.max_correct_streak
    }

    /// Keeps the fastest observed module completion time.
    ///
    /// Returns `true` when `seconds` becomes the new best.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidModuleTime` for negative or non-finite durations.
    pub fn record_module_time(&mut self, seconds: f64) -> Result<bool, ProgressError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ProgressError::InvalidModuleTime(seconds));
        }
        let is_best = self.fastest_module_time.is_none_or(|best| seconds < best);
        if is_best {
            self.fastest_module_time = Some(seconds);
        }
        Ok(is_best)
    }

    #[must_use]
    pub fn fastest_module_time(&self) -> Option<f64> {
        self.fastest_module_time
    }

    // ─── Visits ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn last_visit(&self) -> Option<DateTime<Utc>> {
        self.last_visit
    }

    #[must_use]
    pub fn login_streak(&self) -> u32 {
        self.login_streak
    }

    #[must_use]
    pub fn visit_dates(&self) -> &[NaiveDate] {
        &self.visit_dates
    }

    // ─── Flashcards ───────────────────────────────────────────────────────

    /// Free-form per-card state; not interpreted by any rule.
    #[must_use]
    pub fn flashcard_progress(&self) -> &BTreeMap<String, Value> {
        &self.flashcard_progress
    }
}
