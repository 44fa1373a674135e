//! Portable progress document: the storage slot payload and the
//! export/import interchange format.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::model::level::{LEVELS, level_for_xp};
use crate::model::{AchievementId, Percent, ProgressRecord, SectionId};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("invalid file format: {0}")]
    Parse(String),

    #[error("could not encode progress: {0}")]
    Encode(String),

    #[error("invalid file format: level {0} does not exist")]
    LevelOutOfRange(u8),

    #[error("invalid file format: level {stored} does not match {total_xp} XP (expected {derived})")]
    LevelMismatch { stored: u8, derived: u8, total_xp: u32 },

    #[error("invalid file format: login streak must be at least 1")]
    ZeroLoginStreak,

    #[error("invalid file format: correct streak {current} exceeds best streak {max}")]
    CorrectStreakAboveMax { current: u32, max: u32 },

    #[error("invalid file format: fastest module time {0} is not a valid duration")]
    InvalidModuleTime(f64),

    #[error("invalid file format: section {0} listed more than once")]
    DuplicateSection(SectionId),

    #[error("invalid file format: achievement {0} listed more than once")]
    DuplicateAchievement(AchievementId),

    #[error("invalid file format: visit day {0} listed more than once")]
    DuplicateVisitDay(NaiveDate),

    #[error("invalid file format: section {0} has a score but is not completed")]
    ScoreWithoutCompletion(SectionId),

    #[error("invalid file format: section {0} is completed but has no score")]
    CompletionWithoutScore(SectionId),

    #[error("invalid file format: last visit {0:?} is not an RFC 3339 timestamp")]
    InvalidLastVisit(String),
}

/// Field-for-field persisted shape of a `ProgressRecord`.
///
/// `currentLevel` is written for compatibility with older readers and checked
/// against `totalXP` on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    pub completed_sections: Vec<SectionId>,
    pub section_scores: BTreeMap<SectionId, Percent>,
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
    pub current_level: u8,
    pub unlocked_achievements: Vec<AchievementId>,
    pub final_test_score: Option<Percent>,
    pub last_visit: Option<String>,
    pub login_streak: u32,
    pub visit_dates: Vec<NaiveDate>,
    pub correct_streak: u32,
    pub max_correct_streak: u32,
    pub fastest_module_time: Option<f64>,
    #[serde(default)]
    pub flashcard_progress: BTreeMap<String, Value>,
}

impl ProgressDocument {
    /// Parses a JSON document without checking record invariants.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Parse` if the text is not a progress document.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(text).map_err(|err| DocumentError::Parse(err.to_string()))
    }

    /// Parses raw file contents; bytes that are not UTF-8 JSON are a parse
    /// error like any other malformed input.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Parse` if the bytes are not a progress document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        serde_json::from_slice(bytes).map_err(|err| DocumentError::Parse(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `DocumentError::Encode` if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(|err| DocumentError::Encode(err.to_string()))
    }

    /// Human-readable form used for exports.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Encode` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|err| DocumentError::Encode(err.to_string()))
    }

    /// Checks every record invariant and builds the record.
    ///
    /// Used for untrusted input such as imported files.
    ///
    /// # Errors
    ///
    /// Returns the first `DocumentError` invariant violation found.
    pub fn validate(self) -> Result<ProgressRecord, DocumentError> {
        self.into_record(false)
    }

    /// Like [`validate`](Self::validate), but an unreadable `lastVisit` is
    /// dropped instead of rejected so the streak logic can restart it, and
    /// repeated visit days are collapsed.
    ///
    /// # Errors
    ///
    /// Returns the first `DocumentError` invariant violation found.
    pub fn recover(self) -> Result<ProgressRecord, DocumentError> {
        self.into_record(true)
    }

    fn into_record(mut self, tolerate: bool) -> Result<ProgressRecord, DocumentError> {
        let max_level = LEVELS[LEVELS.len() - 1].number;
        if self.current_level == 0 || self.current_level > max_level {
            return Err(DocumentError::LevelOutOfRange(self.current_level));
        }
        let derived = level_for_xp(self.total_xp).number;
        if derived != self.current_level {
            return Err(DocumentError::LevelMismatch {
                stored: self.current_level,
                derived,
                total_xp: self.total_xp,
            });
        }

        if self.login_streak == 0 {
            return Err(DocumentError::ZeroLoginStreak);
        }
        if self.correct_streak > self.max_correct_streak {
            return Err(DocumentError::CorrectStreakAboveMax {
                current: self.correct_streak,
                max: self.max_correct_streak,
            });
        }
        if let Some(secs) = self.fastest_module_time {
            if !secs.is_finite() || secs < 0.0 {
                return Err(DocumentError::InvalidModuleTime(secs));
            }
        }

        if tolerate {
            let mut seen = HashSet::new();
            self.visit_dates.retain(|day| seen.insert(*day));
        }
        self.check_membership()?;

        let last_visit = match self.last_visit {
            None => None,
            Some(raw) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(at) => Some(at.with_timezone(&Utc)),
                Err(_) if tolerate => None,
                Err(_) => return Err(DocumentError::InvalidLastVisit(raw)),
            },
        };

        Ok(ProgressRecord {
            completed_sections: self.completed_sections,
            section_scores: self.section_scores,
            total_xp: self.total_xp,
            unlocked_achievements: self.unlocked_achievements,
            final_test_score: self.final_test_score,
            last_visit,
            login_streak: self.login_streak,
            visit_dates: self.visit_dates,
            correct_streak: self.correct_streak,
            max_correct_streak: self.max_correct_streak,
            fastest_module_time: self.fastest_module_time,
            flashcard_progress: self.flashcard_progress,
        })
    }

    fn check_membership(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for id in &self.completed_sections {
            if !seen.insert(id) {
                return Err(DocumentError::DuplicateSection(id.clone()));
            }
            if !self.section_scores.contains_key(id) {
                return Err(DocumentError::CompletionWithoutScore(id.clone()));
            }
        }
        if let Some(orphan) = self.section_scores.keys().find(|id| !seen.contains(id)) {
            return Err(DocumentError::ScoreWithoutCompletion(orphan.clone()));
        }

        let mut seen = HashSet::new();
        for id in &self.unlocked_achievements {
            if !seen.insert(id) {
                return Err(DocumentError::DuplicateAchievement(id.clone()));
            }
        }

        let mut seen = HashSet::new();
        if let Some(day) = self.visit_dates.iter().find(|day| !seen.insert(**day)) {
            return Err(DocumentError::DuplicateVisitDay(*day));
        }
        Ok(())
    }
}

impl From<&ProgressRecord> for ProgressDocument {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            completed_sections: record.completed_sections.clone(),
            section_scores: record.section_scores.clone(),
            total_xp: record.total_xp,
            current_level: record.current_level().number,
            unlocked_achievements: record.unlocked_achievements.clone(),
            final_test_score: record.final_test_score,
            last_visit: record
                .last_visit
                .map(|at| at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            login_streak: record.login_streak,
            visit_dates: record.visit_dates.clone(),
            correct_streak: record.correct_streak,
            max_correct_streak: record.max_correct_streak,
            fastest_module_time: record.fastest_module_time,
            flashcard_progress: record.flashcard_progress.clone(),
        }
    }
}
