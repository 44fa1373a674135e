use serde::{Deserialize, Serialize};

use crate::model::{AchievementId, ProgressRecord};

/// Eligibility rule of an achievement.
///
/// Rules are plain data so catalogs can be loaded from configuration; each
/// one is evaluated by a pure function of the progress record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementRule {
    /// At least `at_least` sections completed.
    SectionsCompleted { at_least: usize },
    /// At least `at_least` sections whose latest score is 100%.
    PerfectScores { at_least: usize },
    TotalXp { at_least: u32 },
    LevelReached { level: u8 },
    LoginStreak { at_least: u32 },
    /// At least `at_least` distinct visit days logged.
    VisitDays { at_least: usize },
    /// Historical best run of correct answers.
    CorrectStreak { at_least: u32 },
    FinalTestScore { at_least: u8 },
    /// A module finished in `within_secs` seconds or less.
    FastestModule { within_secs: f64 },
    /// At least `at_least` other achievements already unlocked.
    AchievementsUnlocked { at_least: usize },
}

impl AchievementRule {
    #[must_use]
    pub fn is_met(&self, record: &ProgressRecord) -> bool {
        match self {
            Self::SectionsCompleted { at_least } => record.completed_sections().len() >= *at_least,
            Self::PerfectScores { at_least } => {
                record
                    .section_scores()
                    .values()
                    .filter(|score| score.is_perfect())
                    .count()
                    >= *at_least
            }
            Self::TotalXp { at_least } => record.total_xp() >= *at_least,
            Self::LevelReached { level } => record.current_level().number >= *level,
            Self::LoginStreak { at_least } => record.login_streak() >= *at_least,
            Self::VisitDays { at_least } => {
                let mut days = record.visit_dates().to_vec();
                days.sort_unstable();
                days.dedup();
                days.len() >= *at_least
            }
            Self::CorrectStreak { at_least } => record.max_correct_streak() >= *at_least,
            Self::FinalTestScore { at_least } => record
                .final_test_score()
                .is_some_and(|score| score.value() >= *at_least),
            Self::FastestModule { within_secs } => record
                .fastest_module_time()
                .is_some_and(|secs| secs <= *within_secs),
            Self::AchievementsUnlocked { at_least } => {
                record.unlocked_achievements().len() >= *at_least
            }
        }
    }
}

/// A named milestone granting one-time XP when its rule first holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub xp_reward: u32,
    pub rule: AchievementRule,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Percent, SectionId};
    use crate::time::fixed_clock;

    fn record() -> ProgressRecord {
        ProgressRecord::initial(&fixed_clock())
    }

    fn complete(record: &mut ProgressRecord, id: &str, score: u32) {
        record.complete_section(SectionId::new(id).unwrap(), Percent::new(score).unwrap());
    }

    #[test]
    fn sections_completed_counts_distinct_sections() {
        let rule = AchievementRule::SectionsCompleted { at_least: 2 };
        let mut r = record();
        complete(&mut r, "basics", 80);
        complete(&mut r, "basics", 90);
        assert!(!rule.is_met(&r));
        complete(&mut r, "tools", 50);
        assert!(rule.is_met(&r));
    }

    #[test]
    fn perfect_scores_use_latest_score() {
        let rule = AchievementRule::PerfectScores { at_least: 1 };
        let mut r = record();
        complete(&mut r, "basics", 100);
        assert!(rule.is_met(&r));
        complete(&mut r, "basics", 90);
        assert!(!rule.is_met(&r));
    }

    #[test]
    fn xp_and_level_rules() {
        let mut r = record();
        r.add_xp(299);
        assert!(AchievementRule::TotalXp { at_least: 299 }.is_met(&r));
        assert!(!AchievementRule::LevelReached { level: 3 }.is_met(&r));
        r.add_xp(1);
        assert!(AchievementRule::LevelReached { level: 3 }.is_met(&r));
    }

    #[test]
    fn final_test_rule_requires_a_result() {
        let rule = AchievementRule::FinalTestScore { at_least: 80 };
        let mut r = record();
        assert!(!rule.is_met(&r));
        r.record_final_test(Percent::new(79).unwrap());
        assert!(!rule.is_met(&r));
        r.record_final_test(Percent::new(80).unwrap());
        assert!(rule.is_met(&r));
    }

    #[test]
    fn fastest_module_rule() {
        let rule = AchievementRule::FastestModule { within_secs: 300.0 };
        let mut r = record();
        assert!(!rule.is_met(&r));
        r.record_module_time(301.0).unwrap();
        assert!(!rule.is_met(&r));
        r.record_module_time(300.0).unwrap();
        assert!(rule.is_met(&r));
    }

    #[test]
    fn correct_streak_rule_uses_best_run() {
        let rule = AchievementRule::CorrectStreak { at_least: 2 };
        let mut r = record();
        r.record_answer(true);
        r.record_answer(true);
        r.record_answer(false);
        assert!(rule.is_met(&r));
    }

    #[test]
    fn rule_parses_from_tagged_form() {
        let rule: AchievementRule =
            serde_json::from_str(r#"{"kind":"login_streak","at_least":3}"#).unwrap();
        assert_eq!(rule, AchievementRule::LoginStreak { at_least: 3 });
    }
}
