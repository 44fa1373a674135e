use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::{Achievement, AchievementId, AchievementRule, ProgressRecord, SectionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one section")]
    NoSections,

    #[error("duplicate section id: {0}")]
    DuplicateSection(SectionId),

    #[error("duplicate achievement id: {0}")]
    DuplicateAchievement(AchievementId),
}

/// A unit of instructional content as listed in the course catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub xp_reward: u32,
}

/// Ordered section and achievement catalogs supplied by configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    sections: Vec<Section>,
    achievements: Vec<Achievement>,
}

impl Catalog {
    /// Builds a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if there are no sections or any id repeats.
    pub fn new(sections: Vec<Section>, achievements: Vec<Achievement>) -> Result<Self, CatalogError> {
        if sections.is_empty() {
            return Err(CatalogError::NoSections);
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(&section.id) {
                return Err(CatalogError::DuplicateSection(section.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for achievement in &achievements {
            if !seen.insert(&achievement.id) {
                return Err(CatalogError::DuplicateAchievement(achievement.id.clone()));
            }
        }

        Ok(Self {
            sections,
            achievements,
        })
    }

    /// The default seven-section course with its achievement set.
    #[must_use]
    pub fn builtin() -> Self {
        let sections = vec![
            section("intro", "What Is an Agent", "Agents, tools and the loop that ties them together.", "🤖", 50),
            section("prompting", "Prompt Design", "Writing instructions an agent can follow reliably.", "✍️", 60),
            section("tools", "Tool Use", "Describing tools and handling their results.", "🛠️", 70),
            section("memory", "Memory and Context", "What to keep, what to summarize, what to forget.", "🧠", 70),
            section("planning", "Planning", "Breaking goals into steps and recovering from failure.", "🗺️", 80),
            section("multi-agent", "Multi-Agent Systems", "Delegation, hand-offs and shared state.", "👥", 90),
            section("evaluation", "Evaluation", "Measuring whether an agent actually works.", "📊", 100),
        ];
        let section_count = sections.len();

        let achievements = vec![
            achievement("first_steps", "First Steps", "Complete your first section.", "🎓", 50, AchievementRule::SectionsCompleted { at_least: 1 }),
            achievement("perfectionist", "Perfectionist", "Score 100% on a section quiz.", "💯", 50, AchievementRule::PerfectScores { at_least: 1 }),
            achievement("on_fire", "On Fire", "Visit three days in a row.", "🔥", 50, AchievementRule::LoginStreak { at_least: 3 }),
            achievement("sharpshooter", "Sharpshooter", "Answer ten questions in a row correctly.", "🎯", 50, AchievementRule::CorrectStreak { at_least: 10 }),
            achievement("speed_runner", "Speed Runner", "Finish a module in under five minutes.", "⚡", 50, AchievementRule::FastestModule { within_secs: 300.0 }),
            achievement("halfway", "Halfway There", "Complete four sections.", "🧭", 75, AchievementRule::SectionsCompleted { at_least: 4 }),
            achievement("graduate", "Graduate", "Complete every section.", "📜", 150, AchievementRule::SectionsCompleted { at_least: section_count }),
            achievement("final_boss", "Final Boss", "Score at least 80% on the final test.", "👑", 100, AchievementRule::FinalTestScore { at_least: 80 }),
            achievement("xp_hunter", "XP Hunter", "Collect 500 XP.", "💎", 50, AchievementRule::TotalXp { at_least: 500 }),
            achievement("collector", "Collector", "Unlock five other achievements.", "🏅", 100, AchievementRule::AchievementsUnlocked { at_least: 5 }),
        ];

        Self {
            sections,
            achievements,
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| &section.id == id)
    }

    #[must_use]
    pub fn achievement(&self, id: &AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|achievement| &achievement.id == id)
    }

    /// True once every catalog section is completed; gates the final test.
    #[must_use]
    pub fn all_sections_completed(&self, record: &ProgressRecord) -> bool {
        self.sections
            .iter()
            .all(|section| record.is_section_completed(&section.id))
    }

    /// First section in catalog order that the learner has not completed.
    #[must_use]
    pub fn next_section(&self, record: &ProgressRecord) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| !record.is_section_completed(&section.id))
    }
}

fn section(id: &str, title: &str, description: &str, icon: &str, xp_reward: u32) -> Section {
    Section {
        id: SectionId(id.to_owned()),
        title: title.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        xp_reward,
    }
}

fn achievement(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    xp_reward: u32,
    rule: AchievementRule,
) -> Achievement {
    Achievement {
        id: AchievementId(id.to_owned()),
        title: title.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        xp_reward,
        rule,
    }
}
