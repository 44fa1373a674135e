//! Fixed level table and XP-to-level derivation.

/// One tier of the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub number: u8,
    pub title: &'static str,
    pub min_xp: u32,
    /// Upper bound (exclusive); `None` for the last level.
    pub max_xp: Option<u32>,
    pub icon: &'static str,
}

/// Level thresholds, strictly increasing by `min_xp`.
pub const LEVELS: [Level; 5] = [
    Level {
        number: 1,
        title: "Novice",
        min_xp: 0,
        max_xp: Some(100),
        icon: "🌱",
    },
    Level {
        number: 2,
        title: "Practitioner",
        min_xp: 100,
        max_xp: Some(300),
        icon: "📘",
    },
    Level {
        number: 3,
        title: "Specialist",
        min_xp: 300,
        max_xp: Some(600),
        icon: "⚙️",
    },
    Level {
        number: 4,
        title: "Expert",
        min_xp: 600,
        max_xp: Some(1000),
        icon: "🎯",
    },
    Level {
        number: 5,
        title: "Agent Master",
        min_xp: 1000,
        max_xp: None,
        icon: "🏆",
    },
];

/// Returns the highest level whose threshold is reached by `total_xp`.
///
/// Level 1 starts at 0 XP, so every value maps to a level.
#[must_use]
pub fn level_for_xp(total_xp: u32) -> &'static Level {
    LEVELS
        .iter()
        .rev()
        .find(|level| total_xp >= level.min_xp)
        .unwrap_or(&LEVELS[0])
}

#[must_use]
pub fn level_by_number(number: u8) -> Option<&'static Level> {
    LEVELS.iter().find(|level| level.number == number)
}

/// Position of a learner within their current level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    pub level: &'static Level,
    pub next: Option<&'static Level>,
    /// XP earned since reaching `level`.
    pub progress_in_level: u32,
    /// XP span of `level`; `None` at the top level.
    pub level_range: Option<u32>,
    /// Completion towards `next`, capped at 100. Always 100 at the top level.
    pub percentage: f64,
}

impl LevelProgress {
    #[must_use]
    pub fn for_xp(total_xp: u32) -> Self {
        let level = level_for_xp(total_xp);
        let next = level_by_number(level.number + 1);
        let progress_in_level = total_xp - level.min_xp;
        let level_range = level.max_xp.map(|max| max - level.min_xp);

        let percentage = match (next, level_range) {
            (Some(_), Some(range)) if range > 0 => {
                (f64::from(progress_in_level) / f64::from(range) * 100.0).min(100.0)
            }
            _ => 100.0,
        };

        Self {
            level,
            next,
            progress_in_level,
            level_range,
            percentage,
        }
    }

    /// XP still needed to reach the next level, if there is one.
    #[must_use]
    pub fn xp_to_next(&self) -> Option<u32> {
        self.next
            .map(|next| next.min_xp.saturating_sub(self.level.min_xp + self.progress_in_level))
    }
}
