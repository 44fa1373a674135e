mod achievement;
mod catalog;
mod document;
mod ids;
mod level;
mod progress;
mod score;

pub use achievement::{Achievement, AchievementRule};
pub use catalog::{Catalog, CatalogError, Section};
pub use document::{DocumentError, ProgressDocument};
pub use ids::{AchievementId, IdError, SectionId};
pub use level::{LEVELS, Level, LevelProgress, level_by_number, level_for_xp};
pub use progress::{ProgressError, ProgressRecord, XpGain};
pub use score::{Percent, ScoreError};
