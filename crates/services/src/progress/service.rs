use std::sync::Arc;

use learn_core::achievements;
use learn_core::model::{
    Achievement, Catalog, Percent, ProgressError, ProgressRecord, SectionId, XpGain,
};
use tracing::info;

use super::store::ProgressStore;

/// Collaborator-facing progress operations.
///
/// Every mutation is applied to the caller's record and persisted
/// immediately through the store.
#[derive(Clone)]
pub struct ProgressService {
    pub(super) store: ProgressStore,
    pub(super) catalog: Arc<Catalog>,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: ProgressStore, catalog: Arc<Catalog>) -> Self {
        Self { store, catalog }
    }

    #[must_use]
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn load(&self) -> ProgressRecord {
        self.store.load().await
    }

    pub async fn save(&self, record: &ProgressRecord) {
        self.store.save(record).await;
    }

    pub async fn reset(&self) -> ProgressRecord {
        self.store.reset().await
    }

    /// Add XP, recompute the level and persist.
    ///
    /// Amounts come from the scoring formulas and catalog rewards; there is
    /// no way to subtract XP.
    pub async fn add_xp(&self, record: &mut ProgressRecord, amount: u32) -> XpGain {
        let gain = record.add_xp(amount);
        if gain.leveled_up() {
            info!(level = gain.after.number, title = gain.after.title, total_xp = gain.total_xp, "level up");
        }
        self.store.save(record).await;
        gain
    }

    /// Mark a section completed with its latest score and persist.
    ///
    /// Returns `true` on first completion. Section ids are not checked
    /// against the catalog here.
    pub async fn complete_section(
        &self,
        record: &mut ProgressRecord,
        section_id: SectionId,
        score: Percent,
    ) -> bool {
        let newly_completed = record.complete_section(section_id, score);
        self.store.save(record).await;
        newly_completed
    }

    /// Unlock every catalog achievement whose rule now holds.
    ///
    /// Rewards are added to the record before later rules are evaluated.
    /// The record is persisted once if anything was unlocked.
    pub async fn check_achievements(&self, record: &mut ProgressRecord) -> Vec<Achievement> {
        let unlocked: Vec<Achievement> =
            achievements::check_achievements(record, self.catalog.achievements())
                .into_iter()
                .cloned()
                .collect();

        if !unlocked.is_empty() {
            for achievement in &unlocked {
                info!(id = %achievement.id, xp_reward = achievement.xp_reward, "achievement unlocked");
            }
            self.store.save(record).await;
        }
        unlocked
    }

    /// Update the correct-answer streak counters and persist.
    pub async fn record_answer(&self, record: &mut ProgressRecord, correct: bool) {
        record.record_answer(correct);
        self.store.save(record).await;
    }

    /// Keep the fastest module time and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidModuleTime` for negative or non-finite
    /// durations; nothing is saved in that case.
    pub async fn record_module_time(
        &self,
        record: &mut ProgressRecord,
        seconds: f64,
    ) -> Result<bool, ProgressError> {
        let is_best = record.record_module_time(seconds)?;
        self.store.save(record).await;
        Ok(is_best)
    }
}
