use std::sync::Arc;

use learn_core::model::{ProgressDocument, ProgressRecord};
use learn_core::streak::{self, StreakOutcome};
use storage::repository::SlotRepository;
use tracing::{info, warn};

use crate::Clock;
use crate::error::PersistenceError;

/// Slot key used when none is configured.
pub const DEFAULT_SLOT: &str = "learning_progress";

/// Owns the persisted progress slot.
///
/// Persistence is best-effort: `load`, `save` and `reset` log storage
/// failures and carry on instead of failing the learning flow.
#[derive(Clone)]
pub struct ProgressStore {
    clock: Clock,
    slots: Arc<dyn SlotRepository>,
    key: String,
}

impl ProgressStore {
    #[must_use]
    pub fn new(clock: Clock, slots: Arc<dyn SlotRepository>) -> Self {
        Self {
            clock,
            slots,
            key: DEFAULT_SLOT.to_owned(),
        }
    }

    /// Use a different slot key (e.g. one per profile).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Load the persisted record and register today's visit.
    ///
    /// An empty, unreadable or unreachable slot yields the initial record,
    /// which is not persisted. When the visit changes the streak, the
    /// updated record is saved before returning.
    pub async fn load(&self) -> ProgressRecord {
        let text = match self.slots.read_slot(&self.key).await {
            Ok(Some(text)) => text,
            Ok(None) => return ProgressRecord::initial(&self.clock),
            Err(err) => {
                warn!(slot = %self.key, error = %err, "progress storage unavailable, using initial progress");
                return ProgressRecord::initial(&self.clock);
            }
        };

        let mut record = match ProgressDocument::from_json(&text).and_then(ProgressDocument::recover)
        {
            Ok(record) => record,
            Err(err) => {
                warn!(slot = %self.key, error = %err, "stored progress is unreadable, using initial progress");
                return ProgressRecord::initial(&self.clock);
            }
        };

        let outcome = streak::apply_visit(&mut record, &self.clock);
        if outcome.changed() {
            info!(
                slot = %self.key,
                streak = record.login_streak(),
                reset = outcome == StreakOutcome::Reset,
                "login streak updated"
            );
            self.save(&record).await;
        }
        record
    }

    /// Persist the whole record, logging instead of failing.
    pub async fn save(&self, record: &ProgressRecord) {
        if let Err(err) = self.try_save(record).await {
            warn!(slot = %self.key, error = %err, "progress not saved");
        }
    }

    /// Persist the whole record in a single slot write.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the record cannot be encoded or stored.
    pub async fn try_save(&self, record: &ProgressRecord) -> Result<(), PersistenceError> {
        let text = ProgressDocument::from(record).to_json()?;
        self.slots.write_slot(&self.key, &text).await?;
        Ok(())
    }

    /// Delete the persisted slot and start over.
    pub async fn reset(&self) -> ProgressRecord {
        match self.slots.delete_slot(&self.key).await {
            Ok(()) => info!(slot = %self.key, "progress reset"),
            Err(err) => warn!(slot = %self.key, error = %err, "progress slot not cleared"),
        }
        ProgressRecord::initial(&self.clock)
    }
}
