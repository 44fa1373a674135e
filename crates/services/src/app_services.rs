use std::path::Path;
use std::sync::Arc;

use learn_core::model::Catalog;
use storage::repository::Storage;

use crate::Clock;
use crate::catalog_file::load_catalog;
use crate::error::AppServicesError;
use crate::progress::{ProgressService, ProgressStore};

/// Assembles app-facing services from storage and configuration.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// Uses the catalog file when given, otherwise the built-in course.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or catalog loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        slot: &str,
        catalog_path: Option<&Path>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let catalog = match catalog_path {
            Some(path) => load_catalog(path).await?,
            None => Catalog::builtin(),
        };
        Ok(Self::from_storage(&storage, clock, slot, catalog))
    }

    /// Build services over in-memory storage and the built-in course.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(
            &Storage::in_memory(),
            clock,
            crate::progress::DEFAULT_SLOT,
            Catalog::builtin(),
        )
    }

    fn from_storage(storage: &Storage, clock: Clock, slot: &str, catalog: Catalog) -> Self {
        let store = ProgressStore::new(clock, Arc::clone(&storage.slots)).with_key(slot);
        let progress = Arc::new(ProgressService::new(store, Arc::new(catalog)));
        Self { progress }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
