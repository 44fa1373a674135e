//! Export and import of the portable progress document.

use std::path::{Path, PathBuf};

use learn_core::model::{DocumentError, ProgressDocument, ProgressRecord};
use tracing::{info, warn};

use super::service::ProgressService;
use crate::error::{ExportError, ImportError};

const EXPORT_FILE_PREFIX: &str = "learning_progress";

/// A rendered export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// `learning_progress_<YYYY-MM-DD>.json`, dated by the service clock.
    pub file_name: String,
    /// Pretty-printed JSON document.
    pub contents: String,
}

impl ProgressService {
    /// Render the record as a portable document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Encode` if serialization fails.
    pub fn export_progress(&self, record: &ProgressRecord) -> Result<ExportDocument, DocumentError> {
        let contents = ProgressDocument::from(record).to_json_pretty()?;
        let date = self.store.clock().now().format("%Y-%m-%d");
        Ok(ExportDocument {
            file_name: format!("{EXPORT_FILE_PREFIX}_{date}.json"),
            contents,
        })
    }

    /// Write an export into `dir` and return the file path.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if encoding or writing the file fails.
    pub async fn export_to_dir(
        &self,
        record: &ProgressRecord,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let export = self.export_progress(record)?;
        let path = dir.join(&export.file_name);
        tokio::fs::write(&path, export.contents).await?;
        info!(path = %path.display(), "progress exported");
        Ok(path)
    }

    /// Replace the persisted progress with an imported document.
    ///
    /// The document is fully parsed and validated before anything is
    /// written; on any error the persisted progress is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MalformedDocument` if the text is not a valid
    /// progress document, or `ImportError::Persist` if it cannot be saved.
    pub async fn import_progress(&self, text: &str) -> Result<ProgressRecord, ImportError> {
        self.replace_with(ProgressDocument::from_json(text)).await
    }

    /// Read a user-supplied file and import it.
    ///
    /// Nothing is applied until the whole file has been read and validated;
    /// dropping the returned future cancels the import.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Read` if the file cannot be read and
    /// `ImportError::MalformedDocument` if its contents, including non-UTF-8
    /// bytes, are not a valid progress document.
    pub async fn import_file(&self, path: &Path) -> Result<ProgressRecord, ImportError> {
        let bytes = tokio::fs::read(path).await?;
        self.replace_with(ProgressDocument::from_slice(&bytes)).await
    }

    async fn replace_with(
        &self,
        parsed: Result<ProgressDocument, DocumentError>,
    ) -> Result<ProgressRecord, ImportError> {
        let record = parsed
            .and_then(ProgressDocument::validate)
            .map_err(|err| {
                warn!(error = %err, "rejected progress import");
                ImportError::MalformedDocument(err)
            })?;

        self.store.try_save(&record).await?;
        info!(
            total_xp = record.total_xp(),
            sections = record.completed_sections().len(),
            "progress imported"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use learn_core::Clock;
    use learn_core::model::{AchievementId, Catalog, Percent, SectionId};
    use learn_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, SlotRepository};

    use crate::progress::{DEFAULT_SLOT, ProgressStore};

    fn service(repo: &InMemoryRepository) -> ProgressService {
        let store = ProgressStore::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()));
        ProgressService::new(store, Arc::new(Catalog::builtin()))
    }

    async fn populated(service: &ProgressService) -> ProgressRecord {
        let mut record = service.load().await;
        service.add_xp(&mut record, 340).await;
        service
            .complete_section(&mut record, SectionId::new("intro").unwrap(), Percent::new(95).unwrap())
            .await;
        record.unlock_achievement(&AchievementId::new("first_steps").unwrap());
        service.record_answer(&mut record, true).await;
        service.record_module_time(&mut record, 250.0).await.unwrap();
        record
    }

    #[tokio::test]
    async fn export_names_file_by_date() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let record = service.load().await;

        let export = service.export_progress(&record).unwrap();

        assert_eq!(export.file_name, "learning_progress_2023-11-14.json");
        assert!(export.contents.contains("\"totalXP\""));
        assert!(export.contents.contains("\"currentLevel\": 1"));
    }

    #[tokio::test]
    async fn export_then_import_round_trips() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let record = populated(&service).await;

        let export = service.export_progress(&record).unwrap();
        let fresh = service.reset().await;
        assert_eq!(fresh.total_xp(), 0);

        let imported = service.import_progress(&export.contents).await.unwrap();

        assert_eq!(imported, record);
        assert_eq!(service.load().await, record);
    }

    #[tokio::test]
    async fn malformed_import_leaves_progress_untouched() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let mut record = populated(&service).await;
        service.save(&record).await;
        let before = repo.read_slot(DEFAULT_SLOT).await.unwrap();

        let err = service.import_progress("definitely { not json").await.unwrap_err();
        assert!(matches!(err, ImportError::MalformedDocument(DocumentError::Parse(_))));
        assert!(err.to_string().starts_with("invalid file format"));

        assert_eq!(repo.read_slot(DEFAULT_SLOT).await.unwrap(), before);
        record = service.load().await;
        assert_eq!(record.total_xp(), 340);
    }

    #[tokio::test]
    async fn parseable_but_invalid_import_is_rejected() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let record = populated(&service).await;

        let mut value: serde_json::Value =
            serde_json::from_str(&service.export_progress(&record).unwrap().contents).unwrap();
        value["completedSections"] = serde_json::json!(["intro", "intro"]);

        let err = service
            .import_progress(&value.to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::MalformedDocument(DocumentError::DuplicateSection(_))
        ));
        assert_eq!(service.load().await, record);
    }

    #[tokio::test]
    async fn file_export_and_import() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let record = populated(&service).await;
        let dir = tempfile::tempdir().unwrap();

        let path = service.export_to_dir(&record, dir.path()).await.unwrap();
        assert!(path.ends_with("learning_progress_2023-11-14.json"));

        service.reset().await;
        let imported = service.import_file(&path).await.unwrap();
        assert_eq!(imported, record);
    }

    #[tokio::test]
    async fn missing_import_file_is_a_read_error() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let dir = tempfile::tempdir().unwrap();

        let err = service
            .import_file(&dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Read(_)));
    }

    #[tokio::test]
    async fn binary_import_file_is_malformed() {
        let repo = InMemoryRepository::new();
        let service = service(&repo);
        let before = populated(&service).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        tokio::fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).await.unwrap();

        let err = service.import_file(&path).await.unwrap_err();

        assert!(matches!(err, ImportError::MalformedDocument(_)));
        assert!(err.to_string().starts_with("invalid file format"));
        assert_eq!(service.load().await, before);
    }
}
