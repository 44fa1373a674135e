//! Shared error types for the services crate.

use thiserror::Error;

use learn_core::model::{CatalogError, DocumentError, SectionId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Progress could not be written to (or removed from) its slot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistenceError {
    #[error("progress storage unavailable: {0}")]
    Unavailable(#[from] StorageError),
    #[error(transparent)]
    Encode(#[from] DocumentError),
}

/// Errors emitted while importing a progress document.
///
/// In every case the previously persisted progress is left untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("could not read progress file: {0}")]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    MalformedDocument(DocumentError),
    #[error("imported progress could not be saved: {0}")]
    Persist(#[from] PersistenceError),
}

/// Errors emitted while exporting a progress document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Encode(#[from] DocumentError),
    #[error("could not write export file: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors emitted by the section and final-test flows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LearningFlowError {
    #[error("unknown section: {0}")]
    UnknownSection(SectionId),
}

/// Errors emitted while loading a course catalog file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("could not read catalog file: {0}")]
    Read(#[from] std::io::Error),
    #[error("could not parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}
