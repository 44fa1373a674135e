#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_file;
pub mod error;
pub mod progress;

pub use learn_core::Clock;

pub use app_services::AppServices;
pub use catalog_file::{load_catalog, parse_catalog};
pub use error::{
    CatalogLoadError, ExportError, ImportError, LearningFlowError, PersistenceError,
};
pub use progress::{
    DEFAULT_SLOT, ExportDocument, FinalTestOutcome, FlashcardOutcome, ProgressService,
    ProgressStore, QuizOutcome,
};
