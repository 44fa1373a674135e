mod service;
mod store;
mod transfer;
mod workflow;

// Public API of the progress subsystem.
pub use service::ProgressService;
pub use store::{DEFAULT_SLOT, ProgressStore};
pub use transfer::ExportDocument;
pub use workflow::{FinalTestOutcome, FlashcardOutcome, QuizOutcome};
