//! Shared error types for the services crate.

use thiserror::Error;

use lesson_core::model::{AccessibilitySettingsError, SkillTreeError};
use lesson_core::quiz::QuizError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SkillTreeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkillTreeServiceError {
    #[error("skill tree does not match the lesson catalog")]
    CatalogMismatch,
    #[error(transparent)]
    SkillTree(#[from] SkillTreeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AccessibilitySettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccessibilityServiceError {
    #[error(transparent)]
    Settings(#[from] AccessibilitySettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by lesson sessions.
///
/// The gated variants reject a call without touching session state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson already finished")]
    Finished,
    #[error("question already answered")]
    AlreadyAnswered,
    #[error("current step is not complete yet")]
    CannotProceed,
    #[error("already at the first step")]
    AtFirstStep,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    SkillTree(#[from] SkillTreeServiceError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    SkillTree(#[from] SkillTreeServiceError),
}
