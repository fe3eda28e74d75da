//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use drill_core::model::{CatalogError, InputError};
use drill_core::{AnswerError, TransitionError};
use storage::repository::StorageError;

/// Coarse classification callers use to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizErrorKind {
    InvalidInput,
    StaleSubmission,
    InvalidTransition,
    InternalInconsistency,
    Storage,
}

impl QuizErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizErrorKind::InvalidInput => "invalid_input",
            QuizErrorKind::StaleSubmission => "stale_submission",
            QuizErrorKind::InvalidTransition => "invalid_transition",
            QuizErrorKind::InternalInconsistency => "internal_inconsistency",
            QuizErrorKind::Storage => "storage",
        }
    }
}

/// Errors emitted by `QuizService`. The session is unchanged whenever one is returned,
/// except after `InternalInconsistency`, when it has been reset to the start.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<InputError> for QuizServiceError {
    fn from(err: InputError) -> Self {
        Self::Transition(TransitionError::InvalidInput(err))
    }
}

impl QuizServiceError {
    #[must_use]
    pub fn kind(&self) -> QuizErrorKind {
        match self {
            QuizServiceError::Transition(err) => match err {
                TransitionError::StaleSubmission { .. } => QuizErrorKind::StaleSubmission,
                TransitionError::InvalidTransition { .. } => QuizErrorKind::InvalidTransition,
                TransitionError::InternalInconsistency { .. } => {
                    QuizErrorKind::InternalInconsistency
                }
                _ => QuizErrorKind::InvalidInput,
            },
            QuizServiceError::Answer(_) => QuizErrorKind::InvalidInput,
            QuizServiceError::Storage(_) => QuizErrorKind::Storage,
        }
    }
}

/// Errors emitted while reading a scenario catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}
