#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_loader;
pub mod error;
pub mod sessions;

pub use app_services::{AppServices, QuizSettings};
pub use error::{AppServicesError, CatalogLoadError, QuizErrorKind, QuizServiceError};
pub use sessions::{AnswerResult, QuizService, SessionProgress, parse_submission};
