use std::path::PathBuf;
use std::sync::Arc;

use drill_core::model::Catalog;
use drill_core::{OnComplete, QuizMachine};
use storage::repository::Storage;
use tracing::info;

use crate::catalog_loader::{load_catalog, shuffle_catalog};
use crate::error::AppServicesError;
use crate::sessions::QuizService;

/// Startup knobs for the quiz, resolved by the binary from flags and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSettings {
    pub catalog_path: Option<PathBuf>,
    pub shuffle: bool,
    pub on_complete: OnComplete,
    pub reset_after_summary: bool,
}

/// Assembles app-facing services.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog cannot be loaded.
    pub fn in_memory(settings: &QuizSettings) -> Result<Self, AppServicesError> {
        Self::with_storage(settings, Storage::in_memory())
    }

    /// Build services over the given storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog cannot be loaded.
    pub fn with_storage(
        settings: &QuizSettings,
        storage: Storage,
    ) -> Result<Self, AppServicesError> {
        let catalog = match &settings.catalog_path {
            Some(path) => load_catalog(path)?,
            None => Catalog::builtin(),
        };
        let catalog = if settings.shuffle {
            shuffle_catalog(catalog, &mut rand::rng())?
        } else {
            catalog
        };
        info!(
            scenarios = catalog.len(),
            source = settings
                .catalog_path
                .as_ref()
                .map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
            shuffled = settings.shuffle,
            on_complete = %settings.on_complete,
            "catalog loaded"
        );

        let machine = QuizMachine::new(catalog, settings.on_complete);
        let quiz = Arc::new(
            QuizService::new(machine, storage.sessions)
                .with_reset_after_summary(settings.reset_after_summary),
        );

        Ok(Self { quiz })
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_builtin_catalog() {
        let services = AppServices::in_memory(&QuizSettings::default()).unwrap();
        let quiz = services.quiz();
        assert_eq!(quiz.machine().catalog(), &Catalog::builtin());
        assert_eq!(quiz.machine().on_complete(), OnComplete::Finish);
        assert!(!quiz.reset_after_summary());
    }

    #[test]
    fn missing_catalog_file_fails_startup() {
        let settings = QuizSettings {
            catalog_path: Some(PathBuf::from("/nope/catalog.json")),
            ..QuizSettings::default()
        };
        assert!(AppServices::in_memory(&settings).is_err());
    }
}
