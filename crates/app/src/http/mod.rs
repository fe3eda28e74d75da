//! HTTP surface: a JSON API for scripted clients and server-rendered pages for people.

mod api;
mod pages;
mod response;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use services::QuizService;
use tower_http::trace::TraceLayer;
use ui::paths;

pub use response::{ApiError, MutationResponse, status_for};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    quiz: Arc<QuizService>,
}

impl AppState {
    #[must_use]
    pub fn new(quiz: Arc<QuizService>) -> Self {
        Self { quiz }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizService {
        &self.quiz
    }
}

/// Every route the server answers, with request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(paths::INDEX, get(pages::index))
        .route(paths::BEGIN, post(pages::begin))
        .route(paths::ANSWER, post(pages::answer))
        .route(paths::RESET, post(pages::reset))
        .route("/api/view", get(api::view))
        .route("/submit", post(api::submit))
        .route("/begin", post(api::begin))
        .route("/reset", post(api::reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
