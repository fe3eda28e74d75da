use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use drill_core::{Position, Transition};
use serde::Serialize;
use services::{QuizErrorKind, QuizServiceError};
use tracing::{debug, error};

/// Body returned for every accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub new_score: i64,
    pub new_position: Position,
}

impl From<&Transition> for MutationResponse {
    fn from(transition: &Transition) -> Self {
        Self {
            success: true,
            new_score: transition.score,
            new_position: transition.position,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
    message: String,
}

#[must_use]
pub fn status_for(kind: QuizErrorKind) -> StatusCode {
    match kind {
        QuizErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        QuizErrorKind::StaleSubmission
        | QuizErrorKind::InvalidTransition
        | QuizErrorKind::InternalInconsistency => StatusCode::CONFLICT,
        QuizErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A rejected API request, rendered as `{ success: false, error, message }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub(crate) fn malformed_body(rejection: &JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: QuizErrorKind::InvalidInput.as_str(),
            message: rejection.body_text(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<QuizServiceError> for ApiError {
    fn from(err: QuizServiceError) -> Self {
        let kind = err.kind();
        Self {
            status: status_for(kind),
            kind: kind.as_str(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(error = self.kind, detail = %self.message, "request failed");
        } else {
            debug!(error = self.kind, detail = %self.message, "request rejected");
        }
        let body = ErrorBody {
            success: false,
            error: self.kind,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
