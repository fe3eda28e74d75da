use std::fmt;

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use drill_core::{Answer, PhishingAction, ScenarioId, TransitionError};
use serde::Deserialize;
use services::{QuizErrorKind, QuizService, QuizServiceError};
use storage::repository::SessionKey;
use tracing::{debug, error};
use ui::{map_page, paths, render_page};

use super::AppState;
use super::response::status_for;
use crate::session_key::RequestSession;

/// Fields posted by the scenario cards. Exactly one of `action`, `option` or
/// `password` is expected alongside `scenario`.
#[derive(Deserialize)]
pub(super) struct AnswerForm {
    scenario: String,
    action: Option<String>,
    option: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AnswerFormError {
    InvalidScenario(String),
    UnknownAction(String),
    InvalidOption(String),
    MissingAnswer,
}

impl fmt::Display for AnswerFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerFormError::InvalidScenario(raw) => write!(f, "invalid scenario id: {raw}"),
            AnswerFormError::UnknownAction(raw) => write!(f, "unknown action: {raw}"),
            AnswerFormError::InvalidOption(raw) => write!(f, "invalid option: {raw}"),
            AnswerFormError::MissingAnswer => write!(f, "no answer was submitted"),
        }
    }
}

impl AnswerForm {
    fn into_answer(self) -> Result<(ScenarioId, Answer), AnswerFormError> {
        let scenario = self
            .scenario
            .parse::<ScenarioId>()
            .map_err(|_| AnswerFormError::InvalidScenario(self.scenario.clone()))?;

        let answer = if let Some(action) = self.action {
            PhishingAction::from_form_value(action.trim())
                .map(Answer::Phishing)
                .ok_or(AnswerFormError::UnknownAction(action))?
        } else if let Some(option) = self.option {
            option
                .trim()
                .parse::<usize>()
                .map(Answer::Mfa)
                .map_err(|_| AnswerFormError::InvalidOption(option))?
        } else if let Some(password) = self.password {
            Answer::Password(password)
        } else {
            return Err(AnswerFormError::MissingAnswer);
        };

        Ok((scenario, answer))
    }
}

/// GET `/`: the rendered page for the session's current view.
pub(super) async fn index(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
) -> Response {
    match state.quiz().page_view(&key).await {
        Ok(view) => Html(render_page(map_page(&view, None, None))).into_response(),
        Err(err) => failure_page(&err),
    }
}

/// POST `/quiz/begin`. A repeated click lands on the current page instead of an error.
pub(super) async fn begin(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
) -> Response {
    match state.quiz().begin(&key).await {
        Ok(_) => Redirect::to(paths::INDEX).into_response(),
        Err(err) if err.kind() == QuizErrorKind::InvalidTransition => {
            Redirect::to(paths::INDEX).into_response()
        }
        Err(err) => failure_page(&err),
    }
}

/// POST `/quiz/reset`.
pub(super) async fn reset(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
) -> Response {
    match state.quiz().reset(&key).await {
        Ok(_) => Redirect::to(paths::INDEX).into_response(),
        Err(err) => failure_page(&err),
    }
}

/// POST `/quiz/answer`: score the answer and render the next view with feedback.
pub(super) async fn answer(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
    form: Result<Form<AnswerForm>, FormRejection>,
) -> Response {
    let quiz = state.quiz();
    let parsed = match form {
        Ok(Form(form)) => form.into_answer().map_err(|err| err.to_string()),
        Err(rejection) => Err(rejection.body_text()),
    };
    let (scenario, answer) = match parsed {
        Ok(parsed) => parsed,
        Err(notice) => {
            debug!(%key, %notice, "answer form rejected");
            return current_page(quiz, &key, StatusCode::BAD_REQUEST, &notice).await;
        }
    };

    match quiz.answer(&key, scenario, &answer).await {
        Ok(result) => {
            let view = quiz.machine().current_view(&result.transition.session);
            Html(render_page(map_page(&view, Some(&result.assessment), None))).into_response()
        }
        Err(err) => {
            let status = status_for(err.kind());
            if status.is_server_error() {
                return failure_page(&err);
            }
            current_page(quiz, &key, status, &notice_for(&err)).await
        }
    }
}

async fn current_page(
    quiz: &QuizService,
    key: &SessionKey,
    status: StatusCode,
    notice: &str,
) -> Response {
    match quiz.current_view(key).await {
        Ok(view) => {
            let page = map_page(&view, None, Some(notice));
            (status, Html(render_page(page))).into_response()
        }
        Err(err) => failure_page(&err),
    }
}

fn notice_for(err: &QuizServiceError) -> String {
    match err {
        QuizServiceError::Transition(TransitionError::StaleSubmission { .. }) => {
            "That answer was for an earlier scenario. Here is the current one.".to_string()
        }
        QuizServiceError::Transition(TransitionError::InternalInconsistency { .. }) => {
            "Your progress could not be resumed and has been reset.".to_string()
        }
        QuizServiceError::Transition(TransitionError::InvalidTransition { .. }) => {
            "That answer does not fit the current page.".to_string()
        }
        other => other.to_string(),
    }
}

const FAILURE_PAGE: &str = "<!DOCTYPE html><html><body><h1>Something went wrong</h1>\
    <p><a href=\"/\">Back to the drill</a></p></body></html>";

fn failure_page(err: &QuizServiceError) -> Response {
    let status = status_for(err.kind());
    error!(%err, "page request failed");
    (status, Html(FAILURE_PAGE)).into_response()
}
