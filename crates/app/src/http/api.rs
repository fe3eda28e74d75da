use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use drill_core::ViewModel;
use serde_json::Value;
use services::parse_submission;

use super::AppState;
use super::response::{ApiError, MutationResponse};
use crate::session_key::RequestSession;

/// GET `/api/view`: the session's current view.
pub(super) async fn view(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
) -> Result<Json<ViewModel>, ApiError> {
    Ok(Json(state.quiz().current_view(&key).await?))
}

/// POST `/submit` with `{ "scenario": id, "points": integer }`.
pub(super) async fn submit(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::malformed_body(&rejection))?;
    let (scenario, delta) = parse_submission(&body)?;
    let transition = state.quiz().submit(&key, scenario, delta).await?;
    Ok(Json(MutationResponse::from(&transition)))
}

/// POST `/begin`: leave the start page for the first scenario.
pub(super) async fn begin(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
) -> Result<Json<MutationResponse>, ApiError> {
    let transition = state.quiz().begin(&key).await?;
    Ok(Json(MutationResponse::from(&transition)))
}

/// POST `/reset`: zero the score and return to the start page.
pub(super) async fn reset(
    State(state): State<AppState>,
    RequestSession(key): RequestSession,
) -> Result<Json<MutationResponse>, ApiError> {
    let transition = state.quiz().reset(&key).await?;
    Ok(Json(MutationResponse::from(&transition)))
}
