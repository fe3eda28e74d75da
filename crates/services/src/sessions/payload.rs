use serde_json::Value;

use drill_core::model::{InputError, PointsDelta, ScenarioId};

use crate::error::QuizServiceError;

/// Validate a raw `{ "scenario": id, "points": integer }` submission body.
///
/// The scenario id may be a JSON integer or a decimal string; points must be a JSON
/// integer. Floats, booleans and non-numeric strings are rejected.
///
/// # Errors
///
/// Returns `QuizServiceError` classified as `InvalidInput` for missing or malformed fields.
pub fn parse_submission(body: &Value) -> Result<(ScenarioId, PointsDelta), QuizServiceError> {
    let scenario = match body.get("scenario") {
        None | Some(Value::Null) => return Err(InputError::Missing("scenario").into()),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(ScenarioId::new)
            .ok_or(InputError::NotAnInteger("scenario"))?,
        Some(Value::String(s)) => s
            .parse::<ScenarioId>()
            .map_err(|_| InputError::NotAnInteger("scenario"))?,
        Some(_) => return Err(InputError::NotAnInteger("scenario").into()),
    };

    let points = match body.get("points") {
        None | Some(Value::Null) => return Err(InputError::Missing("points").into()),
        Some(Value::Number(n)) => n.as_i64().ok_or(InputError::NotAnInteger("points"))?,
        Some(_) => return Err(InputError::NotAnInteger("points").into()),
    };

    Ok((scenario, PointsDelta::new(points)?))
}
