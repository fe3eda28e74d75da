use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest absolute score change a single answer may carry.
pub const MAX_POINTS_DELTA: i64 = 1_000;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a submitted payload is rejected before touching the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("field `{0}` must be an integer")]
    NotAnInteger(&'static str),

    #[error("point delta {0} is outside the accepted range")]
    OutOfRange(i64),

    #[error("score would overflow")]
    ScoreOverflow,
}

//
// ─── POINT DELTA ───────────────────────────────────────────────────────────────
//

/// Signed score adjustment for one answered scenario, bounded by `MAX_POINTS_DELTA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PointsDelta(i64);

impl PointsDelta {
    /// # Errors
    ///
    /// Returns `InputError::OutOfRange` if `|points| > MAX_POINTS_DELTA`.
    pub fn new(points: i64) -> Result<Self, InputError> {
        if points.unsigned_abs() > MAX_POINTS_DELTA.unsigned_abs() {
            return Err(InputError::OutOfRange(points));
        }
        Ok(Self(points))
    }

    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for PointsDelta {
    type Error = InputError;

    fn try_from(points: i64) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

//
// ─── POSITION ──────────────────────────────────────────────────────────────────
//

/// Where a session currently sits in the scenario sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum Position {
    /// Not yet begun.
    #[default]
    Start,
    /// Showing the scenario at this catalog index.
    AtIndex(usize),
    /// Every scenario answered; the final score is on display.
    Finished,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Start => write!(f, "start"),
            Position::AtIndex(i) => write!(f, "at_index({i})"),
            Position::Finished => write!(f, "finished"),
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Per-user quiz state. `score` is the sum of every delta applied since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    score: i64,
    position: Position,
}

impl Session {
    /// A fresh session: zero score, waiting at `Start`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a session from stored parts.
    #[must_use]
    pub fn from_parts(score: i64, position: Position) -> Self {
        Self { score, position }
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    pub(crate) fn apply(self, delta: PointsDelta) -> Result<Self, InputError> {
        let score = self
            .score
            .checked_add(delta.value())
            .ok_or(InputError::ScoreOverflow)?;
        Ok(Self { score, ..self })
    }
}
