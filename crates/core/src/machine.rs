//! The session state machine.
//!
//! ```text
//! Start --begin--> AtIndex(0) --submit--> ... --> AtIndex(N-1)
//!       --submit--> Finished --reset--> Start
//! ```
//!
//! Under `OnComplete::Loop` the final submission wraps back to `AtIndex(0)` instead
//! of finishing. Transitions take a `Session` by value and hand back a whole new one,
//! so a caller either swaps in the complete result or keeps the old value.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::model::{Catalog, InputError, PointsDelta, Position, Scenario, ScenarioId, Session};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Transition that was attempted from the wrong position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Begin,
    Submit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Begin => write!(f, "begin"),
            Action::Submit => write!(f, "submit"),
        }
    }
}

/// Rejected transitions. The session is never modified when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("answer for scenario {submitted} is stale; scenario {expected} is current")]
    StaleSubmission {
        expected: ScenarioId,
        submitted: ScenarioId,
    },

    #[error("cannot {action} from position {from}")]
    InvalidTransition { from: Position, action: Action },

    #[error("position {index} is outside a catalog of {len} scenarios")]
    InternalInconsistency { index: usize, len: usize },
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// What happens after the last scenario is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnComplete {
    /// Move to `Finished` and show the final score.
    #[default]
    Finish,
    /// Wrap around to the first scenario, never finishing.
    Loop,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown completion policy `{0}` (expected `finish` or `loop`)")]
pub struct ParseOnCompleteError(String);

impl FromStr for OnComplete {
    type Err = ParseOnCompleteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finish" => Ok(Self::Finish),
            "loop" => Ok(Self::Loop),
            _ => Err(ParseOnCompleteError(s.to_string())),
        }
    }
}

impl fmt::Display for OnComplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnComplete::Finish => write!(f, "finish"),
            OnComplete::Loop => write!(f, "loop"),
        }
    }
}

//
// ─── VIEW + TRANSITION ─────────────────────────────────────────────────────────
//

/// What the page renderer should show for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewModel {
    Start {
        total: usize,
    },
    Scenario {
        index: usize,
        total: usize,
        score: i64,
        scenario: Scenario,
    },
    Finished {
        score: i64,
        total: usize,
    },
}

impl ViewModel {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, ViewModel::Finished { .. })
    }
}

/// An accepted transition: the replacement session plus its headline values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub score: i64,
    pub position: Position,
}

impl From<Session> for Transition {
    fn from(session: Session) -> Self {
        Self {
            session,
            score: session.score(),
            position: session.position(),
        }
    }
}

//
// ─── MACHINE ───────────────────────────────────────────────────────────────────
//

/// Applies the quiz rules to sessions over a fixed catalog.
///
/// Point deltas are opaque here; scoring happens in `Scenario::assess`.
#[derive(Debug, Clone)]
pub struct QuizMachine {
    catalog: Catalog,
    on_complete: OnComplete,
}

impl QuizMachine {
    #[must_use]
    pub fn new(catalog: Catalog, on_complete: OnComplete) -> Self {
        Self {
            catalog,
            on_complete,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn on_complete(&self) -> OnComplete {
        self.on_complete
    }

    /// False when the session points past the end of the catalog.
    #[must_use]
    pub fn is_consistent(&self, session: &Session) -> bool {
        match session.position() {
            Position::AtIndex(i) => i < self.catalog.len(),
            Position::Start | Position::Finished => true,
        }
    }

    /// Resolve the session to a view. Out-of-range positions fall back to `Start`.
    #[must_use]
    pub fn current_view(&self, session: &Session) -> ViewModel {
        let total = self.catalog.len();
        match session.position() {
            Position::Start => ViewModel::Start { total },
            Position::AtIndex(index) => match self.catalog.get(index) {
                Some(scenario) => ViewModel::Scenario {
                    index,
                    total,
                    score: session.score(),
                    scenario: scenario.clone(),
                },
                None => {
                    warn!(index, total, "session position outside catalog; showing start");
                    ViewModel::Start { total }
                }
            },
            Position::Finished => ViewModel::Finished {
                score: session.score(),
                total,
            },
        }
    }

    /// The scenario awaiting an answer.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` at `Start`/`Finished`, and
    /// `TransitionError::InternalInconsistency` for an out-of-range index.
    pub fn current_scenario(&self, session: &Session) -> Result<&Scenario, TransitionError> {
        match session.position() {
            Position::AtIndex(index) => {
                self.catalog
                    .get(index)
                    .ok_or(TransitionError::InternalInconsistency {
                        index,
                        len: self.catalog.len(),
                    })
            }
            from @ (Position::Start | Position::Finished) => {
                Err(TransitionError::InvalidTransition {
                    from,
                    action: Action::Submit,
                })
            }
        }
    }

    /// Leave the start page for the first scenario.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidTransition` unless the session is at `Start`.
    pub fn begin(&self, session: Session) -> Result<Transition, TransitionError> {
        match session.position() {
            Position::Start => Ok(session.with_position(Position::AtIndex(0)).into()),
            from => Err(TransitionError::InvalidTransition {
                from,
                action: Action::Begin,
            }),
        }
    }

    /// Apply an answer's delta to the score and advance one position.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside a scenario, `InternalInconsistency` for an
    /// out-of-range position, `StaleSubmission` when `scenario_id` is not the current
    /// scenario, and `InvalidInput` if the score would overflow.
    pub fn submit_answer(
        &self,
        session: Session,
        scenario_id: ScenarioId,
        delta: PointsDelta,
    ) -> Result<Transition, TransitionError> {
        let index = match session.position() {
            Position::AtIndex(index) => index,
            from => {
                return Err(TransitionError::InvalidTransition {
                    from,
                    action: Action::Submit,
                });
            }
        };
        let current = self.current_scenario(&session)?.id();
        if current != scenario_id {
            return Err(TransitionError::StaleSubmission {
                expected: current,
                submitted: scenario_id,
            });
        }

        let next = if index + 1 < self.catalog.len() {
            Position::AtIndex(index + 1)
        } else {
            match self.on_complete {
                OnComplete::Finish => Position::Finished,
                OnComplete::Loop => Position::AtIndex(0),
            }
        };

        Ok(session.apply(delta)?.with_position(next).into())
    }

    /// Back to a fresh session, whatever the prior state.
    #[must_use]
    pub fn reset(&self) -> Transition {
        Session::new().into()
    }
}
