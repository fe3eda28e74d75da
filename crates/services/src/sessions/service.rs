use std::fmt;
use std::sync::Arc;

use drill_core::model::{PointsDelta, Position, ScenarioId, Session};
use drill_core::{Answer, Assessment, QuizMachine, Transition, TransitionError, ViewModel};
use storage::repository::{SessionKey, SessionStore};
use tracing::{debug, info, warn};

use super::locks::SessionLocks;
use crate::error::QuizServiceError;

/// Outcome of answering the current scenario from raw trainee input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub assessment: Assessment,
    pub transition: Transition,
}

/// Runs the quiz state machine against a keyed session store.
///
/// Every operation is one read-modify-write performed while holding the session's
/// lock, so concurrent requests for the same key are applied one after another.
pub struct QuizService {
    machine: QuizMachine,
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
    reset_after_summary: bool,
}

impl QuizService {
    #[must_use]
    pub fn new(machine: QuizMachine, store: Arc<dyn SessionStore>) -> Self {
        Self {
            machine,
            store,
            locks: SessionLocks::default(),
            reset_after_summary: false,
        }
    }

    /// Reset a session as soon as its final score has been rendered once.
    #[must_use]
    pub fn with_reset_after_summary(mut self, reset_after_summary: bool) -> Self {
        self.reset_after_summary = reset_after_summary;
        self
    }

    #[must_use]
    pub fn machine(&self) -> &QuizMachine {
        &self.machine
    }

    #[must_use]
    pub fn reset_after_summary(&self) -> bool {
        self.reset_after_summary
    }

    /// Current view for a session, repairing an out-of-range position first.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the store fails.
    pub async fn current_view(&self, key: &SessionKey) -> Result<ViewModel, QuizServiceError> {
        let _guard = self.locks.acquire(key).await;
        let session = self.load_repaired(key).await?;
        Ok(self.machine.current_view(&session))
    }

    /// View used for page rendering; honours `reset_after_summary`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the store fails.
    pub async fn page_view(&self, key: &SessionKey) -> Result<ViewModel, QuizServiceError> {
        let _guard = self.locks.acquire(key).await;
        let session = self.load_repaired(key).await?;
        let view = self.machine.current_view(&session);
        if view.is_finished() && self.reset_after_summary {
            self.store.save(key, self.machine.reset().session).await?;
            info!(%key, score = session.score(), "final score shown; session reset");
        }
        Ok(view)
    }

    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the session is at the start page.
    pub async fn begin(&self, key: &SessionKey) -> Result<Transition, QuizServiceError> {
        let _guard = self.locks.acquire(key).await;
        let session = self.load_repaired(key).await?;
        let transition = self.machine.begin(session).map_err(|err| {
            debug!(%key, %err, "begin rejected");
            err
        })?;
        self.store.save(key, transition.session).await?;
        info!(%key, position = %transition.position, "quiz started");
        Ok(transition)
    }

    /// Apply a caller-computed delta for the current scenario.
    ///
    /// # Errors
    ///
    /// Returns `StaleSubmission`, `InvalidTransition` or `InvalidInput` without touching
    /// the session; `InternalInconsistency` after resetting it.
    pub async fn submit(
        &self,
        key: &SessionKey,
        scenario_id: ScenarioId,
        delta: PointsDelta,
    ) -> Result<Transition, QuizServiceError> {
        let _guard = self.locks.acquire(key).await;
        let session = self.store.load(key).await?;
        let transition = match self.machine.submit_answer(session, scenario_id, delta) {
            Ok(transition) => transition,
            Err(err) => return Err(self.reject(key, err).await),
        };
        self.store.save(key, transition.session).await?;
        info!(
            %key,
            scenario = %scenario_id,
            points = delta.value(),
            score = transition.score,
            position = %transition.position,
            "answer accepted"
        );
        Ok(transition)
    }

    /// Score raw trainee input against the current scenario, then submit the result.
    ///
    /// # Errors
    ///
    /// As for `submit`, plus `QuizServiceError::Answer` when the input does not fit the
    /// scenario.
    ///
    /// The returned transition is what the caller renders. When it finishes the quiz and
    /// `reset_after_summary` is on, the stored session is already back at the start.
    pub async fn answer(
        &self,
        key: &SessionKey,
        scenario_id: ScenarioId,
        answer: &Answer,
    ) -> Result<AnswerResult, QuizServiceError> {
        let _guard = self.locks.acquire(key).await;
        let session = self.store.load(key).await?;
        let assessment = match self.assess(&session, scenario_id, answer) {
            Ok(assessment) => assessment,
            Err(QuizServiceError::Transition(err)) => return Err(self.reject(key, err).await),
            Err(err) => return Err(err),
        };
        let transition = match self
            .machine
            .submit_answer(session, scenario_id, assessment.points)
        {
            Ok(transition) => transition,
            Err(err) => return Err(self.reject(key, err).await),
        };
        self.store.save(key, transition.session).await?;
        info!(
            %key,
            scenario = %scenario_id,
            correct = assessment.correct,
            points = assessment.points.value(),
            score = transition.score,
            position = %transition.position,
            "answer scored"
        );
        if transition.position == Position::Finished && self.reset_after_summary {
            self.store.save(key, self.machine.reset().session).await?;
            info!(%key, score = transition.score, "final score shown; session reset");
        }
        Ok(AnswerResult {
            assessment,
            transition,
        })
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the store fails.
    pub async fn reset(&self, key: &SessionKey) -> Result<Transition, QuizServiceError> {
        let _guard = self.locks.acquire(key).await;
        let transition = self.machine.reset();
        self.store.save(key, transition.session).await?;
        info!(%key, "session reset");
        Ok(transition)
    }

    fn assess(
        &self,
        session: &Session,
        scenario_id: ScenarioId,
        answer: &Answer,
    ) -> Result<Assessment, QuizServiceError> {
        let scenario = self.machine.current_scenario(session)?;
        if scenario.id() != scenario_id {
            return Err(TransitionError::StaleSubmission {
                expected: scenario.id(),
                submitted: scenario_id,
            }
            .into());
        }
        Ok(scenario.assess(answer)?)
    }

    async fn load_repaired(&self, key: &SessionKey) -> Result<Session, QuizServiceError> {
        let session = self.store.load(key).await?;
        if self.machine.is_consistent(&session) {
            return Ok(session);
        }
        warn!(
            %key,
            position = %session.position(),
            catalog_len = self.machine.catalog().len(),
            "session position outside catalog; resetting"
        );
        let fresh = self.machine.reset().session;
        self.store.save(key, fresh).await?;
        Ok(fresh)
    }

    async fn reject(&self, key: &SessionKey, err: TransitionError) -> QuizServiceError {
        if let TransitionError::InternalInconsistency { index, len } = err {
            warn!(%key, index, len, "session position outside catalog; resetting");
            if let Err(save_err) = self.store.save(key, self.machine.reset().session).await {
                return save_err.into();
            }
        } else {
            debug!(%key, %err, "submission rejected");
        }
        err.into()
    }
}

impl fmt::Debug for QuizService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizService")
            .field("catalog_len", &self.machine.catalog().len())
            .field("on_complete", &self.machine.on_complete())
            .field("reset_after_summary", &self.reset_after_summary)
            .finish_non_exhaustive()
    }
}
