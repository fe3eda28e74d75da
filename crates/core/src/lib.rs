#![forbid(unsafe_code)]

pub mod machine;
pub mod model;
pub mod scoring;

pub use machine::{Action, OnComplete, QuizMachine, Transition, TransitionError, ViewModel};
pub use model::{Catalog, PointsDelta, Position, Scenario, ScenarioId, Session};
pub use scoring::{Answer, AnswerError, Assessment, PhishingAction};
