mod locks;
mod payload;
mod progress;
mod service;

// Public API of the session subsystem.
pub use crate::error::QuizServiceError;
pub use payload::parse_submission;
pub use progress::SessionProgress;
pub use service::{AnswerResult, QuizService};
