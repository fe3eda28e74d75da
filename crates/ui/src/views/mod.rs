mod finished;
mod page;
pub mod scenario;
mod start;

#[cfg(test)]
mod view_smoke;

pub use finished::FinishedPanel;
pub use page::{QuizPage, QuizPageProps};
pub use start::StartPanel;
