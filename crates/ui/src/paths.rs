//! Form targets shared by the rendered pages and the router.

pub const INDEX: &str = "/";
pub const BEGIN: &str = "/quiz/begin";
pub const ANSWER: &str = "/quiz/answer";
pub const RESET: &str = "/quiz/reset";
