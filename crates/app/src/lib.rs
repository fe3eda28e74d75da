#![forbid(unsafe_code)]

pub mod config;
pub mod http;
pub mod session_key;

pub use config::{ArgsError, Command, Config};
pub use http::{AppState, router};
pub use session_key::{RequestSession, SESSION_COOKIE};
