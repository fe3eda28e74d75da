use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use drill_core::OnComplete;
use services::QuizSettings;

const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBind { raw: String },
    InvalidOnComplete { raw: String },
    EmptyCatalogPath,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBind { raw } => write!(f, "invalid --bind value: {raw}"),
            ArgsError::InvalidOnComplete { raw } => {
                write!(f, "invalid --on-complete value: {raw} (expected finish or loop)")
            }
            ArgsError::EmptyCatalogPath => write!(f, "--catalog must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--bind <addr>] [--catalog <path>] [--on-complete finish|loop]"
    );
    eprintln!("                      [--shuffle] [--reset-after-summary]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bind {DEFAULT_BIND}");
    eprintln!("  --catalog <built-in scenarios>");
    eprintln!("  --on-complete finish");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_BIND, DRILL_CATALOG, DRILL_ON_COMPLETE, DRILL_SHUFFLE=1,");
    eprintln!("  DRILL_RESET_AFTER_SUMMARY=1, RUST_LOG");
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve(Config),
    Help,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub quiz: QuizSettings,
}

impl Config {
    /// Parse flags, falling back to `env` for anything not given on the command line.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags, missing values or unparsable values.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Command, ArgsError> {
        let mut bind = parse_bind(env("DRILL_BIND").unwrap_or_else(|| DEFAULT_BIND.into()))?;
        let mut quiz = QuizSettings {
            catalog_path: env("DRILL_CATALOG")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            shuffle: env("DRILL_SHUFFLE").is_some_and(|value| is_truthy(&value)),
            on_complete: match env("DRILL_ON_COMPLETE") {
                Some(raw) => parse_on_complete(raw)?,
                None => OnComplete::default(),
            },
            reset_after_summary: env("DRILL_RESET_AFTER_SUMMARY")
                .is_some_and(|value| is_truthy(&value)),
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bind" => bind = parse_bind(require_value(&mut args, "--bind")?)?,
                "--catalog" => {
                    let value = require_value(&mut args, "--catalog")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyCatalogPath);
                    }
                    quiz.catalog_path = Some(PathBuf::from(value));
                }
                "--on-complete" => {
                    quiz.on_complete =
                        parse_on_complete(require_value(&mut args, "--on-complete")?)?;
                }
                "--shuffle" => quiz.shuffle = true,
                "--reset-after-summary" => quiz.reset_after_summary = true,
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Serve(Self { bind, quiz }))
    }
}

fn parse_bind(raw: String) -> Result<SocketAddr, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidBind { raw })
}

fn parse_on_complete(raw: String) -> Result<OnComplete, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidOnComplete { raw })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
