//! Per-scenario scoring rules.
//!
//! The state machine never looks inside a scenario; callers turn a trainee's
//! answer into a point delta here and hand only the number to the machine.

use thiserror::Error;

use crate::model::{
    InputError, MfaScenario, PasswordScenario, PhishingScenario, PointsDelta, Scenario,
    ScenarioKind,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("a {answer} answer cannot be scored against a {scenario} scenario")]
    KindMismatch {
        scenario: &'static str,
        answer: &'static str,
    },

    #[error("option {index} does not exist (scenario has {available})")]
    UnknownOption { index: usize, available: usize },

    #[error(transparent)]
    Points(#[from] InputError),
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// What the trainee did with a phishing email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhishingAction {
    Report,
    Click,
}

impl PhishingAction {
    #[must_use]
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "report" | "safe" => Some(Self::Report),
            "click" => Some(Self::Click),
            _ => None,
        }
    }
}

/// A trainee's raw input for the scenario on screen.
#[derive(Clone, PartialEq, Eq)]
pub enum Answer {
    Phishing(PhishingAction),
    Password(String),
    Mfa(usize),
}

impl Answer {
    #[must_use]
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Answer::Phishing(_) => ScenarioKind::Phishing,
            Answer::Password(_) => ScenarioKind::Password,
            Answer::Mfa(_) => ScenarioKind::Mfa,
        }
    }
}

// Password candidates stay out of logs and panic messages.
impl std::fmt::Debug for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Phishing(action) => f.debug_tuple("Phishing").field(action).finish(),
            Answer::Password(_) => f.debug_tuple("Password").field(&"<redacted>").finish(),
            Answer::Mfa(index) => f.debug_tuple("Mfa").field(index).finish(),
        }
    }
}

/// Result of scoring one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub points: PointsDelta,
    pub correct: bool,
    pub feedback: String,
}

//
// ─── PASSWORD STRENGTH ─────────────────────────────────────────────────────────
//

/// The five predicates a strong password must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PasswordStrength {
    pub long_enough: bool,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl PasswordStrength {
    #[must_use]
    pub fn evaluate(candidate: &str, min_length: usize) -> Self {
        Self {
            long_enough: candidate.chars().count() >= min_length,
            has_lowercase: candidate.chars().any(char::is_lowercase),
            has_uppercase: candidate.chars().any(char::is_uppercase),
            has_digit: candidate.chars().any(|c| c.is_ascii_digit()),
            has_special: candidate
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    #[must_use]
    pub fn is_strong(self) -> bool {
        self.long_enough
            && self.has_lowercase
            && self.has_uppercase
            && self.has_digit
            && self.has_special
    }
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

impl Scenario {
    /// Score a trainee's answer using the rules embedded in this scenario.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::KindMismatch` if the answer targets another scenario kind,
    /// and `AnswerError::UnknownOption` for an mfa choice that does not exist.
    pub fn assess(&self, answer: &Answer) -> Result<Assessment, AnswerError> {
        match (self, answer) {
            (Scenario::Phishing(s), Answer::Phishing(action)) => assess_phishing(s, *action),
            (Scenario::Password(s), Answer::Password(candidate)) => {
                assess_password(s, candidate)
            }
            (Scenario::Mfa(s), Answer::Mfa(index)) => assess_mfa(s, *index),
            _ => Err(AnswerError::KindMismatch {
                scenario: self.kind().as_str(),
                answer: answer.kind().as_str(),
            }),
        }
    }
}

fn assess_phishing(
    scenario: &PhishingScenario,
    action: PhishingAction,
) -> Result<Assessment, AnswerError> {
    let expected = if scenario.is_phishing {
        PhishingAction::Report
    } else {
        PhishingAction::Click
    };
    let correct = action == expected;
    let outcome = if correct {
        &scenario.correct
    } else {
        &scenario.incorrect
    };
    Ok(Assessment {
        points: PointsDelta::new(outcome.points)?,
        correct,
        feedback: outcome.message.clone(),
    })
}

fn assess_password(
    scenario: &PasswordScenario,
    candidate: &str,
) -> Result<Assessment, AnswerError> {
    let correct = PasswordStrength::evaluate(candidate, scenario.min_length).is_strong();
    let outcome = if correct {
        &scenario.strong
    } else {
        &scenario.weak
    };
    Ok(Assessment {
        points: PointsDelta::new(outcome.points)?,
        correct,
        feedback: outcome.message.clone(),
    })
}

fn assess_mfa(scenario: &MfaScenario, index: usize) -> Result<Assessment, AnswerError> {
    let option = scenario
        .options
        .get(index)
        .ok_or(AnswerError::UnknownOption {
            index,
            available: scenario.options.len(),
        })?;
    Ok(Assessment {
        points: PointsDelta::new(option.points)?,
        correct: option.correct,
        feedback: option.feedback.clone(),
    })
}
