use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::ScenarioId;
use crate::model::scenario::{
    MfaOption, MfaScenario, Outcome, PasswordScenario, PhishingScenario, Scenario,
};
use crate::model::session::MAX_POINTS_DELTA;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one scenario")]
    Empty,

    #[error("scenario id {0} appears more than once")]
    DuplicateId(ScenarioId),

    #[error("mfa scenario {0} has no options")]
    NoOptions(ScenarioId),

    #[error("password scenario {0} must require at least one character")]
    InvalidMinLength(ScenarioId),

    #[error("scenario {id} awards {points} points, outside the accepted delta range")]
    PointsOutOfRange { id: ScenarioId, points: i64 },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered, validated, read-only list of scenarios fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
}

impl Catalog {
    /// Build a catalog from an ordered list of scenarios.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, ids repeat, an mfa scenario has
    /// no options, a password scenario has a zero minimum length, or any point value
    /// falls outside the accepted delta range.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        if scenarios.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(scenarios.len());
        for scenario in &scenarios {
            let id = scenario.id();
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateId(id));
            }
            match scenario {
                Scenario::Mfa(mfa) if mfa.options.is_empty() => {
                    return Err(CatalogError::NoOptions(id));
                }
                Scenario::Password(pw) if pw.min_length == 0 => {
                    return Err(CatalogError::InvalidMinLength(id));
                }
                _ => {}
            }
            if let Some(points) = scenario
                .point_values()
                .find(|p| p.unsigned_abs() > MAX_POINTS_DELTA.unsigned_abs())
            {
                return Err(CatalogError::PointsOutOfRange { id, points });
            }
        }

        Ok(Self { scenarios })
    }

    /// The training content shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            scenarios: builtin_scenarios(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }

    /// Index of the scenario with the given id, if present.
    #[must_use]
    pub fn position_of(&self, id: ScenarioId) -> Option<usize> {
        self.scenarios.iter().position(|s| s.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    #[must_use]
    pub fn into_scenarios(self) -> Vec<Scenario> {
        self.scenarios
    }
}

fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::Phishing(PhishingScenario {
            id: ScenarioId::new(101),
            sender: "IT Support <support@paninsingen-ps.com>".into(),
            subject: "Action Required: Urgent Payroll Update".into(),
            body: "Dear Teacher, Please click the link below to verify your login \
                   credentials immediately to avoid payroll disruption."
                .into(),
            link_text: "[VERIFY PAYROLL]".into(),
            is_phishing: true,
            correct: Outcome::new(10, "Correct! Phishing reported."),
            incorrect: Outcome::new(-5, "Incorrect! Malicious link clicked."),
        }),
        Scenario::Password(PasswordScenario {
            id: ScenarioId::new(102),
            prompt: "Your school account password expired. Choose a new one.".into(),
            min_length: 12,
            strong: Outcome::new(10, "Strong password! Length and variety keep attackers out."),
            weak: Outcome::new(
                -5,
                "Weak password. Use 12+ characters mixing upper and lower case, digits and symbols.",
            ),
        }),
        Scenario::Mfa(MfaScenario {
            id: ScenarioId::new(103),
            prompt: "Your phone shows a sign-in approval request you did not start. What do you do?"
                .into(),
            options: vec![
                MfaOption {
                    text: "Approve it so the notifications stop".into(),
                    correct: false,
                    points: -5,
                    feedback: "Approving an unexpected request lets an attacker in.".into(),
                },
                MfaOption {
                    text: "Deny the request and report it to IT".into(),
                    correct: true,
                    points: 10,
                    feedback: "Correct! Someone may already know your password.".into(),
                },
                MfaOption {
                    text: "Read the one-time code to the caller claiming to be IT".into(),
                    correct: false,
                    points: -10,
                    feedback: "IT will never ask for your one-time code.".into(),
                },
            ],
        }),
    ]
}
