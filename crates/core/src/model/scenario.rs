use serde::{Deserialize, Serialize};

use crate::model::ids::ScenarioId;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Points and message awarded for one branch of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub points: i64,
    pub message: String,
}

impl Outcome {
    #[must_use]
    pub fn new(points: i64, message: impl Into<String>) -> Self {
        Self {
            points,
            message: message.into(),
        }
    }
}

/// One selectable answer of a multi-factor-authentication scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaOption {
    pub text: String,
    pub correct: bool,
    pub points: i64,
    pub feedback: String,
}

//
// ─── SCENARIO KINDS ────────────────────────────────────────────────────────────
//

/// An email the trainee must either report or act upon.
///
/// `correct` is awarded when the trainee reports a malicious email or follows a
/// legitimate one; `incorrect` covers the opposite choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhishingScenario {
    pub id: ScenarioId,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub link_text: String,
    pub is_phishing: bool,
    pub correct: Outcome,
    pub incorrect: Outcome,
}

/// Asks the trainee to pick a password; scored by the strength predicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordScenario {
    pub id: ScenarioId,
    pub prompt: String,
    pub min_length: usize,
    pub strong: Outcome,
    pub weak: Outcome,
}

/// Ordered list of authentication choices, each carrying its own score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaScenario {
    pub id: ScenarioId,
    pub prompt: String,
    pub options: Vec<MfaOption>,
}

/// Tag naming the kind of a scenario without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Phishing,
    Password,
    Mfa,
}

impl ScenarioKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Phishing => "phishing",
            ScenarioKind::Password => "password",
            ScenarioKind::Mfa => "mfa",
        }
    }
}

/// A single quiz step. Immutable once placed in a `Catalog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scenario {
    Phishing(PhishingScenario),
    Password(PasswordScenario),
    Mfa(MfaScenario),
}

impl Scenario {
    #[must_use]
    pub fn id(&self) -> ScenarioId {
        match self {
            Scenario::Phishing(s) => s.id,
            Scenario::Password(s) => s.id,
            Scenario::Mfa(s) => s.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Scenario::Phishing(_) => ScenarioKind::Phishing,
            Scenario::Password(_) => ScenarioKind::Password,
            Scenario::Mfa(_) => ScenarioKind::Mfa,
        }
    }

    /// Every point value a trainee could be awarded by this scenario.
    pub fn point_values(&self) -> impl Iterator<Item = i64> + '_ {
        let fixed: Vec<i64> = match self {
            Scenario::Phishing(s) => vec![s.correct.points, s.incorrect.points],
            Scenario::Password(s) => vec![s.strong.points, s.weak.points],
            Scenario::Mfa(s) => s.options.iter().map(|o| o.points).collect(),
        };
        fixed.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_deserializes_from_tagged_json() {
        let json = r#"{
            "type": "password",
            "id": 5,
            "prompt": "Pick one",
            "min_length": 12,
            "strong": { "points": 10, "message": "Strong" },
            "weak": { "points": -5, "message": "Weak" }
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();

        assert_eq!(scenario.id(), ScenarioId::new(5));
        assert_eq!(scenario.kind(), ScenarioKind::Password);
        assert_eq!(scenario.point_values().collect::<Vec<_>>(), vec![10, -5]);
    }

    #[test]
    fn unknown_scenario_type_is_rejected() {
        let json = r#"{ "type": "quiz", "id": 1 }"#;
        assert!(serde_json::from_str::<Scenario>(json).is_err());
    }
}
