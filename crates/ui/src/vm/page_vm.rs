use drill_core::model::{MfaScenario, PasswordScenario, PhishingScenario};
use drill_core::{Assessment, Scenario, ViewModel};
use services::SessionProgress;

/// Everything the page template needs, already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageVm {
    pub score_label: Option<String>,
    pub progress_label: Option<String>,
    pub body: PageBodyVm,
    pub feedback: Option<FeedbackVm>,
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageBodyVm {
    Start { total: usize },
    Phishing(PhishingVm),
    Password(PasswordVm),
    Mfa(MfaVm),
    Finished { score_label: String, verdict: &'static str },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhishingVm {
    pub scenario_id: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub link_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordVm {
    pub scenario_id: String,
    pub prompt: String,
    pub rules: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MfaOptionVm {
    pub index: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MfaVm {
    pub scenario_id: String,
    pub prompt: String,
    pub options: Vec<MfaOptionVm>,
}

/// Banner shown after an answer is scored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub class: &'static str,
    pub headline: String,
    pub message: String,
}

impl From<&Assessment> for FeedbackVm {
    fn from(assessment: &Assessment) -> Self {
        let points = assessment.points.value();
        let (class, mark) = if assessment.correct {
            ("feedback correct", "✅")
        } else {
            ("feedback wrong", "❌")
        };
        Self {
            class,
            headline: format!("{mark} {} points", signed(points)),
            message: assessment.feedback.clone(),
        }
    }
}

fn signed(points: i64) -> String {
    if points > 0 {
        format!("+{points}")
    } else {
        points.to_string()
    }
}

fn score_label(score: i64) -> String {
    format!("Current Score: {score} points 🏆")
}

/// Build the page model for a view, with optional answer feedback and notice.
#[must_use]
pub fn map_page(view: &ViewModel, feedback: Option<&Assessment>, notice: Option<&str>) -> PageVm {
    let progress = SessionProgress::from_view(view);
    let (score_label, progress_label, body) = match view {
        ViewModel::Start { total } => (None, None, PageBodyVm::Start { total: *total }),
        ViewModel::Scenario {
            score, scenario, ..
        } => (
            Some(score_label(*score)),
            Some(format!(
                "Scenario {} of {}",
                progress.answered + 1,
                progress.total
            )),
            map_scenario(scenario),
        ),
        ViewModel::Finished { score, .. } => (
            None,
            Some(format!("{} of {} scenarios completed", progress.answered, progress.total)),
            PageBodyVm::Finished {
                score_label: format!("Final score: {score} points"),
                verdict: verdict(*score),
            },
        ),
    };

    PageVm {
        score_label,
        progress_label,
        body,
        feedback: feedback.map(FeedbackVm::from),
        notice: notice.map(str::to_owned),
    }
}

fn verdict(score: i64) -> &'static str {
    if score > 0 {
        "Well done! You spotted the threats."
    } else {
        "Review the feedback and try again."
    }
}

fn map_scenario(scenario: &Scenario) -> PageBodyVm {
    match scenario {
        Scenario::Phishing(s) => PageBodyVm::Phishing(map_phishing(s)),
        Scenario::Password(s) => PageBodyVm::Password(map_password(s)),
        Scenario::Mfa(s) => PageBodyVm::Mfa(map_mfa(s)),
    }
}

fn map_phishing(s: &PhishingScenario) -> PhishingVm {
    PhishingVm {
        scenario_id: s.id.to_string(),
        sender: s.sender.clone(),
        subject: s.subject.clone(),
        body: s.body.clone(),
        link_text: s.link_text.clone(),
    }
}

fn map_password(s: &PasswordScenario) -> PasswordVm {
    PasswordVm {
        scenario_id: s.id.to_string(),
        prompt: s.prompt.clone(),
        rules: vec![
            format!("At least {} characters", s.min_length),
            "A lowercase letter".to_string(),
            "An uppercase letter".to_string(),
            "A digit".to_string(),
            "A special character".to_string(),
        ],
    }
}

fn map_mfa(s: &MfaScenario) -> MfaVm {
    MfaVm {
        scenario_id: s.id.to_string(),
        prompt: s.prompt.clone(),
        options: s
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| MfaOptionVm {
                index: index.to_string(),
                text: option.text.clone(),
            })
            .collect(),
    }
}
