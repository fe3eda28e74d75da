use dioxus::prelude::*;

use crate::paths;
use crate::views::scenario::{MfaCard, PasswordCard, PhishingCard};
use crate::views::{FinishedPanel, StartPanel};
use crate::vm::{FeedbackVm, PageBodyVm, PageVm};

#[component]
pub fn QuizPage(page: PageVm) -> Element {
    let body = match page.body.clone() {
        PageBodyVm::Start { total } => rsx! { StartPanel { total } },
        PageBodyVm::Phishing(vm) => rsx! { PhishingCard { vm } },
        PageBodyVm::Password(vm) => rsx! { PasswordCard { vm } },
        PageBodyVm::Mfa(vm) => rsx! { MfaCard { vm } },
        PageBodyVm::Finished { score_label, verdict } => rsx! {
            FinishedPanel { score_label, verdict: verdict.to_string() }
        },
    };

    rsx! {
        div { class: "quiz",
            header { class: "quiz-header",
                h1 { "Cybersecurity Awareness Drill" }
                if let Some(label) = page.progress_label.clone() {
                    p { class: "progress", "{label}" }
                }
                if let Some(label) = page.score_label.clone() {
                    div { class: "score-display", "{label}" }
                }
            }
            {page.notice.clone().map(|notice| rsx! { p { class: "notice", "{notice}" } })}
            {page.feedback.clone().map(|feedback| rsx! { FeedbackBanner { feedback } })}
            main { class: "quiz-body", {body} }
            footer { class: "quiz-footer",
                form { method: "post", action: paths::RESET,
                    button { r#type: "submit", class: "secondary", "Reset progress" }
                }
            }
        }
    }
}

#[component]
fn FeedbackBanner(feedback: FeedbackVm) -> Element {
    rsx! {
        div { class: feedback.class, role: "status",
            strong { "{feedback.headline}" }
            p { "{feedback.message}" }
        }
    }
}
