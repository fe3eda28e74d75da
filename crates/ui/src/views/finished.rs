use dioxus::prelude::*;

use crate::paths;

#[component]
pub fn FinishedPanel(score_label: String, verdict: String) -> Element {
    rsx! {
        section { class: "panel finished",
            h2 { "Training complete!" }
            p { class: "final-score", "{score_label}" }
            p { "{verdict}" }
            form { method: "post", action: paths::RESET,
                button { r#type: "submit", class: "primary", "Start over" }
            }
        }
    }
}
