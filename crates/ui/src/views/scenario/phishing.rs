use dioxus::prelude::*;

use crate::paths;
use crate::vm::PhishingVm;

#[component]
pub fn PhishingCard(vm: PhishingVm) -> Element {
    rsx! {
        section { class: "panel email-container",
            h2 { "🚨 {vm.subject}" }
            p { class: "sender", "From: {vm.sender}" }
            p { "{vm.body}" }
            p { "Click here: ", span { class: "phishing-link", "{vm.link_text}" } }
            hr {}
            form { method: "post", action: paths::ANSWER,
                input { r#type: "hidden", name: "scenario", value: "{vm.scenario_id}" }
                button { r#type: "submit", name: "action", value: "report", "Report as Phishing" }
                button {
                    r#type: "submit",
                    name: "action",
                    value: "click",
                    "Click Link (Simulated)"
                }
            }
        }
    }
}
