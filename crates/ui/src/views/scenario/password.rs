use dioxus::prelude::*;

use crate::paths;
use crate::vm::PasswordVm;

#[component]
pub fn PasswordCard(vm: PasswordVm) -> Element {
    rsx! {
        section { class: "panel password",
            h2 { "🔑 Password check" }
            p { "{vm.prompt}" }
            ul { class: "rules",
                for rule in vm.rules.iter() {
                    li { key: "{rule}", "{rule}" }
                }
            }
            form { method: "post", action: paths::ANSWER,
                input { r#type: "hidden", name: "scenario", value: "{vm.scenario_id}" }
                input {
                    r#type: "password",
                    name: "password",
                    autocomplete: "new-password",
                    placeholder: "New password",
                }
                button { r#type: "submit", class: "primary", "Set password" }
            }
        }
    }
}
