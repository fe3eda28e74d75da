use dioxus::prelude::*;

use crate::paths;
use crate::vm::MfaVm;

#[component]
pub fn MfaCard(vm: MfaVm) -> Element {
    rsx! {
        section { class: "panel mfa",
            h2 { "📱 Sign-in request" }
            p { "{vm.prompt}" }
            form { method: "post", action: paths::ANSWER, class: "options",
                input { r#type: "hidden", name: "scenario", value: "{vm.scenario_id}" }
                for option in vm.options.iter() {
                    button {
                        key: "{option.index}",
                        r#type: "submit",
                        name: "option",
                        value: "{option.index}",
                        "{option.text}"
                    }
                }
            }
        }
    }
}
