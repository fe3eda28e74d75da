use dioxus::prelude::*;

use crate::paths;

#[component]
pub fn StartPanel(total: usize) -> Element {
    let noun = if total == 1 { "scenario" } else { "scenarios" };
    rsx! {
        section { class: "panel start",
            h2 { "Security awareness module" }
            p { "Work through {total} short {noun}, one at a time." }
            p { "Each answer adds or removes points. Your score is kept until you reset." }
            form { method: "post", action: paths::BEGIN,
                button { r#type: "submit", class: "primary", "Begin" }
            }
        }
    }
}
