use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AuthSession;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    // The signed-in user lives in one signal provided at the root; views
    // receive it through context instead of an ambient global.
    let session_signal = use_signal(|| None);
    use_context_provider(|| AuthSession::new(session_signal));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "SkillProof" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
