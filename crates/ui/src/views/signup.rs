use dioxus::prelude::*;
use dioxus_router::use_navigator;

use assess_core::model::UserRole;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn SignupView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let services = ctx.services();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let on_submit = use_callback(move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = services.auth();
        spawn(async move {
            busy.set(true);
            let result = auth.signup(&name(), &email(), &password()).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    let _ = navigator.push(Route::Login {
                        role: UserRole::Candidate.as_str().to_string(),
                    });
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Create a candidate account" }
            if let Some(message) = error() {
                p { class: "banner banner--error", "{message}" }
            }
            form { class: "form-grid", onsubmit: on_submit,
                label {
                    "Name"
                    input {
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                label {
                    "Email"
                    input {
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label {
                    "Password"
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Creating..." } else { "Sign up" }
                }
            }
        }
    }
}
