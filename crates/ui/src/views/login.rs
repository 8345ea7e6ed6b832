use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use assess_core::model::UserRole;

use crate::context::{AppContext, AuthSession};
use crate::routes::Route;

#[component]
pub fn LoginView(role: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<AuthSession>();
    let navigator = use_navigator();
    let services = ctx.services();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let expected_role = role.parse::<UserRole>().ok();
    let heading = match expected_role {
        Some(UserRole::Candidate) => "Candidate login",
        Some(UserRole::Recruiter) => "Recruiter login",
        None => "Login",
    };

    let on_submit = use_callback(move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = services.auth();
        spawn(async move {
            busy.set(true);
            let result = auth.login(&email(), &password()).await;
            busy.set(false);
            match result {
                Ok(user) => {
                    if expected_role.is_some_and(|expected| expected != user.role) {
                        // wrong door: drop the backend session again
                        let _ = auth.logout().await;
                        error.set(Some(format!(
                            "This account is a {} account. Use the matching login page.",
                            user.role
                        )));
                        return;
                    }
                    error.set(None);
                    let destination = Route::dashboard_for(user.role);
                    session.sign_in(user);
                    let _ = navigator.push(destination);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "{heading}" }
            if let Some(message) = error() {
                p { class: "banner banner--error", "{message}" }
            }
            form { class: "form-grid", onsubmit: on_submit,
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
                    if busy() { "Signing in..." } else { "Sign in" }
                }
            }
            if expected_role == Some(UserRole::Candidate) {
                p {
                    "New here? "
                    Link { to: Route::Signup {}, "Create an account" }
                }
            }
        }
    }
}
