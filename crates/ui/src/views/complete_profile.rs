use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use assess_core::model::{CandidateProfile, ProfileDraft, UserRole};

use crate::context::{AppContext, AuthSession};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

fn draft_from_profile(profile: &CandidateProfile) -> ProfileDraft {
    ProfileDraft {
        name: profile.name.clone(),
        phone: profile.phone.clone().unwrap_or_default(),
        location: profile.location.clone().unwrap_or_default(),
        linkedin: profile
            .linkedin
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        github: profile
            .github
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        degree: profile.degree.clone().unwrap_or_default(),
        years_of_experience: if profile.years_of_experience.abs() < f64::EPSILON
            && !profile.is_complete
        {
            String::new()
        } else {
            profile.years_of_experience.to_string()
        },
    }
}

#[component]
pub fn CompleteProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<AuthSession>();
    let navigator = use_navigator();
    let services = ctx.services();

    let mut draft = use_signal(ProfileDraft::default);
    let mut prefilled = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let candidate = services.candidate();
    let resource = use_resource(move || {
        let candidate = candidate.clone();
        async move {
            let Some(user) = session.current() else {
                return Err(ViewError::NotSignedIn);
            };
            candidate
                .profile(user.user_id)
                .await
                .map_err(|err| ViewError::from_service(&err))
        }
    });
    let state = view_state_from_resource(&resource);

    // prefill the form once from the stored profile; afterwards the
    // signals are the source of truth
    use_effect(move || {
        if prefilled() {
            return;
        }
        let value = resource.value();
        let guard = value.read();
        if let Some(Ok(profile)) = guard.as_ref() {
            draft.set(draft_from_profile(profile));
            prefilled.set(true);
        }
    });

    let candidate_service = services.candidate();
    let on_submit = use_callback(move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let candidate = candidate_service.clone();
        spawn(async move {
            let Some(user) = session.current() else {
                error.set(Some("Please sign in first.".to_string()));
                return;
            };
            busy.set(true);
            let result = candidate.save_profile(user.user_id, &draft()).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    let _ = navigator.push(Route::Candidate {});
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Your profile" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::NotSignedIn) => rsx! {
                    p { "Please sign in first." }
                    Link { to: Route::Login { role: UserRole::Candidate.as_str().to_string() }, "Candidate login" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "banner banner--error", "{err.message()}" }
                },
                ViewState::Ready(profile) => rsx! {
                    if !profile.is_complete {
                        p { class: "banner banner--info",
                            "Name, degree and years of experience unlock matching assessments."
                        }
                    }
                    if let Some(message) = error() {
                        p { class: "banner banner--error", "{message}" }
                    }
                    form { class: "form-grid", onsubmit: on_submit,
                        label {
                            "Name"
                            input {
                                value: "{draft.read().name}",
                                oninput: move |evt| draft.write().name = evt.value(),
                            }
                        }
                        label {
                            "Phone"
                            input {
                                value: "{draft.read().phone}",
                                oninput: move |evt| draft.write().phone = evt.value(),
                            }
                        }
                        label {
                            "Location"
                            input {
                                value: "{draft.read().location}",
                                oninput: move |evt| draft.write().location = evt.value(),
                            }
                        }
                        label {
                            "LinkedIn"
                            input {
                                value: "{draft.read().linkedin}",
                                oninput: move |evt| draft.write().linkedin = evt.value(),
                            }
                        }
                        label {
                            "GitHub"
                            input {
                                value: "{draft.read().github}",
                                oninput: move |evt| draft.write().github = evt.value(),
                            }
                        }
                        label {
                            "Degree"
                            input {
                                value: "{draft.read().degree}",
                                oninput: move |evt| draft.write().degree = evt.value(),
                            }
                        }
                        label {
                            "Years of experience"
                            input {
                                value: "{draft.read().years_of_experience}",
                                oninput: move |evt| draft.write().years_of_experience = evt.value(),
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: busy(),
                            if busy() { "Saving..." } else { "Save profile" }
                        }
                    }
                },
            }
        }
    }
}
