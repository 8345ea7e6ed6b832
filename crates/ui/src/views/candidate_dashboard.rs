use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use assess_core::model::{CandidateProfile, JobPosting, UserRole};
use chrono::{DateTime, Utc};

use crate::context::{AppContext, AuthSession};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    profile: CandidateProfile,
    postings: Vec<JobPosting>,
}

fn format_schedule(schedule: Option<DateTime<Utc>>) -> String {
    schedule.map_or_else(
        || "Open now".to_string(),
        |opens| format!("Opens {}", opens.format("%d %b %Y, %H:%M UTC")),
    )
}

#[component]
pub fn CandidateDashboard() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<AuthSession>();
    let navigator = use_navigator();
    let services = ctx.services();

    let candidate = services.candidate();
    let resource = use_resource(move || {
        let candidate = candidate.clone();
        async move {
            let Some(user) = session.current() else {
                return Err(ViewError::NotSignedIn);
            };
            let profile = candidate
                .profile(user.user_id)
                .await
                .map_err(|err| ViewError::from_service(&err))?;
            let postings = if profile.is_complete {
                candidate
                    .eligible_assessments(user.user_id)
                    .await
                    .map_err(|err| ViewError::from_service(&err))?
            } else {
                Vec::new()
            };
            Ok::<_, ViewError>(DashboardData { profile, postings })
        }
    });
    let state = view_state_from_resource(&resource);

    let mut start_error = use_signal(|| None::<String>);
    let mut pending_start = use_signal(|| None::<JobPosting>);
    let now = services.clock().now();

    // first click only stages the posting; the timer starts on confirm
    let on_start = use_callback(move |posting: JobPosting| {
        start_error.set(None);
        pending_start.set(Some(posting));
    });

    let candidate_service = services.candidate();
    let on_confirm = use_callback(move |()| {
        let Some(posting) = pending_start() else {
            return;
        };
        let candidate = candidate_service.clone();
        let candidate_id = resource
            .value()
            .read()
            .as_ref()
            .and_then(|value| value.as_ref().ok())
            .map(|data| data.profile.candidate_id);
        spawn(async move {
            let Some(candidate_id) = candidate_id else {
                return;
            };
            match candidate.begin_attempt(candidate_id, &posting).await {
                Ok(attempt_id) => {
                    start_error.set(None);
                    pending_start.set(None);
                    let _ = navigator.push(Route::Attempt {
                        attempt_id: attempt_id.value(),
                    });
                }
                Err(err) => {
                    pending_start.set(None);
                    start_error.set(Some(err.to_string()));
                }
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Your assessments" }
            if let Some(message) = start_error() {
                p { class: "banner banner--error", "{message}" }
            }
            if let Some(posting) = pending_start() {
                div { class: "card banner banner--info",
                    p {
                        "Start \"{posting.title}\"? The timer begins right away and cannot be paused."
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Begin now"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| pending_start.set(None),
                        "Cancel"
                    }
                }
            }
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
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(data) => rsx! {
                    if data.profile.is_complete {
                        p {
                            "Signed in as {data.profile.name}. "
                            Link { to: Route::CompleteProfile {}, "Edit profile" }
                        }
                        if data.postings.is_empty() {
                            p { "No assessments match your profile yet. Check back later." }
                        }
                        for posting in data.postings {
                            PostingCard {
                                posting: posting.clone(),
                                open: posting.is_open_at(now),
                                on_start,
                            }
                        }
                    } else {
                        p { class: "banner banner--info",
                            "Complete your profile to see assessments that match your experience."
                        }
                        Link { to: Route::CompleteProfile {}, "Complete profile" }
                    }
                },
            }
        }
    }
}

#[component]
fn PostingCard(posting: JobPosting, open: bool, on_start: EventHandler<JobPosting>) -> Element {
    let schedule_label = format_schedule(posting.schedule);
    let degree_label = posting
        .degree_required
        .clone()
        .map_or_else(|| "Any degree".to_string(), |degree| degree);
    let start_posting = posting.clone();

    rsx! {
        div { class: "card",
            h3 { "{posting.title}" }
            p { "{posting.company} · {degree_label}" }
            if !posting.description.is_empty() {
                p { "{posting.description}" }
            }
            p {
                "{posting.experience_min} to {posting.experience_max} years · "
                "{posting.num_questions} questions · {posting.duration_minutes} minutes · {schedule_label}"
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !open,
                onclick: move |_| on_start.call(start_posting.clone()),
                if open { "Start assessment" } else { "Not open yet" }
            }
        }
    }
}
