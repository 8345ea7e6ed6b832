use dioxus::prelude::*;
use dioxus_router::Link;

use assess_core::model::JobId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn RankingView(job_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let services = ctx.services();

    let recruiter = services.recruiter();
    let resource = use_resource(move || {
        let recruiter = recruiter.clone();
        async move {
            recruiter
                .ranking(JobId::new(job_id))
                .await
                .map_err(|err| ViewError::from_service(&err))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
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
                ViewState::Ready(ranking) => rsx! {
                    h2 { "Ranked candidates · {ranking.job_title}" }
                    if ranking.is_empty() {
                        p { "Nobody has finished this assessment yet." }
                    } else {
                        table {
                            thead {
                                tr {
                                    th { "Rank" }
                                    th { "Candidate" }
                                    th { "Email" }
                                    th { "Total" }
                                    th { "Skill fit" }
                                    th { "Experience fit" }
                                }
                            }
                            tbody {
                                for candidate in ranking.candidates {
                                    tr {
                                        td { "{candidate.rank}" }
                                        td { "{candidate.name}" }
                                        td { "{candidate.email}" }
                                        td { {format!("{:.2}", candidate.total_score)} }
                                        td { {format!("{:.2}", candidate.skill_score)} }
                                        td { {format!("{:.2}", candidate.experience_score)} }
                                    }
                                }
                            }
                        }
                    }
                    p {
                        Link { to: Route::Recruiter {}, "Back to assessments" }
                    }
                },
            }
        }
    }
}
