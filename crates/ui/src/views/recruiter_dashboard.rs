use dioxus::prelude::*;
use dioxus_router::Link;

use assess_core::model::{JobDraft, JobPosting, UserRole};
use chrono::NaiveDateTime;
use services::AssessmentBoard;

use crate::context::{AppContext, AuthSession};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

/// Raw create-assessment form state; skill rows are edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct JobForm {
    title: String,
    description: String,
    degree_required: String,
    experience_min: String,
    experience_max: String,
    duration_minutes: String,
    num_questions: String,
    schedule: String,
    skills: Vec<(String, String)>,
}

impl JobForm {
    /// # Errors
    ///
    /// Returns a display message for an unparseable schedule.
    fn to_draft(&self) -> Result<JobDraft, String> {
        let schedule = match self.schedule.trim() {
            "" => None,
            raw => {
                let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                    .map_err(|_| "Schedule must look like 2026-03-01T09:00.".to_string())?;
                Some(parsed.and_utc())
            }
        };
        Ok(JobDraft {
            title: self.title.clone(),
            experience_min: self.experience_min.clone(),
            experience_max: self.experience_max.clone(),
            duration_minutes: self.duration_minutes.clone(),
            num_questions: self.num_questions.clone(),
            schedule,
            degree_required: self.degree_required.clone(),
            description: self.description.clone(),
            skills: self.skills.clone(),
        })
    }

    fn add_skill(&mut self) {
        self.skills.push((String::new(), "medium".to_string()));
    }

    // row events carry the index they were rendered with; after a remove
    // that index can be stale, and a stale event is dropped
    fn set_skill_name(&mut self, index: usize, value: String) {
        if let Some(row) = self.skills.get_mut(index) {
            row.0 = value;
        }
    }

    fn set_skill_priority(&mut self, index: usize, value: String) {
        if let Some(row) = self.skills.get_mut(index) {
            row.1 = value;
        }
    }

    fn remove_skill(&mut self, index: usize) {
        if index < self.skills.len() {
            self.skills.remove(index);
        }
    }
}

#[component]
pub fn RecruiterDashboard() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<AuthSession>();
    let services = ctx.services();

    let recruiter = services.recruiter();
    let resource = use_resource(move || {
        let recruiter = recruiter.clone();
        async move {
            let Some(user) = session.current() else {
                return Err(ViewError::NotSignedIn);
            };
            recruiter
                .assessments(user.user_id)
                .await
                .map_err(|err| ViewError::from_service(&err))
        }
    });
    let state = view_state_from_resource(&resource);

    let mut form = use_signal(JobForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let recruiter_service = services.recruiter();
    let on_create = use_callback(move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let recruiter = recruiter_service.clone();
        spawn(async move {
            let Some(user) = session.current() else {
                form_error.set(Some("Please sign in first.".to_string()));
                return;
            };
            let draft = match form.read().to_draft() {
                Ok(draft) => draft,
                Err(message) => {
                    form_error.set(Some(message));
                    return;
                }
            };
            busy.set(true);
            let result = recruiter.create_assessment(user.user_id, &draft).await;
            busy.set(false);
            match result {
                Ok(_) => {
                    form.set(JobForm::default());
                    form_error.set(None);
                    let mut resource = resource;
                    resource.restart();
                }
                Err(err) => form_error.set(Some(err.to_string())),
            }
        });
    });

    rsx! {
        div { class: "page",
            h2 { "Your assessments" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::NotSignedIn) => rsx! {
                    p { "Please sign in first." }
                    Link { to: Route::Login { role: UserRole::Recruiter.as_str().to_string() }, "Recruiter login" }
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
                ViewState::Ready(board) => rsx! {
                    Board { board }
                },
            }

            h2 { "Publish a new assessment" }
            if let Some(message) = form_error() {
                p { class: "banner banner--error", "{message}" }
            }
            form { class: "form-grid", onsubmit: on_create,
                label {
                    "Test name"
                    input {
                        value: "{form.read().title}",
                        oninput: move |evt| form.write().title = evt.value(),
                    }
                }
                label {
                    "Description"
                    input {
                        value: "{form.read().description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }
                }
                label {
                    "Degree required (optional)"
                    input {
                        value: "{form.read().degree_required}",
                        oninput: move |evt| form.write().degree_required = evt.value(),
                    }
                }
                label {
                    "Experience from (years)"
                    input {
                        value: "{form.read().experience_min}",
                        oninput: move |evt| form.write().experience_min = evt.value(),
                    }
                }
                label {
                    "Experience to (years)"
                    input {
                        value: "{form.read().experience_max}",
                        oninput: move |evt| form.write().experience_max = evt.value(),
                    }
                }
                label {
                    "Duration (minutes)"
                    input {
                        value: "{form.read().duration_minutes}",
                        oninput: move |evt| form.write().duration_minutes = evt.value(),
                    }
                }
                label {
                    "Number of questions"
                    input {
                        value: "{form.read().num_questions}",
                        oninput: move |evt| form.write().num_questions = evt.value(),
                    }
                }
                label {
                    "Schedule (optional, e.g. 2026-03-01T09:00)"
                    input {
                        value: "{form.read().schedule}",
                        oninput: move |evt| form.write().schedule = evt.value(),
                    }
                }

                h3 { "Skills" }
                for index in 0..form.read().skills.len() {
                    div { class: "form-grid__row",
                        input {
                            placeholder: "skill, e.g. sql",
                            value: "{form.read().skills[index].0}",
                            oninput: move |evt| form.write().set_skill_name(index, evt.value()),
                        }
                        select {
                            value: "{form.read().skills[index].1}",
                            onchange: move |evt| form.write().set_skill_priority(index, evt.value()),
                            option { value: "low", "low" }
                            option { value: "medium", "medium" }
                            option { value: "high", "high" }
                        }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| form.write().remove_skill(index),
                            "Remove"
                        }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| form.write().add_skill(),
                    "Add skill"
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Publishing..." } else { "Publish" }
                }
            }
        }
    }
}

#[component]
fn Board(board: AssessmentBoard) -> Element {
    rsx! {
        h3 { "Upcoming" }
        if board.upcoming.is_empty() {
            p { "Nothing scheduled." }
        }
        for posting in board.upcoming {
            PostingRow { posting }
        }
        h3 { "Past" }
        if board.past.is_empty() {
            p { "No past assessments yet." }
        }
        for posting in board.past {
            PostingRow { posting }
        }
    }
}

#[component]
fn PostingRow(posting: JobPosting) -> Element {
    let schedule_label = posting.schedule.map_or_else(
        || "Open now".to_string(),
        |opens| opens.format("%d %b %Y, %H:%M UTC").to_string(),
    );

    rsx! {
        div { class: "card",
            h4 { "{posting.title}" }
            p {
                "{posting.num_questions} questions · {posting.duration_minutes} minutes · {schedule_label}"
            }
            Link {
                to: Route::Ranking { job_id: posting.job_id.value() },
                "View ranked candidates"
            }
        }
    }
}
