use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::Link;

use assess_core::model::{AttemptId, AttemptPhase, Question, TickOutcome};
use services::{AttemptError, AttemptView};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{AttemptIntent, AttemptVm, format_countdown, map_overall_row, map_report_rows};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Runs one backend-facing intent against the attempt's controller.
///
/// The shared handle is cloned out of the signal before the await, so
/// the one-second tick loop keeps draining the countdown while the call
/// is in flight; a second operation is refused by the session machine's
/// in-flight token. Returns `None` before the controller exists.
async fn run_attempt_op(
    mut vm: Signal<Option<AttemptVm>>,
    mut snapshot: Signal<Option<AttemptView>>,
    intent: AttemptIntent,
) -> Option<Result<(), AttemptError>> {
    let (controller, selected) = {
        let guard = vm.read();
        let current = guard.as_ref()?;
        (current.handle(), current.selected())
    };
    let result = match intent {
        AttemptIntent::Start => controller.start().await,
        AttemptIntent::Submit => controller.submit_answer(selected).await,
        AttemptIntent::FetchNext => controller.fetch_next_question().await,
        AttemptIntent::End => controller.end_session().await,
        AttemptIntent::Select(_) => Ok(()),
    };
    if result.is_ok() && matches!(intent, AttemptIntent::Submit | AttemptIntent::FetchNext) {
        if let Some(current) = vm.write().as_mut() {
            current.clear_selection();
        }
    }
    snapshot.set(Some(controller.view()));
    Some(result)
}

#[component]
pub fn AttemptScreen(attempt_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let services = ctx.services();

    let mut vm = use_signal(|| None::<AttemptVm>);
    let snapshot = use_signal(|| None::<AttemptView>);
    let last_action = use_signal(|| None::<AttemptIntent>);

    let dispatch = use_callback(move |intent: AttemptIntent| {
        let mut vm = vm;
        if let AttemptIntent::Select(index) = intent {
            if let Some(current) = vm.write().as_mut() {
                current.select(index);
            }
            return;
        }
        let mut last_action = last_action;
        spawn(async move {
            last_action.set(Some(intent));
            let Some(result) = run_attempt_op(vm, snapshot, intent).await else {
                return;
            };
            match result {
                Ok(()) => {
                    if intent == AttemptIntent::Submit {
                        // leave the feedback line on screen for a beat
                        // before the next question replaces it
                        let delay = vm
                            .read()
                            .as_ref()
                            .map_or(Duration::ZERO, AttemptVm::advance_delay);
                        tokio::time::sleep(delay).await;
                        // refusals here mean expiry already kicked off
                        // the end call; the machine sorts it out
                        let _ = run_attempt_op(vm, snapshot, AttemptIntent::FetchNext).await;
                    }
                }
                // another call is in flight; nothing to show
                Err(err) if err.is_refusal() => {}
                // the failure message is already in the snapshot
                Err(_) => {}
            }
        });
    });

    let services_for_mount = services.clone();
    use_future(move || {
        let services = services_for_mount.clone();
        async move {
            let mut vm = vm;
            let controller = services.attempt_controller(AttemptId::new(attempt_id));
            vm.set(Some(AttemptVm::new(controller)));
            dispatch.call(AttemptIntent::Start);
        }
    });

    // one-second countdown heartbeat; expiry ends the session once.
    // Ticks go through the shared controller, so they land even while a
    // backend call is being awaited.
    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let ticked = {
                let guard = vm.read();
                guard
                    .as_ref()
                    .map(|current| (current.tick(), current.snapshot()))
            };
            let Some((outcome, snap)) = ticked else {
                continue;
            };
            let mut snapshot = snapshot;
            snapshot.set(Some(snap));
            if outcome == TickOutcome::Expired {
                dispatch.call(AttemptIntent::End);
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<AttemptTestHandles>() {
                handles.register(dispatch, snapshot);
            }
        }
    }

    let retry = use_callback(move |()| {
        if let Some(intent) = last_action() {
            dispatch.call(intent);
        }
    });

    let view = snapshot.read().clone();
    let selected = vm.read().as_ref().and_then(AttemptVm::selected_index);

    rsx! {
        div { class: "page attempt",
            match view {
                None => rsx! {
                    p { "Preparing your assessment..." }
                },
                Some(view) => rsx! {
                    AttemptHeader { view: view.clone() }
                    if let Some(message) = view.error.clone() {
                        p { class: "banner banner--error",
                            "{message} "
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| retry.call(()),
                                "Retry"
                            }
                            " "
                            Link { to: Route::Candidate {}, "Back to dashboard" }
                        }
                    }
                    if let Some(notice) = view.notice.clone() {
                        p { class: "banner banner--info", "{notice}" }
                        EndButton { busy: view.busy, on_end: dispatch }
                    }
                    if let Some(feedback) = view.feedback.clone() {
                        p { class: "banner banner--feedback", "{feedback}" }
                    }
                    if view.is_complete() {
                        ReportTable { view: view.clone() }
                    } else if let Some(question) = view.question.clone() {
                        QuestionCard {
                            question,
                            selected,
                            busy: view.busy,
                            on_intent: dispatch,
                        }
                    } else if view.busy {
                        p { "Loading..." }
                    }
                },
            }
        }
    }
}

#[component]
fn AttemptHeader(view: AttemptView) -> Element {
    let running = view.phase != AttemptPhase::NotStarted && !view.is_complete();
    let progress = view
        .question
        .as_ref()
        .map(|question| format!("Question {} of {}", question.number, view.total_questions));

    rsx! {
        header { class: "attempt__header",
            if let Some(greeting) = view.greeting.clone() {
                p { class: "banner banner--info", "{greeting}" }
            }
            if running {
                p {
                    span { class: "attempt__timer",
                        "Time left: {format_countdown(view.seconds_remaining)}"
                    }
                    if let Some(progress) = progress {
                        span { class: "attempt__progress", " · {progress}" }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: Question,
    selected: Option<u32>,
    busy: bool,
    on_intent: EventHandler<AttemptIntent>,
) -> Element {
    let skill_label = question.skill.label();
    let can_submit = question.has_options() && !busy;
    // radio values are one-based, matching the wire format
    let options: Vec<(u32, String)> = question
        .options
        .iter()
        .enumerate()
        .map(|(pos, text)| (u32::try_from(pos + 1).unwrap_or(u32::MAX), text.clone()))
        .collect();

    rsx! {
        div { class: "card attempt__question",
            p { class: "attempt__skill", "{skill_label}" }
            h3 { "{question.text}" }
            if question.has_options() {
                div { class: "attempt__options",
                    for (index, option_text) in options {
                        label { key: "{index}",
                            input {
                                r#type: "radio",
                                name: "attempt-option",
                                checked: selected == Some(index),
                                onchange: move |_| on_intent.call(AttemptIntent::Select(index)),
                            }
                            " {option_text}"
                        }
                    }
                }
            } else {
                p { class: "banner banner--info",
                    "This question has no options to pick from. End the assessment to get your report."
                }
            }
            div { class: "attempt__actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !can_submit,
                    onclick: move |_| on_intent.call(AttemptIntent::Submit),
                    if busy { "Working..." } else { "Submit answer" }
                }
                EndButton { busy, on_end: on_intent }
            }
        }
    }
}

#[component]
fn EndButton(busy: bool, on_end: EventHandler<AttemptIntent>) -> Element {
    rsx! {
        button {
            class: "btn btn-secondary",
            r#type: "button",
            disabled: busy,
            onclick: move |_| on_end.call(AttemptIntent::End),
            "End assessment"
        }
    }
}

#[component]
fn ReportTable(view: AttemptView) -> Element {
    let Some(report) = view.report.as_ref() else {
        return rsx! {
            p { "Assessment complete." }
        };
    };
    let rows = map_report_rows(report);
    let overall = map_overall_row(report);

    rsx! {
        h2 { "Your report" }
        if rows.is_empty() {
            p { "No answers were recorded for this attempt." }
        } else {
            table {
                thead {
                    tr {
                        th { "Skill" }
                        th { "Attempted" }
                        th { "Correct" }
                        th { "Accuracy" }
                        th { "Band" }
                    }
                }
                tbody {
                    for row in rows {
                        tr { key: "{row.skill}",
                            td { "{row.skill}" }
                            td { "{row.attempted}" }
                            td { "{row.correct}" }
                            td { "{row.accuracy}" }
                            td { "{row.band}" }
                        }
                    }
                }
                tfoot {
                    tr {
                        th { "Overall" }
                        td { "{overall.attempted}" }
                        td { "{overall.correct}" }
                        td { "{overall.accuracy}" }
                        td {}
                    }
                }
            }
        }
        p {
            Link { to: Route::Candidate {}, "Back to dashboard" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct AttemptTestHandles {
    dispatch: Rc<RefCell<Option<Callback<AttemptIntent>>>>,
    snapshot: Rc<RefCell<Option<Signal<Option<AttemptView>>>>>,
}

#[cfg(test)]
impl AttemptTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<AttemptIntent>,
        snapshot: Signal<Option<AttemptView>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.snapshot.borrow_mut() = Some(snapshot);
    }

    pub(crate) fn dispatch(&self) -> Callback<AttemptIntent> {
        (*self.dispatch.borrow()).expect("attempt dispatch registered")
    }

    pub(crate) fn snapshot(&self) -> Signal<Option<AttemptView>> {
        (*self.snapshot.borrow()).expect("attempt snapshot registered")
    }
}
