use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use api::{ApiError, AssessmentApi, NextQuestion};
use assess_core::Clock;
use assess_core::model::{
    AnswerSubmission, AttemptId, AttemptOp, AttemptPhase, AttemptSession, AttemptStateError,
    CandidateReport, SelectedOption, TickOutcome,
};

use super::view::AttemptView;
use crate::error::AttemptError;

//
// ─── CONFIG ───────────────────────────────────────────────────────────────────
//

/// Tunables for the attempt flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptConfig {
    /// Pause between a submitted answer and the next question fetch, so
    /// the feedback line gets a moment on screen before it is replaced.
    pub advance_delay: Duration,
}

impl Default for AttemptConfig {
    fn default() -> Self {
        Self {
            advance_delay: Duration::from_millis(1500),
        }
    }
}

//
// ─── CONTROLLER ───────────────────────────────────────────────────────────────
//

struct State {
    session: AttemptSession,
    greeting: Option<String>,
    feedback: Option<String>,
    notice: Option<String>,
    error: Option<String>,
}

/// Drives one candidate's timed attempt against the assessment API.
///
/// The pure guards live in `AttemptSession`; this layer performs the
/// backend calls and records what the view needs: the current question,
/// the latest feedback, and any error message. Every network failure is
/// non-fatal: it is converted into a message and the controller stays in
/// a consistent, retryable state.
///
/// State sits behind a mutex and every method takes `&self`, so a shared
/// handle can keep ticking the countdown while a backend call is being
/// awaited. The lock is only held across the synchronous begin/finish
/// sections, never across an await; concurrent operations are refused by
/// the session machine's in-flight token, not by lock contention.
///
/// The controller does not own a timer. The view drives `tick` once per
/// second and reacts to `TickOutcome::Expired` by calling `end_session`;
/// it likewise schedules the post-submit fetch after `advance_delay`.
pub struct AttemptController {
    attempt_id: AttemptId,
    clock: Clock,
    api: Arc<dyn AssessmentApi>,
    config: AttemptConfig,
    state: Mutex<State>,
}

impl AttemptController {
    #[must_use]
    pub fn new(
        attempt_id: AttemptId,
        api: Arc<dyn AssessmentApi>,
        clock: Clock,
        config: AttemptConfig,
    ) -> Self {
        Self {
            attempt_id,
            clock,
            api,
            config,
            state: Mutex::new(State {
                session: AttemptSession::new(),
                greeting: None,
                feedback: None,
                notice: None,
                error: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the attempt session and fetches the first question.
    ///
    /// On success the countdown is armed with the backend's duration and
    /// the initial question fetch runs immediately. On failure the
    /// controller stays at `NotStarted` with a retryable error message.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::State` for guard refusals and
    /// `AttemptError::Api` when a backend call fails.
    pub async fn start(&self) -> Result<(), AttemptError> {
        self.lock().session.begin(AttemptOp::Start)?;
        tracing::info!(attempt_id = %self.attempt_id, "starting attempt");
        match self.api.start(self.attempt_id).await {
            Ok(plan) => {
                let mut state = self.lock();
                state
                    .session
                    .finish_start(plan.total_questions, plan.duration_secs);
                state.error = None;
            }
            Err(err) => return Err(self.fail(err)),
        }
        // The first question rides on the heels of a successful start;
        // if this fetch fails the session is started and retryable.
        self.fetch_next_question().await
    }

    /// Fetches the next question, or the completion payload.
    ///
    /// No-op (no side effects) while another call is in flight, after
    /// completion, or before start. On failure the previous question is
    /// left untouched so the operation is safe to retry.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::State` for guard refusals and
    /// `AttemptError::Api` when the backend call fails.
    pub async fn fetch_next_question(&self) -> Result<(), AttemptError> {
        self.lock().session.begin(AttemptOp::FetchQuestion)?;
        match self.api.next_question(self.attempt_id).await {
            Ok(NextQuestion::Question { question, greeting }) => {
                tracing::debug!(
                    attempt_id = %self.attempt_id,
                    number = question.number,
                    skill = %question.skill,
                    "question served"
                );
                let shown_at = self.clock.now();
                let mut state = self.lock();
                if greeting.is_some() {
                    state.greeting = greeting;
                }
                state.feedback = None;
                state.notice = None;
                state.error = None;
                state.session.finish_question(question, shown_at);
                Ok(())
            }
            Ok(NextQuestion::Completed { report }) => {
                self.complete(report);
                Ok(())
            }
            Ok(NextQuestion::Unavailable { message }) => {
                // The bank ran dry without a completion payload. Keep the
                // session going; only ending it produces the report.
                let mut state = self.lock();
                state.session.abort();
                state.notice = Some(message);
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Submits the selected answer for the current question.
    ///
    /// A missing selection is a validation failure: no network call is
    /// made and a prompt message is surfaced. On success the question is
    /// consumed and the caller schedules the next fetch after
    /// `advance_delay`. On failure the question stays on screen so the
    /// same answer can be resubmitted.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::NoSelection` without a selection,
    /// `AttemptError::State` for guard refusals, and `AttemptError::Api`
    /// when the backend call fails.
    pub async fn submit_answer(
        &self,
        selected: Option<SelectedOption>,
    ) -> Result<(), AttemptError> {
        let Some(selected) = selected else {
            self.lock().error = Some("Please select an answer before submitting.".to_string());
            return Err(AttemptError::NoSelection);
        };
        let submission = {
            let mut state = self.lock();
            state.session.begin(AttemptOp::SubmitAnswer)?;
            let Some(question) = state.session.current_question() else {
                // begin() refuses submits without a question; unreachable
                // in practice but keeps the lock released if it ever
                // happens.
                state.session.abort();
                return Err(AttemptError::State(AttemptStateError::NoQuestion));
            };
            let skill = question.skill.clone();
            let elapsed = state
                .session
                .elapsed_since_shown(self.clock.now())
                .unwrap_or(0);
            AnswerSubmission::new(skill, selected, elapsed)
        };
        match self.api.submit_answer(self.attempt_id, &submission).await {
            Ok(feedback) => {
                let mut state = self.lock();
                state.session.finish_submit();
                state.feedback = Some(feedback);
                state.error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Ends the attempt and stores the final report.
    ///
    /// Invoked by explicit user action or by the countdown reaching
    /// zero. Guarded against running concurrently with other calls.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::State` for guard refusals and
    /// `AttemptError::Api` when the backend call fails.
    pub async fn end_session(&self) -> Result<(), AttemptError> {
        self.lock().session.begin(AttemptOp::End)?;
        match self.api.end(self.attempt_id).await {
            Ok(report) => {
                self.complete(report);
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Runs through the shared state, so the clock keeps draining while
    /// a backend call is in flight. `Expired` is raised at most once per
    /// attempt, and only while no call is in flight; the caller must
    /// respond by ending the session.
    pub fn tick(&self) -> TickOutcome {
        self.lock().session.tick()
    }

    fn complete(&self, report: CandidateReport) {
        tracing::info!(
            attempt_id = %self.attempt_id,
            skills = report.skill_count(),
            "attempt completed"
        );
        let mut state = self.lock();
        state.feedback = None;
        state.notice = None;
        state.error = None;
        state.session.finish_report(report);
    }

    fn fail(&self, err: ApiError) -> AttemptError {
        tracing::warn!(attempt_id = %self.attempt_id, error = %err, "backend call failed");
        let mut state = self.lock();
        state.session.abort();
        state.error = Some(err.to_string());
        AttemptError::Api(err)
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.config.advance_delay
    }

    #[must_use]
    pub fn phase(&self) -> AttemptPhase {
        self.lock().session.phase()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.lock().session.is_started()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.lock().session.is_complete()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Snapshot of everything the attempt screen renders.
    #[must_use]
    pub fn view(&self) -> AttemptView {
        let state = self.lock();
        AttemptView {
            phase: state.session.phase(),
            total_questions: state.session.total_questions(),
            seconds_remaining: state.session.seconds_remaining(),
            question: state.session.current_question().cloned(),
            greeting: state.greeting.clone(),
            feedback: state.feedback.clone(),
            notice: state.notice.clone(),
            error: state.error.clone(),
            report: state.session.report().cloned(),
            busy: state.session.in_flight().is_some(),
        }
    }
}

impl fmt::Debug for AttemptController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("AttemptController")
            .field("attempt_id", &self.attempt_id)
            .field("phase", &state.session.phase())
            .field("error", &state.error)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use api::{AttemptPlan, InMemoryBackend, ScriptedQuestion};
    use assess_core::model::{Question, SkillName, SkillReport};
    use assess_core::time::fixed_clock;
    use tokio::sync::Notify;

    fn script() -> Vec<ScriptedQuestion> {
        vec![
            ScriptedQuestion {
                skill: "sql".to_string(),
                text: "Which clause filters rows?".to_string(),
                options: vec!["WHERE".to_string(), "ORDER BY".to_string()],
                correct_option: 1,
            },
            ScriptedQuestion {
                skill: "sql".to_string(),
                text: "Which statement removes a table?".to_string(),
                options: vec!["DELETE".to_string(), "DROP TABLE".to_string()],
                correct_option: 2,
            },
        ]
    }

    fn staged_controller(duration_secs: u32) -> (AttemptController, Arc<InMemoryBackend>) {
        let backend = Arc::new(InMemoryBackend::new());
        let attempt_id = backend.stage_attempt(duration_secs, script()).unwrap();
        let controller = AttemptController::new(
            attempt_id,
            backend.clone(),
            fixed_clock(),
            AttemptConfig::default(),
        );
        (controller, backend)
    }

    #[tokio::test]
    async fn start_arms_countdown_and_serves_first_question() {
        let (controller, _backend) = staged_controller(300);
        controller.start().await.unwrap();

        let view = controller.view();
        assert_eq!(view.total_questions, 2);
        assert_eq!(view.seconds_remaining, 300);
        assert_eq!(view.phase, AttemptPhase::QuestionShown);
        assert_eq!(view.question.unwrap().number, 1);
        assert!(view.greeting.is_some());
    }

    #[tokio::test]
    async fn unknown_attempt_fails_start_retryably() {
        let backend = Arc::new(InMemoryBackend::new());
        let controller = AttemptController::new(
            AttemptId::new(999),
            backend,
            fixed_clock(),
            AttemptConfig::default(),
        );

        let err = controller.start().await.unwrap_err();
        assert!(matches!(err, AttemptError::Api(_)));
        assert!(!controller.is_started());
        assert!(controller.error().is_some());
        // retry is allowed: the machine is back at NotStarted
        assert_eq!(controller.phase(), AttemptPhase::NotStarted);
    }

    #[tokio::test]
    async fn submit_without_selection_is_pure_validation() {
        let (controller, _backend) = staged_controller(300);
        controller.start().await.unwrap();

        let err = controller.submit_answer(None).await.unwrap_err();
        assert!(matches!(err, AttemptError::NoSelection));
        // question untouched, nothing in flight
        let view = controller.view();
        assert!(view.question.is_some());
        assert!(!view.busy);
        assert!(view.error.is_some());
    }

    #[tokio::test]
    async fn full_loop_reaches_report_with_tallied_accuracy() {
        let (controller, _backend) = staged_controller(300);
        controller.start().await.unwrap();

        // first answer correct, second wrong
        controller
            .submit_answer(Some(SelectedOption::new(1).unwrap()))
            .await
            .unwrap();
        assert_eq!(controller.phase(), AttemptPhase::AwaitingNext);
        assert!(controller.view().feedback.is_some());

        controller.fetch_next_question().await.unwrap();
        assert_eq!(controller.view().question.as_ref().unwrap().number, 2);

        controller
            .submit_answer(Some(SelectedOption::new(1).unwrap()))
            .await
            .unwrap();
        controller.fetch_next_question().await.unwrap();

        assert!(controller.is_complete());
        let view = controller.view();
        let report = view.report.unwrap();
        let sql = report.get("sql").unwrap();
        assert_eq!(sql.questions_attempted, 2);
        assert_eq!(sql.correct_answers, 1);
        let overall = report.overall();
        assert_eq!(overall.total_attempted, 2);
        assert_eq!(overall.total_correct, 1);
        assert!((overall.accuracy_percent - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn completion_payload_halts_timer_with_time_left() {
        // an empty script completes on the very first fetch
        let backend = Arc::new(InMemoryBackend::new());
        let attempt_id = backend.stage_attempt(300, Vec::new()).unwrap();
        let controller = AttemptController::new(
            attempt_id,
            backend,
            fixed_clock(),
            AttemptConfig::default(),
        );

        controller.start().await.unwrap();
        assert!(controller.is_complete());
        assert!(controller.view().report.is_some());
        assert_eq!(controller.view().seconds_remaining, 300);
        assert_eq!(controller.tick(), TickOutcome::Idle);
    }

    #[tokio::test]
    async fn countdown_expiry_then_end_produces_report() {
        let (controller, _backend) = staged_controller(5);
        controller.start().await.unwrap();

        for _ in 0..4 {
            assert!(matches!(controller.tick(), TickOutcome::Running { .. }));
        }
        assert_eq!(controller.tick(), TickOutcome::Expired);
        assert_eq!(controller.tick(), TickOutcome::Idle);

        controller.end_session().await.unwrap();
        assert!(controller.is_complete());
        assert!(controller.view().report.is_some());
    }

    #[tokio::test]
    async fn end_is_tolerated_after_completion_payload() {
        let backend = Arc::new(InMemoryBackend::new());
        let attempt_id = backend.stage_attempt(60, Vec::new()).unwrap();
        let controller = AttemptController::new(
            attempt_id,
            backend,
            fixed_clock(),
            AttemptConfig::default(),
        );
        controller.start().await.unwrap();
        assert!(controller.is_complete());

        // a second end is refused by the machine, not sent to the backend
        let err = controller.end_session().await.unwrap_err();
        assert!(err.is_refusal());
        assert!(controller.is_complete());
    }

    /// Serves one question immediately, then holds the second fetch open
    /// until released.
    struct GatedApi {
        release: Notify,
        fetches: AtomicU32,
    }

    impl GatedApi {
        fn new() -> Self {
            Self {
                release: Notify::new(),
                fetches: AtomicU32::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl AssessmentApi for GatedApi {
        async fn start(&self, _attempt_id: AttemptId) -> Result<AttemptPlan, ApiError> {
            Ok(AttemptPlan {
                total_questions: 2,
                duration_secs: 2,
            })
        }

        async fn next_question(&self, _attempt_id: AttemptId) -> Result<NextQuestion, ApiError> {
            if self.fetches.fetch_add(1, Ordering::SeqCst) == 0 {
                return Ok(NextQuestion::Question {
                    question: Question::new(
                        "Which clause filters rows?",
                        vec!["WHERE".to_string(), "ORDER BY".to_string()],
                        SkillName::new("sql").unwrap(),
                        1,
                    ),
                    greeting: None,
                });
            }
            self.release.notified().await;
            Ok(NextQuestion::Completed {
                report: [(
                    "sql".to_string(),
                    SkillReport::new(1, 1, 100.0, "perfect"),
                )]
                .into_iter()
                .collect(),
            })
        }

        async fn submit_answer(
            &self,
            _attempt_id: AttemptId,
            _submission: &AnswerSubmission,
        ) -> Result<String, ApiError> {
            Ok("Correct!".to_string())
        }

        async fn end(&self, _attempt_id: AttemptId) -> Result<CandidateReport, ApiError> {
            Ok([("sql".to_string(), SkillReport::new(1, 1, 100.0, "perfect"))]
                .into_iter()
                .collect())
        }
    }

    #[tokio::test]
    async fn countdown_keeps_draining_while_a_call_is_in_flight() {
        let api = Arc::new(GatedApi::new());
        let controller = Arc::new(AttemptController::new(
            AttemptId::new(1),
            api.clone(),
            fixed_clock(),
            AttemptConfig::default(),
        ));
        controller.start().await.unwrap();

        let fetcher = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.fetch_next_question().await })
        };
        // let the spawned fetch reach the gate
        for _ in 0..10 {
            if controller.view().busy {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(controller.view().busy);

        // seconds keep draining; expiry is held back until the call lands
        assert_eq!(
            controller.tick(),
            TickOutcome::Running {
                seconds_remaining: 1
            }
        );
        assert_eq!(
            controller.tick(),
            TickOutcome::Running {
                seconds_remaining: 0
            }
        );
        assert_eq!(
            controller.tick(),
            TickOutcome::Running {
                seconds_remaining: 0
            }
        );

        api.release.notify_one();
        fetcher.await.unwrap().unwrap();
        assert!(controller.is_complete());
        // completion beat the latch; the timer is simply done
        assert_eq!(controller.tick(), TickOutcome::Idle);
    }
}
