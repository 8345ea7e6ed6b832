use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use api::{
    ApiError, AssessmentApi, AttemptPlan, Backend, InMemoryBackend, NextQuestion, ScriptedQuestion,
};
use assess_core::model::{
    AnswerSubmission, AttemptId, AttemptPhase, CandidateReport, SelectedOption, TickOutcome,
};
use assess_core::time::fixed_clock;
use services::{AppServices, AttemptConfig, AttemptError};

fn script() -> Vec<ScriptedQuestion> {
    vec![
        ScriptedQuestion {
            skill: "sql".to_string(),
            text: "Which clause filters rows?".to_string(),
            options: vec!["WHERE".to_string(), "ORDER BY".to_string()],
            correct_option: 1,
        },
        ScriptedQuestion {
            skill: "python".to_string(),
            text: "Which keyword defines a function?".to_string(),
            options: vec!["func".to_string(), "def".to_string()],
            correct_option: 2,
        },
    ]
}

/// Counts backend calls while delegating to a real fake, so tests can
/// assert exactly how many requests an interaction produced.
struct CountingApi {
    inner: Arc<InMemoryBackend>,
    starts: AtomicU32,
    fetches: AtomicU32,
    submits: AtomicU32,
    ends: AtomicU32,
}

impl CountingApi {
    fn new(inner: Arc<InMemoryBackend>) -> Self {
        Self {
            inner,
            starts: AtomicU32::new(0),
            fetches: AtomicU32::new(0),
            submits: AtomicU32::new(0),
            ends: AtomicU32::new(0),
        }
    }
}

#[async_trait::async_trait]
impl AssessmentApi for CountingApi {
    async fn start(&self, attempt_id: AttemptId) -> Result<AttemptPlan, ApiError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.inner.start(attempt_id).await
    }

    async fn next_question(&self, attempt_id: AttemptId) -> Result<NextQuestion, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.next_question(attempt_id).await
    }

    async fn submit_answer(
        &self,
        attempt_id: AttemptId,
        submission: &AnswerSubmission,
    ) -> Result<String, ApiError> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.inner.submit_answer(attempt_id, submission).await
    }

    async fn end(&self, attempt_id: AttemptId) -> Result<CandidateReport, ApiError> {
        self.ends.fetch_add(1, Ordering::SeqCst);
        self.inner.end(attempt_id).await
    }
}

/// Delegates everything except submits, which always fail.
struct FailingSubmitApi {
    inner: Arc<InMemoryBackend>,
}

#[async_trait::async_trait]
impl AssessmentApi for FailingSubmitApi {
    async fn start(&self, attempt_id: AttemptId) -> Result<AttemptPlan, ApiError> {
        self.inner.start(attempt_id).await
    }

    async fn next_question(&self, attempt_id: AttemptId) -> Result<NextQuestion, ApiError> {
        self.inner.next_question(attempt_id).await
    }

    async fn submit_answer(
        &self,
        _attempt_id: AttemptId,
        _submission: &AnswerSubmission,
    ) -> Result<String, ApiError> {
        Err(ApiError::Connection("connection reset".to_string()))
    }

    async fn end(&self, attempt_id: AttemptId) -> Result<CandidateReport, ApiError> {
        self.inner.end(attempt_id).await
    }
}

fn controller_over(
    api: Arc<dyn AssessmentApi>,
    attempt_id: AttemptId,
) -> services::AttemptController {
    services::AttemptController::new(attempt_id, api, fixed_clock(), AttemptConfig::default())
}

#[tokio::test]
async fn start_issues_exactly_one_initial_fetch() {
    let backend = Arc::new(InMemoryBackend::new());
    let attempt_id = backend.stage_attempt(300, script()).unwrap();
    let counting = Arc::new(CountingApi::new(backend));
    let controller = controller_over(counting.clone(), attempt_id);

    controller.start().await.unwrap();

    assert_eq!(counting.starts.load(Ordering::SeqCst), 1);
    assert_eq!(counting.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(controller.view().question.as_ref().map(|q| q.number), Some(1));
}

#[tokio::test]
async fn refused_operations_never_reach_the_backend() {
    let backend = Arc::new(InMemoryBackend::new());
    let attempt_id = backend.stage_attempt(300, Vec::new()).unwrap();
    let counting = Arc::new(CountingApi::new(backend));
    let controller = controller_over(counting.clone(), attempt_id);

    // empty script: the initial fetch returns the completion payload
    controller.start().await.unwrap();
    assert!(controller.is_complete());
    let fetches_before = counting.fetches.load(Ordering::SeqCst);

    let err = controller.fetch_next_question().await.unwrap_err();
    assert!(err.is_refusal());
    let err = controller.end_session().await.unwrap_err();
    assert!(err.is_refusal());

    assert_eq!(counting.fetches.load(Ordering::SeqCst), fetches_before);
    assert_eq!(counting.ends.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_selection_submit_makes_no_network_call() {
    let backend = Arc::new(InMemoryBackend::new());
    let attempt_id = backend.stage_attempt(300, script()).unwrap();
    let counting = Arc::new(CountingApi::new(backend));
    let controller = controller_over(counting.clone(), attempt_id);
    controller.start().await.unwrap();

    let err = controller.submit_answer(None).await.unwrap_err();
    assert!(matches!(err, AttemptError::NoSelection));
    assert_eq!(counting.submits.load(Ordering::SeqCst), 0);
    assert!(controller.view().error.is_some());
}

#[tokio::test]
async fn failed_submit_keeps_question_and_allows_resubmit() {
    let backend = Arc::new(InMemoryBackend::new());
    let attempt_id = backend.stage_attempt(300, script()).unwrap();
    let failing: Arc<dyn AssessmentApi> = Arc::new(FailingSubmitApi {
        inner: backend.clone(),
    });
    let controller = controller_over(failing, attempt_id);
    controller.start().await.unwrap();

    let selection = Some(SelectedOption::new(1).unwrap());
    let err = controller.submit_answer(selection).await.unwrap_err();
    assert!(matches!(err, AttemptError::Api(_)));

    let view = controller.view();
    assert_eq!(view.phase, AttemptPhase::QuestionShown);
    assert_eq!(view.question.as_ref().map(|q| q.number), Some(1));
    assert!(view.error.is_some());

    // the machine accepts the same answer again
    let err = controller.submit_answer(selection).await.unwrap_err();
    assert!(matches!(err, AttemptError::Api(_)));
    assert_eq!(
        controller.view().question.as_ref().map(|q| q.number),
        Some(1)
    );
}

#[tokio::test]
async fn countdown_expiry_triggers_exactly_one_end() {
    let backend = Arc::new(InMemoryBackend::new());
    let attempt_id = backend.stage_attempt(5, script()).unwrap();
    let counting = Arc::new(CountingApi::new(backend));
    let controller = controller_over(counting.clone(), attempt_id);
    controller.start().await.unwrap();

    let mut ends = 0;
    for _ in 0..10 {
        if controller.tick() == TickOutcome::Expired {
            controller.end_session().await.unwrap();
            ends += 1;
        }
    }

    assert_eq!(ends, 1);
    assert_eq!(counting.ends.load(Ordering::SeqCst), 1);
    assert!(controller.is_complete());
}

#[tokio::test]
async fn app_services_wire_a_full_attempt_through_the_demo_backend() {
    let memory = InMemoryBackend::new();
    let attempt_id = memory.stage_attempt(300, script()).unwrap();
    let services = AppServices::new(
        Backend::from_memory(memory),
        fixed_clock(),
        AttemptConfig::default(),
    );

    let controller = services.attempt_controller(attempt_id);
    controller.start().await.unwrap();

    while !controller.is_complete() {
        controller
            .submit_answer(Some(SelectedOption::new(1).unwrap()))
            .await
            .unwrap();
        controller.fetch_next_question().await.unwrap();
    }

    let report = controller.view().report.unwrap();
    let overall = report.overall();
    assert_eq!(overall.total_attempted, 2);
    // sql answered correctly, python not
    assert_eq!(overall.total_correct, 1);
    assert!((overall.accuracy_percent - 50.0).abs() < f64::EPSILON);
}
