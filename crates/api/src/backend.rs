use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use assess_core::model::{
    AnswerSubmission, AttemptId, AuthUser, CandidateId, CandidateProfile, CandidateRanking,
    CandidateReport, Credentials, JobId, JobPosting, NewJobPosting, ProfileUpdate, Question,
    Signup, UserId, UserRole,
};

use crate::http::HttpBackend;
use crate::memory::InMemoryBackend;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-success status. `message` carries the body's `error` field when
    /// the backend sent one, otherwise a generic `HTTP error {status}`.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("unexpected response payload: {0}")]
    Payload(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Shorthand for an API-reported refusal.
    #[must_use]
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

//
// ─── ASSESSMENT ───────────────────────────────────────────────────────────────
//

/// Session parameters returned by the start call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptPlan {
    pub total_questions: u32,
    pub duration_secs: u32,
}

/// What the next-question call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum NextQuestion {
    /// Another question to show. A greeting may ride along with the
    /// first one.
    Question {
        question: Question,
        greeting: Option<String>,
    },
    /// The backend declared the attempt finished and sent the report.
    Completed { report: CandidateReport },
    /// A 2xx answer that carried neither a question nor a report, with
    /// the backend's explanation (the question bank ran dry).
    Unavailable { message: String },
}

/// One candidate's attempt loop, addressed by attempt id.
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// Open the attempt session and fetch its parameters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the attempt is unknown or the call fails.
    async fn start(&self, attempt_id: AttemptId) -> Result<AttemptPlan, ApiError>;

    /// Fetch the next question, or the completion payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the session is unknown or the call fails.
    async fn next_question(&self, attempt_id: AttemptId) -> Result<NextQuestion, ApiError>;

    /// Submit the answer for the current question and get feedback text.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the session is unknown or the call fails.
    async fn submit_answer(
        &self,
        attempt_id: AttemptId,
        submission: &AnswerSubmission,
    ) -> Result<String, ApiError>;

    /// End the attempt and collect the final report.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the session is unknown or the call fails.
    async fn end(&self, attempt_id: AttemptId) -> Result<CandidateReport, ApiError>;
}

//
// ─── AUTH ─────────────────────────────────────────────────────────────────────
//

/// Account and session operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Register a new candidate account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the email is taken or the call fails.
    async fn signup(&self, signup: &Signup) -> Result<(), ApiError>;

    /// Sign in and learn which dashboard to route to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on bad credentials or transport failure.
    async fn login(&self, credentials: &Credentials) -> Result<UserRole, ApiError>;

    /// Fetch the signed-in user for the current session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when nobody is signed in.
    async fn check(&self) -> Result<AuthUser, ApiError>;

    /// Drop the current session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure.
    async fn logout(&self) -> Result<(), ApiError>;
}

//
// ─── CANDIDATE ────────────────────────────────────────────────────────────────
//

/// Candidate-side profile and assessment discovery.
#[async_trait]
pub trait CandidateApi: Send + Sync {
    /// Fetch the profile attached to a user account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the candidate is unknown or the call fails.
    async fn profile(&self, user_id: UserId) -> Result<CandidateProfile, ApiError>;

    /// Save profile changes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when a unique field is already in use.
    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate)
    -> Result<(), ApiError>;

    /// Assessments this candidate qualifies for. Empty until the profile
    /// is complete.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the candidate is unknown or the call fails.
    async fn eligible_assessments(&self, user_id: UserId) -> Result<Vec<JobPosting>, ApiError>;

    /// Register an attempt for a job and get its id back.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the job is unknown or the call fails.
    async fn start_assessment(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<AttemptId, ApiError>;
}

//
// ─── RECRUITER ────────────────────────────────────────────────────────────────
//

/// Recruiter-side assessment management and results.
#[async_trait]
pub trait RecruiterApi: Send + Sync {
    /// All assessments this recruiter owns.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure.
    async fn assessments(&self, recruiter_id: UserId) -> Result<Vec<JobPosting>, ApiError>;

    /// Publish a new assessment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend rejects the posting.
    async fn create_assessment(
        &self,
        recruiter_id: UserId,
        posting: &NewJobPosting,
    ) -> Result<JobId, ApiError>;

    /// Scored and ordered candidates for one job.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the job is unknown or the call fails.
    async fn ranked_candidates(&self, job_id: JobId) -> Result<CandidateRanking, ApiError>;
}

//
// ─── BACKEND AGGREGATE ────────────────────────────────────────────────────────
//

/// Aggregates the API surfaces behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Backend {
    pub assessment: Arc<dyn AssessmentApi>,
    pub auth: Arc<dyn AuthApi>,
    pub candidate: Arc<dyn CandidateApi>,
    pub recruiter: Arc<dyn RecruiterApi>,
}

impl Backend {
    /// Talk to a real server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be built.
    pub fn http(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Arc::new(HttpBackend::new(base_url)?);
        Ok(Self {
            assessment: http.clone(),
            auth: http.clone(),
            candidate: http.clone(),
            recruiter: http,
        })
    }

    /// Self-contained fake backend, seeded with demo data.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_memory(InMemoryBackend::with_demo_data())
    }

    /// Wrap an existing fake, handy when a test stages its own state.
    #[must_use]
    pub fn from_memory(memory: InMemoryBackend) -> Self {
        let memory = Arc::new(memory);
        Self {
            assessment: memory.clone(),
            auth: memory.clone(),
            candidate: memory.clone(),
            recruiter: memory,
        }
    }
}
