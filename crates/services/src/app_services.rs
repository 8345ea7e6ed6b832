use std::sync::Arc;

use api::Backend;
use assess_core::model::AttemptId;

use crate::Clock;
use crate::attempt::{AttemptConfig, AttemptController};
use crate::auth_service::AuthService;
use crate::candidate_service::CandidateService;
use crate::recruiter_service::RecruiterService;

/// Assembles the app-facing services over one backend.
///
/// The composition root (the binary) picks the backend and the clock;
/// everything downstream receives them from here.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    attempt_config: AttemptConfig,
    backend: Backend,
    auth: Arc<AuthService>,
    candidate: Arc<CandidateService>,
    recruiter: Arc<RecruiterService>,
}

impl AppServices {
    #[must_use]
    pub fn new(backend: Backend, clock: Clock, attempt_config: AttemptConfig) -> Self {
        let auth = Arc::new(AuthService::new(Arc::clone(&backend.auth)));
        let candidate = Arc::new(CandidateService::new(clock, Arc::clone(&backend.candidate)));
        let recruiter = Arc::new(RecruiterService::new(clock, Arc::clone(&backend.recruiter)));
        Self {
            clock,
            attempt_config,
            backend,
            auth,
            candidate,
            recruiter,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn candidate(&self) -> Arc<CandidateService> {
        Arc::clone(&self.candidate)
    }

    #[must_use]
    pub fn recruiter(&self) -> Arc<RecruiterService> {
        Arc::clone(&self.recruiter)
    }

    /// A fresh controller for one attempt. Controllers are per-view and
    /// discarded on navigation; nothing is persisted client-side.
    #[must_use]
    pub fn attempt_controller(&self, attempt_id: AttemptId) -> AttemptController {
        AttemptController::new(
            attempt_id,
            Arc::clone(&self.backend.assessment),
            self.clock,
            self.attempt_config,
        )
    }
}
