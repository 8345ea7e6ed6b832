use std::sync::Arc;

use api::CandidateApi;
use assess_core::Clock;
use assess_core::model::{
    AttemptId, CandidateId, CandidateProfile, JobPosting, ProfileDraft, UserId,
};

use crate::error::CandidateError;

/// Candidate-side facade: profile upkeep, assessment discovery, and
/// attempt registration.
///
/// Owns the time source so the schedule gate stays deterministic in
/// tests; the backend re-checks eligibility authoritatively.
#[derive(Clone)]
pub struct CandidateService {
    clock: Clock,
    candidate: Arc<dyn CandidateApi>,
}

impl CandidateService {
    #[must_use]
    pub fn new(clock: Clock, candidate: Arc<dyn CandidateApi>) -> Self {
        Self { clock, candidate }
    }

    /// Fetches the profile attached to a user account.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::Api` if the candidate is unknown.
    pub async fn profile(&self, user_id: UserId) -> Result<CandidateProfile, CandidateError> {
        Ok(self.candidate.profile(user_id).await?)
    }

    /// Validates the profile form and saves it.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::Validation` for malformed fields and
    /// `CandidateError::Api` when a unique field is already in use.
    pub async fn save_profile(
        &self,
        user_id: UserId,
        draft: &ProfileDraft,
    ) -> Result<(), CandidateError> {
        let update = draft.validate()?;
        self.candidate.update_profile(user_id, &update).await?;
        tracing::info!(user_id = %user_id, "profile saved");
        Ok(())
    }

    /// Assessments this candidate qualifies for. Empty until the profile
    /// is complete.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::Api` if the candidate is unknown.
    pub async fn eligible_assessments(
        &self,
        user_id: UserId,
    ) -> Result<Vec<JobPosting>, CandidateError> {
        Ok(self.candidate.eligible_assessments(user_id).await?)
    }

    /// Registers an attempt for a posting, gated on its schedule.
    ///
    /// # Errors
    ///
    /// Returns `CandidateError::NotOpenYet` before the scheduled time
    /// (no backend call is made) and `CandidateError::Api` when the
    /// backend refuses.
    pub async fn begin_attempt(
        &self,
        candidate_id: CandidateId,
        posting: &JobPosting,
    ) -> Result<AttemptId, CandidateError> {
        let now = self.clock.now();
        if !posting.is_open_at(now) {
            let opens_at = posting.schedule.unwrap_or(now);
            return Err(CandidateError::NotOpenYet { opens_at });
        }
        let attempt_id = self
            .candidate
            .start_assessment(candidate_id, posting.job_id)
            .await?;
        tracing::info!(
            candidate_id = %candidate_id,
            job_id = %posting.job_id,
            attempt_id = %attempt_id,
            "attempt registered"
        );
        Ok(attempt_id)
    }
}
