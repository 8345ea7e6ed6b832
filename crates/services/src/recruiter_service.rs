use std::sync::Arc;

use api::RecruiterApi;
use assess_core::Clock;
use assess_core::model::{CandidateRanking, JobDraft, JobId, JobPosting, UserId};

use crate::error::RecruiterError;

/// A recruiter's postings split by where their schedule sits relative
/// to now. Unscheduled postings count as upcoming: they can still be
/// taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentBoard {
    pub upcoming: Vec<JobPosting>,
    pub past: Vec<JobPosting>,
}

/// Recruiter-side facade: assessment management and results.
#[derive(Clone)]
pub struct RecruiterService {
    clock: Clock,
    recruiter: Arc<dyn RecruiterApi>,
}

impl RecruiterService {
    #[must_use]
    pub fn new(clock: Clock, recruiter: Arc<dyn RecruiterApi>) -> Self {
        Self { clock, recruiter }
    }

    /// All of this recruiter's postings, split into upcoming and past.
    ///
    /// # Errors
    ///
    /// Returns `RecruiterError::Api` on transport failure.
    pub async fn assessments(&self, recruiter_id: UserId) -> Result<AssessmentBoard, RecruiterError> {
        let now = self.clock.now();
        let mut board = AssessmentBoard::default();
        for posting in self.recruiter.assessments(recruiter_id).await? {
            match posting.schedule {
                Some(opens) if opens < now => board.past.push(posting),
                _ => board.upcoming.push(posting),
            }
        }
        Ok(board)
    }

    /// Validates the create-assessment form and publishes it.
    ///
    /// # Errors
    ///
    /// Returns `RecruiterError::Validation` for malformed fields and
    /// `RecruiterError::Api` when the backend rejects the posting.
    pub async fn create_assessment(
        &self,
        recruiter_id: UserId,
        draft: &JobDraft,
    ) -> Result<JobId, RecruiterError> {
        let posting = draft.validate()?;
        let job_id = self
            .recruiter
            .create_assessment(recruiter_id, &posting)
            .await?;
        tracing::info!(recruiter_id = %recruiter_id, job_id = %job_id, "assessment published");
        Ok(job_id)
    }

    /// The scored leaderboard for one posting.
    ///
    /// # Errors
    ///
    /// Returns `RecruiterError::Api` if the job is unknown.
    pub async fn ranking(&self, job_id: JobId) -> Result<CandidateRanking, RecruiterError> {
        Ok(self.recruiter.ranked_candidates(job_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryBackend;
    use assess_core::model::JobError;

    // demo data: user 1 is the recruiter, job 4 has a finished attempt
    const RECRUITER: u64 = 1;

    fn service() -> RecruiterService {
        RecruiterService::new(
            Clock::default(),
            Arc::new(InMemoryBackend::with_demo_data()),
        )
    }

    #[tokio::test]
    async fn board_splits_postings_around_now() {
        let service = service();
        let board = service.assessments(UserId::new(RECRUITER)).await.unwrap();

        // demo data: one unscheduled, one in two days, one three days ago
        assert_eq!(board.upcoming.len(), 2);
        assert_eq!(board.past.len(), 1);
        assert!(board.past[0].schedule.is_some());
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_any_call() {
        let service = service();
        let draft = JobDraft {
            title: "Broken".to_string(),
            experience_min: "2".to_string(),
            experience_max: "ten".to_string(),
            duration_minutes: "30".to_string(),
            num_questions: "10".to_string(),
            skills: vec![("sql".to_string(), "high".to_string())],
            ..JobDraft::default()
        };
        let err = service
            .create_assessment(UserId::new(RECRUITER), &draft)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RecruiterError::Validation(JobError::InvalidNumber { .. })
        ));
    }

    #[tokio::test]
    async fn created_assessment_shows_on_the_board() {
        let service = service();
        let draft = JobDraft {
            title: "Platform Screen".to_string(),
            experience_min: "0".to_string(),
            experience_max: "5".to_string(),
            duration_minutes: "25".to_string(),
            num_questions: "10".to_string(),
            skills: vec![("python".to_string(), "high".to_string())],
            ..JobDraft::default()
        };
        let job_id = service
            .create_assessment(UserId::new(RECRUITER), &draft)
            .await
            .unwrap();

        let board = service.assessments(UserId::new(RECRUITER)).await.unwrap();
        assert!(board.upcoming.iter().any(|p| p.job_id == job_id));
    }

    #[tokio::test]
    async fn ranking_is_ordered_best_first() {
        let service = service();
        let ranking = service.ranking(JobId::new(4)).await.unwrap();

        assert!(!ranking.is_empty());
        assert_eq!(ranking.candidates[0].rank, 1);
        for pair in ranking.candidates.windows(2) {
            assert!(pair[0].total_score >= pair[1].total_score);
        }
    }
}
