use crate::model::ids::{CandidateId, JobId};

/// One row of a job's leaderboard, already scored and ranked by the
/// backend: the total weighs skill fit against experience fit.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub rank: u32,
    pub candidate_id: CandidateId,
    pub name: String,
    pub email: String,
    pub total_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub description: String,
}

/// Leaderboard for one job posting, best candidate first.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRanking {
    pub job_id: JobId,
    pub job_title: String,
    pub candidates: Vec<RankedCandidate>,
}

impl CandidateRanking {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
