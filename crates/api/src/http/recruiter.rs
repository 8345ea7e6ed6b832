use assess_core::model::{CandidateRanking, JobId, JobPosting, NewJobPosting, UserId};

use super::HttpBackend;
use super::decode;
use super::wire;
use crate::backend::{ApiError, RecruiterApi};

fn assessments_path(recruiter_id: UserId) -> String {
    format!("/api/recruiter/assessments/{}", recruiter_id.value())
}

// creation posts to the bare collection route; the server attributes the
// posting to the signed-in recruiter itself
const CREATE_ASSESSMENT_PATH: &str = "/api/recruiter/assessments";

#[async_trait::async_trait]
impl RecruiterApi for HttpBackend {
    async fn assessments(&self, recruiter_id: UserId) -> Result<Vec<JobPosting>, ApiError> {
        let url = self.url(&assessments_path(recruiter_id));
        let response = self.client.get(url).send().await?;
        let bodies: Vec<wire::RecruiterAssessmentBody> = decode(response).await?;
        Ok(bodies
            .into_iter()
            .map(wire::RecruiterAssessmentBody::into_posting)
            .collect())
    }

    async fn create_assessment(
        &self,
        _recruiter_id: UserId,
        posting: &NewJobPosting,
    ) -> Result<JobId, ApiError> {
        let url = self.url(CREATE_ASSESSMENT_PATH);
        let payload = wire::CreateAssessmentRequest::from_posting(posting);
        let response = self.client.post(url).json(&payload).send().await?;
        let body: wire::CreateAssessmentResponse = decode(response).await?;
        Ok(JobId::new(body.job_id))
    }

    async fn ranked_candidates(&self, job_id: JobId) -> Result<CandidateRanking, ApiError> {
        let url = self.url(&format!("/api/recruiter/candidates/{}", job_id.value()));
        let response = self.client.get(url).send().await?;
        let body: wire::RankedCandidatesResponse = decode(response).await?;
        Ok(body.into_ranking())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // the listing route carries the recruiter id; creation does not
    #[test]
    fn create_route_has_no_recruiter_segment() {
        assert_eq!(assessments_path(UserId::new(7)), "/api/recruiter/assessments/7");
        assert_eq!(CREATE_ASSESSMENT_PATH, "/api/recruiter/assessments");
    }
}
