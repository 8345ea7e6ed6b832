use assess_core::model::{
    AttemptId, CandidateId, CandidateProfile, JobId, JobPosting, ProfileUpdate, UserId,
};

use super::HttpBackend;
use super::decode;
use super::wire;
use crate::backend::{ApiError, CandidateApi};

#[async_trait::async_trait]
impl CandidateApi for HttpBackend {
    async fn profile(&self, user_id: UserId) -> Result<CandidateProfile, ApiError> {
        let url = self.url(&format!("/api/candidate/profile/{}", user_id.value()));
        let response = self.client.get(url).send().await?;
        let body: wire::ProfileResponse = decode(response).await?;
        Ok(body.into_profile())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/candidate/profile/{}", user_id.value()));
        let payload = wire::ProfileUpdateRequest::from_update(update);
        // the profile endpoint reads form fields, not a JSON body
        let response = self.client.post(url).form(&payload).send().await?;
        decode::<wire::MessageBody>(response).await?;
        Ok(())
    }

    async fn eligible_assessments(&self, user_id: UserId) -> Result<Vec<JobPosting>, ApiError> {
        let url = self.url(&format!(
            "/api/candidate/eligible-assessments/{}",
            user_id.value()
        ));
        let response = self.client.get(url).send().await?;
        let bodies: Vec<wire::EligibleAssessmentBody> = decode(response).await?;
        Ok(bodies
            .into_iter()
            .map(wire::EligibleAssessmentBody::into_posting)
            .collect())
    }

    async fn start_assessment(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<AttemptId, ApiError> {
        let url = self.url("/api/candidate/start-assessment");
        let payload = wire::StartAssessmentRequest {
            candidate_id: candidate_id.value(),
            job_id: job_id.value(),
        };
        let response = self.client.post(url).json(&payload).send().await?;
        let body: wire::StartAssessmentResponse = decode(response).await?;
        Ok(body.into_id())
    }
}
