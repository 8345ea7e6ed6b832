use assess_core::model::{AnswerSubmission, AttemptId, CandidateReport};

use super::HttpBackend;
use super::decode;
use super::wire;
use crate::backend::{ApiError, AssessmentApi, AttemptPlan, NextQuestion};

#[async_trait::async_trait]
impl AssessmentApi for HttpBackend {
    async fn start(&self, attempt_id: AttemptId) -> Result<AttemptPlan, ApiError> {
        let url = self.url(&format!("/api/assessment/start/{}", attempt_id.value()));
        let response = self.client.post(url).send().await?;
        let body: wire::StartResponse = decode(response).await?;
        Ok(body.into_plan())
    }

    async fn next_question(&self, attempt_id: AttemptId) -> Result<NextQuestion, ApiError> {
        let url = self.url(&format!(
            "/api/assessment/next-question/{}",
            attempt_id.value()
        ));
        let response = self.client.get(url).send().await?;
        let body: wire::NextQuestionResponse = decode(response).await?;
        body.into_outcome()
    }

    async fn submit_answer(
        &self,
        attempt_id: AttemptId,
        submission: &AnswerSubmission,
    ) -> Result<String, ApiError> {
        let url = self.url(&format!(
            "/api/assessment/submit-answer/{}",
            attempt_id.value()
        ));
        // Answers travel as the one-based option position, stringified.
        let payload = wire::SubmitAnswerRequest {
            skill: submission.skill.as_str(),
            answer: submission.selected.index().to_string(),
            time_taken: submission.seconds_taken,
        };
        let response = self.client.post(url).json(&payload).send().await?;
        let body: wire::SubmitAnswerResponse = decode(response).await?;
        Ok(body.feedback)
    }

    async fn end(&self, attempt_id: AttemptId) -> Result<CandidateReport, ApiError> {
        let url = self.url(&format!("/api/assessment/end/{}", attempt_id.value()));
        let response = self.client.post(url).send().await?;
        let body: wire::EndResponse = decode(response).await?;
        Ok(wire::report_from_wire(body.candidate_report))
    }
}
