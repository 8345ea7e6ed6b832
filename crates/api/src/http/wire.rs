//! JSON payloads as the backend speaks them, one struct per body shape,
//! with conversions into domain types. Nothing here leaks past the HTTP
//! adapter.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use assess_core::model::{
    AttemptId, AuthUser, CandidateId, CandidateProfile, CandidateRanking, CandidateReport,
    JobId, JobPosting, NewJobPosting, ProfileUpdate, Question, RankedCandidate, SkillName,
    SkillReport, UserId, UserRole,
};

use crate::backend::{ApiError, AttemptPlan, NextQuestion};

//
// ─── COMMON ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    #[allow(dead_code)]
    pub message: String,
}

fn payload(detail: impl Into<String>) -> ApiError {
    ApiError::Payload(detail.into())
}

/// Schedules arrive as ISO 8601 strings, with or without an offset.
/// Naive timestamps are taken as UTC; anything unparseable is treated
/// as absent with a warning, so one bad row cannot sink a whole list.
fn parse_schedule(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    tracing::warn!("ignoring unparseable schedule: {raw}");
    None
}

//
// ─── AUTH ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckResponse {
    pub user: CheckUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckUser {
    pub id: u64,
    pub email: String,
    pub role: String,
}

impl CheckResponse {
    pub(crate) fn into_user(self) -> Result<AuthUser, ApiError> {
        let role: UserRole = self
            .user
            .role
            .parse()
            .map_err(|_| payload(format!("unknown role: {}", self.user.role)))?;
        Ok(AuthUser {
            user_id: UserId::new(self.user.id),
            email: self.user.email,
            role,
        })
    }
}

pub(crate) fn role_from_wire(raw: &str) -> Result<UserRole, ApiError> {
    raw.parse()
        .map_err(|_| payload(format!("unknown role: {raw}")))
}

//
// ─── ASSESSMENT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct StartResponse {
    pub total_questions: u32,
    pub test_duration: u32,
}

impl StartResponse {
    pub(crate) fn into_plan(self) -> AttemptPlan {
        AttemptPlan {
            total_questions: self.total_questions,
            duration_secs: self.test_duration,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionBody {
    #[allow(dead_code)]
    pub id: Option<u64>,
    pub question: String,
    pub options: Vec<String>,
}

/// The next-question endpoint multiplexes three shapes over one 200
/// response; every field is optional and the combination decides.
#[derive(Debug, Deserialize)]
pub(crate) struct NextQuestionResponse {
    pub message: Option<String>,
    pub candidate_report: Option<BTreeMap<String, SkillReportBody>>,
    pub question: Option<QuestionBody>,
    pub skill: Option<String>,
    pub question_number: Option<u32>,
    pub greeting: Option<String>,
}

impl NextQuestionResponse {
    pub(crate) fn into_outcome(self) -> Result<NextQuestion, ApiError> {
        if let Some(report) = self.candidate_report {
            return Ok(NextQuestion::Completed {
                report: report_from_wire(report),
            });
        }
        if let Some(body) = self.question {
            let skill = self
                .skill
                .ok_or_else(|| payload("question without a skill tag"))?;
            let skill =
                SkillName::new(skill).map_err(|e| payload(format!("bad skill tag: {e}")))?;
            let number = self
                .question_number
                .ok_or_else(|| payload("question without a number"))?;
            let question = Question {
                id: body.id,
                text: body.question,
                options: body.options,
                skill,
                number,
            };
            return Ok(NextQuestion::Question {
                question,
                greeting: self.greeting,
            });
        }
        if let Some(message) = self.message {
            return Ok(NextQuestion::Unavailable { message });
        }
        Err(payload("next-question sent neither question nor report"))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitAnswerRequest<'a> {
    pub skill: &'a str,
    pub answer: String,
    pub time_taken: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAnswerResponse {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EndResponse {
    pub candidate_report: BTreeMap<String, SkillReportBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SkillReportBody {
    pub questions_attempted: u32,
    pub correct_answers: u32,
    #[serde(default)]
    pub accuracy_percent: f64,
    pub final_band: String,
}

pub(crate) fn report_from_wire(wire: BTreeMap<String, SkillReportBody>) -> CandidateReport {
    wire.into_iter()
        .map(|(skill, body)| {
            (
                skill,
                SkillReport::new(
                    body.questions_attempted,
                    body.correct_answers,
                    body.accuracy_percent,
                    body.final_band,
                ),
            )
        })
        .collect()
}

//
// ─── CANDIDATE ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    pub candidate_id: u64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub degree: Option<String>,
    pub years_of_experience: Option<f64>,
    pub is_profile_complete: bool,
}

impl ProfileResponse {
    pub(crate) fn into_profile(self) -> CandidateProfile {
        CandidateProfile {
            candidate_id: CandidateId::new(self.candidate_id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            location: self.location,
            linkedin: self.linkedin.and_then(|raw| raw.parse().ok()),
            github: self.github.and_then(|raw| raw.parse().ok()),
            degree: self.degree,
            years_of_experience: self.years_of_experience.unwrap_or(0.0),
            is_complete: self.is_profile_complete,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileUpdateRequest<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub location: Option<&'a str>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub degree: Option<&'a str>,
    pub years_of_experience: f64,
}

impl<'a> ProfileUpdateRequest<'a> {
    pub(crate) fn from_update(update: &'a ProfileUpdate) -> Self {
        Self {
            name: &update.name,
            phone: update.phone.as_deref(),
            location: update.location.as_deref(),
            linkedin: update.linkedin.as_ref().map(ToString::to_string),
            github: update.github.as_ref().map(ToString::to_string),
            degree: update.degree.as_deref(),
            years_of_experience: update.years_of_experience,
        }
    }
}

/// Candidate-facing job listing. The recruiter listing spells the degree
/// field differently; the two bodies are kept separate on purpose.
#[derive(Debug, Deserialize)]
pub(crate) struct EligibleAssessmentBody {
    pub job_id: u64,
    pub job_title: String,
    pub company: Option<String>,
    pub experience_min: f64,
    pub experience_max: f64,
    pub degree_required: Option<String>,
    pub schedule: Option<String>,
    pub duration: u32,
    pub num_questions: u32,
    pub description: Option<String>,
}

impl EligibleAssessmentBody {
    pub(crate) fn into_posting(self) -> JobPosting {
        JobPosting {
            job_id: JobId::new(self.job_id),
            title: self.job_title,
            company: self.company.unwrap_or_default(),
            experience_min: self.experience_min,
            experience_max: self.experience_max,
            degree_required: self.degree_required,
            description: self.description.unwrap_or_default(),
            schedule: parse_schedule(self.schedule.as_deref()),
            duration_minutes: self.duration,
            num_questions: self.num_questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StartAssessmentRequest {
    pub candidate_id: u64,
    pub job_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartAssessmentResponse {
    pub attempt_id: u64,
}

impl StartAssessmentResponse {
    pub(crate) fn into_id(self) -> AttemptId {
        AttemptId::new(self.attempt_id)
    }
}

//
// ─── RECRUITER ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct RecruiterAssessmentBody {
    pub job_id: u64,
    pub job_title: String,
    pub company: Option<String>,
    pub experience_min: f64,
    pub experience_max: f64,
    pub duration: u32,
    pub num_questions: u32,
    pub schedule: Option<String>,
    pub required_degree: Option<String>,
    pub description: Option<String>,
}

impl RecruiterAssessmentBody {
    pub(crate) fn into_posting(self) -> JobPosting {
        JobPosting {
            job_id: JobId::new(self.job_id),
            title: self.job_title,
            company: self.company.unwrap_or_default(),
            experience_min: self.experience_min,
            experience_max: self.experience_max,
            degree_required: self.required_degree,
            description: self.description.unwrap_or_default(),
            schedule: parse_schedule(self.schedule.as_deref()),
            duration_minutes: self.duration,
            num_questions: self.num_questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SkillEntry {
    pub name: String,
    pub priority: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateAssessmentRequest<'a> {
    pub test_name: &'a str,
    pub skills: Vec<SkillEntry>,
    pub experience_min: f64,
    pub experience_max: f64,
    pub duration: u32,
    pub num_questions: u32,
    pub schedule: Option<String>,
    pub required_degree: Option<&'a str>,
    pub description: &'a str,
}

impl<'a> CreateAssessmentRequest<'a> {
    pub(crate) fn from_posting(posting: &'a NewJobPosting) -> Self {
        Self {
            test_name: &posting.title,
            skills: posting
                .skills
                .iter()
                .map(|skill| SkillEntry {
                    name: skill.name.as_str().to_string(),
                    priority: skill.priority.as_str(),
                })
                .collect(),
            experience_min: posting.experience_min,
            experience_max: posting.experience_max,
            duration: posting.duration_minutes,
            num_questions: posting.num_questions,
            schedule: posting.schedule.map(|instant| instant.to_rfc3339()),
            required_degree: posting.degree_required.as_deref(),
            description: &posting.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateAssessmentResponse {
    pub job_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankedCandidatesResponse {
    pub job_id: u64,
    pub job_title: String,
    pub candidates: Vec<RankedCandidateBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankedCandidateBody {
    pub rank: u32,
    pub candidate_id: u64,
    pub name: String,
    pub email: String,
    pub total_score: f64,
    pub skill_score: f64,
    pub experience_score: f64,
    pub description: Option<String>,
}

impl RankedCandidatesResponse {
    pub(crate) fn into_ranking(self) -> CandidateRanking {
        CandidateRanking {
            job_id: JobId::new(self.job_id),
            job_title: self.job_title,
            candidates: self
                .candidates
                .into_iter()
                .map(|body| RankedCandidate {
                    rank: body.rank,
                    candidate_id: CandidateId::new(body.candidate_id),
                    name: body.name,
                    email: body.email,
                    total_score: body.total_score,
                    skill_score: body.skill_score,
                    experience_score: body.experience_score,
                    description: body.description.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
