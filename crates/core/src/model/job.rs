use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::JobId;
use crate::model::skill::{SkillError, SkillName, SkillPriority, SkillRequirement};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum JobError {
    #[error("test name must not be empty")]
    EmptyTitle,

    #[error("at least one skill is required")]
    NoSkills,

    #[error("{field} must be a number")]
    InvalidNumber { field: &'static str },

    #[error("experience range is inverted: {min} > {max}")]
    InvalidExperienceRange { min: f64, max: f64 },

    #[error("duration must be at least one minute")]
    ZeroDuration,

    #[error("at least one question is required")]
    ZeroQuestions,

    #[error(transparent)]
    Skill(#[from] SkillError),
}

//
// ─── JOB POSTING ──────────────────────────────────────────────────────────────
//

/// An assessment posting as listed for candidates and recruiters.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    pub experience_min: f64,
    pub experience_max: f64,
    pub degree_required: Option<String>,
    pub description: String,
    /// When the assessment opens; `None` means it is open right away.
    pub schedule: Option<DateTime<Utc>>,
    pub duration_minutes: u32,
    pub num_questions: u32,
}

impl JobPosting {
    /// Whether a candidate may start this assessment at `now`.
    #[must_use]
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.schedule.is_none_or(|opens| opens <= now)
    }
}

//
// ─── JOB DRAFT ────────────────────────────────────────────────────────────────
//

/// Raw create-assessment form input. Numeric fields stay strings until
/// `validate` parses them, mirroring the text inputs they come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub experience_min: String,
    pub experience_max: String,
    pub duration_minutes: String,
    pub num_questions: String,
    pub schedule: Option<DateTime<Utc>>,
    pub degree_required: String,
    pub description: String,
    /// Skill rows as `(name, priority)` pairs from the form.
    pub skills: Vec<(String, String)>,
}

impl JobDraft {
    /// Validates the form into a posting request.
    ///
    /// # Errors
    ///
    /// Returns the first `JobError` encountered, in field order.
    pub fn validate(&self) -> Result<NewJobPosting, JobError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(JobError::EmptyTitle);
        }

        let experience_min = parse_number(&self.experience_min, "experience_min")?;
        let experience_max = parse_number(&self.experience_max, "experience_max")?;
        if experience_min > experience_max {
            return Err(JobError::InvalidExperienceRange {
                min: experience_min,
                max: experience_max,
            });
        }

        let duration_minutes: u32 = self
            .duration_minutes
            .trim()
            .parse()
            .map_err(|_| JobError::InvalidNumber {
                field: "duration_minutes",
            })?;
        if duration_minutes == 0 {
            return Err(JobError::ZeroDuration);
        }

        let num_questions: u32 = self
            .num_questions
            .trim()
            .parse()
            .map_err(|_| JobError::InvalidNumber {
                field: "num_questions",
            })?;
        if num_questions == 0 {
            return Err(JobError::ZeroQuestions);
        }

        let mut skills = Vec::with_capacity(self.skills.len());
        for (name, priority) in &self.skills {
            let name = SkillName::new(name.clone())?;
            let priority: SkillPriority = priority.parse()?;
            skills.push(SkillRequirement { name, priority });
        }
        if skills.is_empty() {
            return Err(JobError::NoSkills);
        }

        let degree_required = {
            let trimmed = self.degree_required.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };

        Ok(NewJobPosting {
            title: title.to_string(),
            experience_min,
            experience_max,
            duration_minutes,
            num_questions,
            schedule: self.schedule,
            degree_required,
            description: self.description.trim().to_string(),
            skills,
        })
    }
}

fn parse_number(raw: &str, field: &'static str) -> Result<f64, JobError> {
    raw.trim()
        .parse()
        .map_err(|_| JobError::InvalidNumber { field })
}

/// Validated create-assessment request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJobPosting {
    pub title: String,
    pub experience_min: f64,
    pub experience_max: f64,
    pub duration_minutes: u32,
    pub num_questions: u32,
    pub schedule: Option<DateTime<Utc>>,
    pub degree_required: Option<String>,
    pub description: String,
    pub skills: Vec<SkillRequirement>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
