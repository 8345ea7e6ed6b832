//! Self-contained fake backend for tests and the offline demo mode.
//!
//! Attempts run against scripted question queues, graded with the same
//! band ladder and feedback strings the real service uses, so a client
//! driven against this backend sees realistic payloads end to end.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::StatusCode;

use assess_core::model::{
    AnswerSubmission, AttemptId, AuthUser, CandidateId, CandidateProfile, CandidateRanking,
    CandidateReport, Credentials, JobId, JobPosting, NewJobPosting, ProfileUpdate, Question,
    RankedCandidate, Signup, SkillName, SkillReport, SkillRequirement, UserId, UserRole,
};

use crate::backend::{
    ApiError, AssessmentApi, AttemptPlan, AuthApi, CandidateApi, NextQuestion, RecruiterApi,
};

const BANDS: [&str; 3] = ["good", "better", "perfect"];
const START_BAND: usize = 1;
const CORRECT_FEEDBACK: &str = "✅ Nice one! That was spot on.";
const GREETING: &str = "Hi! Your assessment starts now. All the best!";

//
// ─── SCRIPTS ──────────────────────────────────────────────────────────────────
//

/// One pre-scripted question: what gets served and which option grades
/// as correct (one-based, matching the wire convention).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedQuestion {
    pub skill: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: u32,
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    attempted: u32,
    correct: u32,
    band: usize,
}

impl Tally {
    fn new() -> Self {
        Self {
            attempted: 0,
            correct: 0,
            band: START_BAND,
        }
    }
}

struct MemoryAttempt {
    candidate_id: u64,
    job_id: Option<u64>,
    queue: VecDeque<ScriptedQuestion>,
    current: Option<ScriptedQuestion>,
    served: u32,
    total_questions: u32,
    duration_secs: u32,
    tallies: BTreeMap<String, Tally>,
    completed: bool,
}

impl MemoryAttempt {
    fn report(&self) -> CandidateReport {
        self.tallies
            .iter()
            .map(|(skill, tally)| {
                let accuracy = if tally.attempted > 0 {
                    let raw = f64::from(tally.correct) / f64::from(tally.attempted) * 100.0;
                    (raw * 100.0).round() / 100.0
                } else {
                    0.0
                };
                (
                    skill.clone(),
                    SkillReport::new(tally.attempted, tally.correct, accuracy, BANDS[tally.band]),
                )
            })
            .collect()
    }

    fn finalize(&mut self) -> CandidateReport {
        self.completed = true;
        self.current = None;
        self.report()
    }

    fn overall_accuracy(&self) -> f64 {
        let attempted: u32 = self.tallies.values().map(|t| t.attempted).sum();
        let correct: u32 = self.tallies.values().map(|t| t.correct).sum();
        if attempted > 0 {
            f64::from(correct) / f64::from(attempted) * 100.0
        } else {
            0.0
        }
    }
}

struct MemoryUser {
    id: u64,
    name: String,
    email: String,
    password: String,
    role: UserRole,
}

struct StoredJob {
    recruiter_id: u64,
    posting: JobPosting,
    skills: Vec<SkillRequirement>,
}

struct MemoryState {
    users: Vec<MemoryUser>,
    session_user: Option<u64>,
    profiles: HashMap<u64, CandidateProfile>,
    jobs: Vec<StoredJob>,
    attempts: HashMap<u64, MemoryAttempt>,
    next_id: u64,
}

impl MemoryState {
    fn new() -> Self {
        Self {
            users: Vec::new(),
            session_user: None,
            profiles: HashMap::new(),
            jobs: Vec::new(),
            attempts: HashMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn session_not_found() -> ApiError {
    ApiError::api(StatusCode::NOT_FOUND, "Assessment session not found")
}

/// Question allocation per skill mirrors the real generator: weights of
/// 2/3/5 for low/medium/high priority, scaled to the question count.
fn demo_script(skills: &[SkillRequirement], total_questions: u32) -> Vec<ScriptedQuestion> {
    let weight = |req: &SkillRequirement| -> f64 {
        match req.priority.as_str() {
            "low" => 2.0,
            "high" => 5.0,
            _ => 3.0,
        }
    };
    let weight_sum: f64 = skills.iter().map(weight).sum();
    let mut script = Vec::with_capacity(total_questions as usize);
    for req in skills {
        let share = if weight_sum > 0.0 {
            (weight(req) / weight_sum * f64::from(total_questions)).round() as u32
        } else {
            0
        };
        let label = req.name.label();
        for n in 1..=share {
            script.push(ScriptedQuestion {
                skill: req.name.as_str().to_string(),
                text: format!("Sample {label} question {n}"),
                options: vec![
                    "Option A".to_string(),
                    "Option B".to_string(),
                    "Option C".to_string(),
                    "Option D".to_string(),
                ],
                correct_option: n % 4 + 1,
            });
        }
    }
    script.truncate(total_questions as usize);
    script
}

//
// ─── BACKEND ──────────────────────────────────────────────────────────────────
//

/// Fake implementation of every API surface for testing and the demo.
#[derive(Clone)]
pub struct InMemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::new())),
        }
    }

    /// A populated world: one recruiter, two candidates (one with a
    /// finished attempt so the leaderboard has data), three postings
    /// across the scheduled/open/past spread.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let mut state = MemoryState::new();
        let now = Utc::now();

        let recruiter_id = state.allocate_id();
        state.users.push(MemoryUser {
            id: recruiter_id,
            name: "Meera Pillai".to_string(),
            email: "recruiter@example.com".to_string(),
            password: "password".to_string(),
            role: UserRole::Recruiter,
        });

        let asha_id = state.allocate_id();
        state.users.push(MemoryUser {
            id: asha_id,
            name: "Asha Rao".to_string(),
            email: "candidate@example.com".to_string(),
            password: "password".to_string(),
            role: UserRole::Candidate,
        });
        state.profiles.insert(
            asha_id,
            CandidateProfile {
                candidate_id: CandidateId::new(asha_id),
                name: "Asha Rao".to_string(),
                email: "candidate@example.com".to_string(),
                phone: Some("+91 98450 11223".to_string()),
                location: Some("Bengaluru".to_string()),
                linkedin: None,
                github: None,
                degree: Some("B.Tech".to_string()),
                years_of_experience: 2.5,
                is_complete: true,
            },
        );

        let vikram_id = state.allocate_id();
        state.users.push(MemoryUser {
            id: vikram_id,
            name: "Vikram Shah".to_string(),
            email: "vikram@example.com".to_string(),
            password: "password".to_string(),
            role: UserRole::Candidate,
        });
        state.profiles.insert(
            vikram_id,
            CandidateProfile {
                candidate_id: CandidateId::new(vikram_id),
                name: "Vikram Shah".to_string(),
                email: "vikram@example.com".to_string(),
                phone: Some("+91 98220 44556".to_string()),
                location: Some("Pune".to_string()),
                linkedin: None,
                github: None,
                degree: Some("B.Tech".to_string()),
                years_of_experience: 3.5,
                is_complete: true,
            },
        );

        let sql = SkillRequirement::new(
            SkillName::new("sql").unwrap_or_else(|_| unreachable!()),
            "high".parse().unwrap_or_else(|_| unreachable!()),
        );
        let python = SkillRequirement::new(
            SkillName::new("python").unwrap_or_else(|_| unreachable!()),
            "medium".parse().unwrap_or_else(|_| unreachable!()),
        );

        let backend_job = state.allocate_id();
        state.jobs.push(StoredJob {
            recruiter_id,
            posting: JobPosting {
                job_id: JobId::new(backend_job),
                title: "Backend Engineer Screen".to_string(),
                company: "Northwind Labs".to_string(),
                experience_min: 1.0,
                experience_max: 4.0,
                degree_required: Some("B.Tech".to_string()),
                description: "SQL and Python fundamentals for backend roles.".to_string(),
                schedule: None,
                duration_minutes: 20,
                num_questions: 8,
            },
            skills: vec![sql.clone(), python.clone()],
        });

        let analyst_job = state.allocate_id();
        state.jobs.push(StoredJob {
            recruiter_id,
            posting: JobPosting {
                job_id: JobId::new(analyst_job),
                title: "Data Analyst Screen".to_string(),
                company: "Northwind Labs".to_string(),
                experience_min: 0.0,
                experience_max: 3.0,
                degree_required: None,
                description: "Opens later this week.".to_string(),
                schedule: Some(now + Duration::days(2)),
                duration_minutes: 30,
                num_questions: 10,
            },
            skills: vec![sql.clone()],
        });

        let frontend_job = state.allocate_id();
        state.jobs.push(StoredJob {
            recruiter_id,
            posting: JobPosting {
                job_id: JobId::new(frontend_job),
                title: "Frontend Basics Screen".to_string(),
                company: "Northwind Labs".to_string(),
                experience_min: 0.0,
                experience_max: 5.0,
                degree_required: None,
                description: "Ran earlier this month.".to_string(),
                schedule: Some(now - Duration::days(3)),
                duration_minutes: 15,
                num_questions: 6,
            },
            skills: vec![python.clone()],
        });

        // Vikram already finished the backend screen, so the recruiter's
        // leaderboard has a row on first open.
        let finished_attempt = state.allocate_id();
        let mut tallies = BTreeMap::new();
        tallies.insert(
            "sql".to_string(),
            Tally {
                attempted: 5,
                correct: 4,
                band: 2,
            },
        );
        tallies.insert(
            "python".to_string(),
            Tally {
                attempted: 3,
                correct: 2,
                band: 1,
            },
        );
        state.attempts.insert(
            finished_attempt,
            MemoryAttempt {
                candidate_id: vikram_id,
                job_id: Some(backend_job),
                queue: VecDeque::new(),
                current: None,
                served: 8,
                total_questions: 8,
                duration_secs: 20 * 60,
                tallies,
                completed: true,
            },
        );

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Register a standalone attempt with an exact question script, so a
    /// test controls which answers grade as correct.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Payload` for a malformed script.
    pub fn stage_attempt(
        &self,
        duration_secs: u32,
        questions: Vec<ScriptedQuestion>,
    ) -> Result<AttemptId, ApiError> {
        for question in &questions {
            let options = u32::try_from(question.options.len())
                .map_err(|_| ApiError::Payload("too many options".to_string()))?;
            if question.correct_option == 0 || question.correct_option > options {
                return Err(ApiError::Payload(format!(
                    "correct_option {} out of range",
                    question.correct_option
                )));
            }
        }
        let total_questions = u32::try_from(questions.len())
            .map_err(|_| ApiError::Payload("too many questions".to_string()))?;

        let mut tallies = BTreeMap::new();
        for question in &questions {
            tallies.entry(question.skill.clone()).or_insert_with(Tally::new);
        }

        let mut state = self.lock()?;
        let id = state.allocate_id();
        state.attempts.insert(
            id,
            MemoryAttempt {
                candidate_id: 0,
                job_id: None,
                queue: questions.into(),
                current: None,
                served: 0,
                total_questions,
                duration_secs,
                tallies,
                completed: false,
            },
        );
        Ok(AttemptId::new(id))
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))
    }
}

//
// ─── ASSESSMENT ───────────────────────────────────────────────────────────────
//

#[async_trait]
impl AssessmentApi for InMemoryBackend {
    async fn start(&self, attempt_id: AttemptId) -> Result<AttemptPlan, ApiError> {
        let state = self.lock()?;
        let attempt = state
            .attempts
            .get(&attempt_id.value())
            .ok_or_else(session_not_found)?;
        Ok(AttemptPlan {
            total_questions: attempt.total_questions,
            duration_secs: attempt.duration_secs,
        })
    }

    async fn next_question(&self, attempt_id: AttemptId) -> Result<NextQuestion, ApiError> {
        let mut state = self.lock()?;
        let attempt = state
            .attempts
            .get_mut(&attempt_id.value())
            .ok_or_else(session_not_found)?;

        if attempt.completed || attempt.served >= attempt.total_questions {
            let report = attempt.finalize();
            return Ok(NextQuestion::Completed { report });
        }

        match attempt.queue.pop_front() {
            Some(scripted) => {
                attempt.served += 1;
                let number = attempt.served;
                let skill = SkillName::new(&scripted.skill)
                    .map_err(|e| ApiError::Payload(format!("bad scripted skill: {e}")))?;
                let question = Question {
                    id: None,
                    text: scripted.text.clone(),
                    options: scripted.options.clone(),
                    skill,
                    number,
                };
                let greeting = (number == 1).then(|| GREETING.to_string());
                attempt.current = Some(scripted);
                Ok(NextQuestion::Question { question, greeting })
            }
            None => Ok(NextQuestion::Unavailable {
                message: "No more questions available".to_string(),
            }),
        }
    }

    async fn submit_answer(
        &self,
        attempt_id: AttemptId,
        submission: &AnswerSubmission,
    ) -> Result<String, ApiError> {
        let mut state = self.lock()?;
        let attempt = state
            .attempts
            .get_mut(&attempt_id.value())
            .ok_or_else(session_not_found)?;
        if attempt.completed {
            return Err(ApiError::api(
                StatusCode::BAD_REQUEST,
                "Assessment already completed",
            ));
        }
        let Some(scripted) = attempt.current.take() else {
            return Err(ApiError::api(
                StatusCode::BAD_REQUEST,
                "No question is awaiting an answer",
            ));
        };

        let tally = attempt
            .tallies
            .entry(scripted.skill.clone())
            .or_insert_with(Tally::new);
        tally.attempted += 1;

        if submission.selected.index() == scripted.correct_option {
            tally.correct += 1;
            if tally.band < BANDS.len() - 1 {
                tally.band += 1;
            }
            Ok(CORRECT_FEEDBACK.to_string())
        } else {
            if tally.band > 0 {
                tally.band -= 1;
            }
            let correct_text = scripted
                .options
                .get((scripted.correct_option - 1) as usize)
                .cloned()
                .unwrap_or_default();
            Ok(format!("❌ Oops! The correct answer was: {correct_text}"))
        }
    }

    async fn end(&self, attempt_id: AttemptId) -> Result<CandidateReport, ApiError> {
        let mut state = self.lock()?;
        let attempt = state
            .attempts
            .get_mut(&attempt_id.value())
            .ok_or_else(session_not_found)?;
        Ok(attempt.finalize())
    }
}

//
// ─── AUTH ─────────────────────────────────────────────────────────────────────
//

#[async_trait]
impl AuthApi for InMemoryBackend {
    async fn signup(&self, signup: &Signup) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        if state.users.iter().any(|user| user.email == signup.email()) {
            return Err(ApiError::api(StatusCode::BAD_REQUEST, "User already exists"));
        }
        let id = state.allocate_id();
        state.users.push(MemoryUser {
            id,
            name: signup.name().to_string(),
            email: signup.email().to_string(),
            password: signup.password().to_string(),
            role: UserRole::Candidate,
        });
        state.profiles.insert(
            id,
            CandidateProfile {
                candidate_id: CandidateId::new(id),
                name: signup.name().to_string(),
                email: signup.email().to_string(),
                phone: None,
                location: None,
                linkedin: None,
                github: None,
                degree: None,
                years_of_experience: 0.0,
                is_complete: false,
            },
        );
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserRole, ApiError> {
        let mut state = self.lock()?;
        let found = state
            .users
            .iter()
            .find(|user| user.email == credentials.email() && user.password == credentials.password())
            .map(|user| (user.id, user.role));
        match found {
            Some((id, role)) => {
                state.session_user = Some(id);
                Ok(role)
            }
            None => Err(ApiError::api(StatusCode::UNAUTHORIZED, "Invalid credentials")),
        }
    }

    async fn check(&self) -> Result<AuthUser, ApiError> {
        let state = self.lock()?;
        let not_authed = || ApiError::api(StatusCode::UNAUTHORIZED, "Not authenticated");
        let id = state.session_user.ok_or_else(not_authed)?;
        let user = state
            .users
            .iter()
            .find(|user| user.id == id)
            .ok_or_else(not_authed)?;
        Ok(AuthUser {
            user_id: UserId::new(user.id),
            email: user.email.clone(),
            role: user.role,
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        state.session_user = None;
        Ok(())
    }
}

//
// ─── CANDIDATE ────────────────────────────────────────────────────────────────
//

#[async_trait]
impl CandidateApi for InMemoryBackend {
    async fn profile(&self, user_id: UserId) -> Result<CandidateProfile, ApiError> {
        let state = self.lock()?;
        state
            .profiles
            .get(&user_id.value())
            .cloned()
            .ok_or_else(|| ApiError::api(StatusCode::NOT_FOUND, "Candidate not found"))
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;

        for (other_id, other) in &state.profiles {
            if *other_id == user_id.value() {
                continue;
            }
            if update.phone.is_some() && update.phone == other.phone {
                return Err(ApiError::api(
                    StatusCode::BAD_REQUEST,
                    "This phone number is already in use.",
                ));
            }
            if update.linkedin.is_some() && update.linkedin == other.linkedin {
                return Err(ApiError::api(
                    StatusCode::BAD_REQUEST,
                    "This LinkedIn profile is already in use.",
                ));
            }
            if update.github.is_some() && update.github == other.github {
                return Err(ApiError::api(
                    StatusCode::BAD_REQUEST,
                    "This GitHub profile is already in use.",
                ));
            }
        }

        let profile = state
            .profiles
            .get_mut(&user_id.value())
            .ok_or_else(|| ApiError::api(StatusCode::NOT_FOUND, "Candidate not found"))?;
        profile.name = update.name.clone();
        profile.phone = update.phone.clone();
        profile.location = update.location.clone();
        profile.linkedin = update.linkedin.clone();
        profile.github = update.github.clone();
        profile.degree = update.degree.clone();
        profile.years_of_experience = update.years_of_experience;
        profile.is_complete = true;
        Ok(())
    }

    async fn eligible_assessments(&self, user_id: UserId) -> Result<Vec<JobPosting>, ApiError> {
        let state = self.lock()?;
        let profile = state
            .profiles
            .get(&user_id.value())
            .ok_or_else(|| ApiError::api(StatusCode::NOT_FOUND, "Candidate not found"))?;
        if !profile.is_complete {
            return Ok(Vec::new());
        }

        let years = profile.years_of_experience;
        let eligible = state
            .jobs
            .iter()
            .filter(|job| {
                let posting = &job.posting;
                let experience_ok =
                    posting.experience_min <= years && years <= posting.experience_max;
                let degree_ok = match (&posting.degree_required, &profile.degree) {
                    (None, _) => true,
                    (Some(required), Some(held)) => required.eq_ignore_ascii_case(held),
                    (Some(_), None) => false,
                };
                experience_ok && degree_ok
            })
            .map(|job| job.posting.clone())
            .collect();
        Ok(eligible)
    }

    async fn start_assessment(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<AttemptId, ApiError> {
        let mut state = self.lock()?;
        let (total_questions, duration_secs, script) = {
            let job = state
                .jobs
                .iter()
                .find(|job| job.posting.job_id == job_id)
                .ok_or_else(|| ApiError::api(StatusCode::NOT_FOUND, "Job not found"))?;
            (
                job.posting.num_questions,
                job.posting.duration_minutes * 60,
                demo_script(&job.skills, job.posting.num_questions),
            )
        };

        let mut tallies = BTreeMap::new();
        for question in &script {
            tallies.entry(question.skill.clone()).or_insert_with(Tally::new);
        }

        let id = state.allocate_id();
        state.attempts.insert(
            id,
            MemoryAttempt {
                candidate_id: candidate_id.value(),
                job_id: Some(job_id.value()),
                queue: script.into(),
                current: None,
                served: 0,
                total_questions,
                duration_secs,
                tallies,
                completed: false,
            },
        );
        Ok(AttemptId::new(id))
    }
}

//
// ─── RECRUITER ────────────────────────────────────────────────────────────────
//

#[async_trait]
impl RecruiterApi for InMemoryBackend {
    async fn assessments(&self, recruiter_id: UserId) -> Result<Vec<JobPosting>, ApiError> {
        let state = self.lock()?;
        Ok(state
            .jobs
            .iter()
            .filter(|job| job.recruiter_id == recruiter_id.value())
            .map(|job| job.posting.clone())
            .collect())
    }

    async fn create_assessment(
        &self,
        recruiter_id: UserId,
        posting: &NewJobPosting,
    ) -> Result<JobId, ApiError> {
        let mut state = self.lock()?;
        let id = state.allocate_id();
        state.jobs.push(StoredJob {
            recruiter_id: recruiter_id.value(),
            posting: JobPosting {
                job_id: JobId::new(id),
                title: posting.title.clone(),
                company: String::new(),
                experience_min: posting.experience_min,
                experience_max: posting.experience_max,
                degree_required: posting.degree_required.clone(),
                description: posting.description.clone(),
                schedule: posting.schedule,
                duration_minutes: posting.duration_minutes,
                num_questions: posting.num_questions,
            },
            skills: posting.skills.clone(),
        });
        Ok(JobId::new(id))
    }

    async fn ranked_candidates(&self, job_id: JobId) -> Result<CandidateRanking, ApiError> {
        let state = self.lock()?;
        let job = state
            .jobs
            .iter()
            .find(|job| job.posting.job_id == job_id)
            .ok_or_else(|| ApiError::api(StatusCode::NOT_FOUND, "Job not found"))?;
        let posting = &job.posting;

        let round2 = |value: f64| (value * 100.0).round() / 100.0;
        let midpoint = (posting.experience_min + posting.experience_max) / 2.0;
        let range = posting.experience_max - posting.experience_min;

        let mut candidates: Vec<RankedCandidate> = state
            .attempts
            .values()
            .filter(|attempt| attempt.completed && attempt.job_id == Some(job_id.value()))
            .filter_map(|attempt| {
                let profile = state.profiles.get(&attempt.candidate_id)?;
                let skill_score = round2(attempt.overall_accuracy() / 100.0);
                let experience_score = if range > 0.0 {
                    let diff = (profile.years_of_experience - midpoint).abs();
                    round2((1.0 - diff / (range / 2.0)).max(0.0))
                } else {
                    1.0
                };
                let total_score = round2(0.7 * skill_score + 0.3 * experience_score);
                Some(RankedCandidate {
                    rank: 0,
                    candidate_id: profile.candidate_id,
                    name: profile.name.clone(),
                    email: profile.email.clone(),
                    total_score,
                    skill_score,
                    experience_score,
                    description: format!(
                        "{} answered {:.0}% correctly with {} years of experience.",
                        profile.name,
                        attempt.overall_accuracy(),
                        profile.years_of_experience
                    ),
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        for (index, candidate) in candidates.iter_mut().enumerate() {
            candidate.rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
        }

        Ok(CandidateRanking {
            job_id,
            job_title: posting.title.clone(),
            candidates,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::{ProfileDraft, SelectedOption};

    fn two_question_script() -> Vec<ScriptedQuestion> {
        vec![
            ScriptedQuestion {
                skill: "sql".to_string(),
                text: "What does SELECT do?".to_string(),
                options: vec!["Reads rows".to_string(), "Drops tables".to_string()],
                correct_option: 1,
            },
            ScriptedQuestion {
                skill: "python".to_string(),
                text: "What is a dict?".to_string(),
                options: vec!["A list".to_string(), "A mapping".to_string()],
                correct_option: 2,
            },
        ]
    }

    fn submission(skill: &str, option: u32) -> AnswerSubmission {
        AnswerSubmission::new(
            SkillName::new(skill).unwrap(),
            SelectedOption::new(option).unwrap(),
            5,
        )
    }

    #[tokio::test]
    async fn scripted_attempt_runs_to_completion() {
        let backend = InMemoryBackend::new();
        let attempt = backend.stage_attempt(300, two_question_script()).unwrap();

        let plan = backend.start(attempt).await.unwrap();
        assert_eq!(plan.total_questions, 2);
        assert_eq!(plan.duration_secs, 300);

        // first question carries the greeting
        let NextQuestion::Question { question, greeting } =
            backend.next_question(attempt).await.unwrap()
        else {
            panic!("expected first question");
        };
        assert_eq!(question.number, 1);
        assert_eq!(question.skill.as_str(), "sql");
        assert!(greeting.is_some());

        let feedback = backend
            .submit_answer(attempt, &submission("sql", 1))
            .await
            .unwrap();
        assert_eq!(feedback, CORRECT_FEEDBACK);

        let NextQuestion::Question { question, greeting } =
            backend.next_question(attempt).await.unwrap()
        else {
            panic!("expected second question");
        };
        assert_eq!(question.number, 2);
        assert!(greeting.is_none());

        let feedback = backend
            .submit_answer(attempt, &submission("python", 1))
            .await
            .unwrap();
        assert_eq!(feedback, "❌ Oops! The correct answer was: A mapping");

        let NextQuestion::Completed { report } = backend.next_question(attempt).await.unwrap()
        else {
            panic!("expected completion");
        };
        let sql = report.get("sql").unwrap();
        assert_eq!(sql.questions_attempted, 1);
        assert_eq!(sql.correct_answers, 1);
        assert_eq!(sql.final_band, "perfect");
        let python = report.get("python").unwrap();
        assert_eq!(python.correct_answers, 0);
        assert_eq!(python.final_band, "good");
    }

    #[tokio::test]
    async fn end_returns_partial_report_and_completes() {
        let backend = InMemoryBackend::new();
        let attempt = backend.stage_attempt(300, two_question_script()).unwrap();
        backend.start(attempt).await.unwrap();
        backend.next_question(attempt).await.unwrap();
        backend
            .submit_answer(attempt, &submission("sql", 1))
            .await
            .unwrap();

        let report = backend.end(attempt).await.unwrap();
        assert_eq!(report.get("sql").unwrap().questions_attempted, 1);
        // the untouched skill still appears, zeroed
        assert_eq!(report.get("python").unwrap().questions_attempted, 0);

        // completed attempts refuse further answers
        let err = backend
            .submit_answer(attempt, &submission("sql", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Api { status, .. } if status == StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn unknown_attempt_is_not_found() {
        let backend = InMemoryBackend::new();
        let err = backend.start(AttemptId::new(999)).await.unwrap_err();
        assert!(matches!(err, ApiError::Api { status, .. } if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn auth_flow_round_trips() {
        let backend = InMemoryBackend::with_demo_data();

        let err = backend.check().await.unwrap_err();
        assert!(
            matches!(err, ApiError::Api { status, .. } if status == StatusCode::UNAUTHORIZED)
        );

        let creds = Credentials::new("candidate@example.com", "password").unwrap();
        let role = backend.login(&creds).await.unwrap();
        assert_eq!(role, UserRole::Candidate);

        let user = backend.check().await.unwrap();
        assert_eq!(user.email, "candidate@example.com");

        backend.logout().await.unwrap();
        assert!(backend.check().await.is_err());
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let backend = InMemoryBackend::with_demo_data();
        let signup = Signup::new("Another", "candidate@example.com", "pw").unwrap();
        let err = backend.signup(&signup).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { message, .. } if message == "User already exists"
        ));
    }

    #[tokio::test]
    async fn eligibility_waits_for_profile_completion() {
        let backend = InMemoryBackend::with_demo_data();
        let signup = Signup::new("Neha Kulkarni", "neha@example.com", "pw").unwrap();
        backend.signup(&signup).await.unwrap();
        backend
            .login(&Credentials::new("neha@example.com", "pw").unwrap())
            .await
            .unwrap();
        let user = backend.check().await.unwrap();

        assert!(backend.eligible_assessments(user.user_id).await.unwrap().is_empty());

        let update = ProfileDraft {
            name: "Neha Kulkarni".to_string(),
            phone: "+91 90000 11111".to_string(),
            location: "Mumbai".to_string(),
            linkedin: String::new(),
            github: String::new(),
            degree: "B.Tech".to_string(),
            years_of_experience: "2".to_string(),
        }
        .validate()
        .unwrap();
        backend.update_profile(user.user_id, &update).await.unwrap();

        let eligible = backend.eligible_assessments(user.user_id).await.unwrap();
        assert!(
            eligible.iter().any(|job| job.title == "Backend Engineer Screen"),
            "expected the backend screen among {eligible:?}"
        );
    }

    #[tokio::test]
    async fn demo_leaderboard_ranks_finished_attempt() {
        let backend = InMemoryBackend::with_demo_data();
        let recruiter = {
            backend
                .login(&Credentials::new("recruiter@example.com", "password").unwrap())
                .await
                .unwrap();
            backend.check().await.unwrap()
        };
        let jobs = backend.assessments(recruiter.user_id).await.unwrap();
        let backend_job = jobs
            .iter()
            .find(|job| job.title == "Backend Engineer Screen")
            .unwrap();

        let ranking = backend.ranked_candidates(backend_job.job_id).await.unwrap();
        assert_eq!(ranking.candidates.len(), 1);
        let top = &ranking.candidates[0];
        assert_eq!(top.rank, 1);
        assert_eq!(top.name, "Vikram Shah");
        assert!(top.total_score > 0.0);
    }

    #[tokio::test]
    async fn started_job_attempt_serves_scripted_questions() {
        let backend = InMemoryBackend::with_demo_data();
        backend
            .login(&Credentials::new("candidate@example.com", "password").unwrap())
            .await
            .unwrap();
        let user = backend.check().await.unwrap();
        let profile = backend.profile(user.user_id).await.unwrap();
        let jobs = backend.eligible_assessments(user.user_id).await.unwrap();
        let job = jobs
            .iter()
            .find(|job| job.title == "Backend Engineer Screen")
            .unwrap();

        let attempt = backend
            .start_assessment(profile.candidate_id, job.job_id)
            .await
            .unwrap();
        let plan = backend.start(attempt).await.unwrap();
        assert_eq!(plan.total_questions, job.num_questions);
        assert_eq!(plan.duration_secs, job.duration_minutes * 60);

        let NextQuestion::Question { question, .. } =
            backend.next_question(attempt).await.unwrap()
        else {
            panic!("expected a question");
        };
        assert!(!question.options.is_empty());
    }
}
