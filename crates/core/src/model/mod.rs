pub mod attempt;
pub mod auth;
mod ids;
pub mod job;
pub mod profile;
pub mod question;
pub mod ranking;
pub mod report;
pub mod skill;

pub use ids::{AttemptId, CandidateId, JobId, ParseIdError, UserId};

pub use attempt::{AttemptOp, AttemptPhase, AttemptSession, AttemptStateError, TickOutcome};
pub use auth::{AuthError, AuthUser, Credentials, Signup, UserRole};
pub use job::{JobDraft, JobError, JobPosting, NewJobPosting};
pub use profile::{CandidateProfile, ProfileDraft, ProfileError, ProfileUpdate};
pub use question::{AnswerError, AnswerSubmission, Question, SelectedOption};
pub use ranking::{CandidateRanking, RankedCandidate};
pub use report::{CandidateReport, OverallAccuracy, SkillReport};
pub use skill::{SkillError, SkillName, SkillPriority, SkillRequirement};
