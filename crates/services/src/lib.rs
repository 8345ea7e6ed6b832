#![forbid(unsafe_code)]

pub mod app_services;
pub mod attempt;
pub mod auth_service;
pub mod candidate_service;
pub mod error;
pub mod recruiter_service;

pub use assess_core::Clock;

pub use app_services::AppServices;
pub use attempt::{AttemptConfig, AttemptController, AttemptView};
pub use auth_service::AuthService;
pub use candidate_service::CandidateService;
pub use error::{AttemptError, AuthServiceError, CandidateError, RecruiterError};
pub use recruiter_service::{AssessmentBoard, RecruiterService};
