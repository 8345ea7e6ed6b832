//! Shared error types for the services crate.

use chrono::{DateTime, Utc};
use thiserror::Error;

use api::ApiError;
use assess_core::model::{AttemptStateError, AuthError, JobError, ProfileError};

/// Errors emitted by `AttemptController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptError {
    /// Guard refusal from the session machine. No side effects happened;
    /// background drivers (timer, auto-advance) skip these silently.
    #[error(transparent)]
    State(#[from] AttemptStateError),
    #[error("select an answer before submitting")]
    NoSelection,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AttemptError {
    /// True for guard refusals that left the controller untouched.
    #[must_use]
    pub fn is_refusal(&self) -> bool {
        matches!(self, Self::State(_))
    }
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthServiceError {
    #[error(transparent)]
    Validation(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `CandidateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CandidateError {
    #[error(transparent)]
    Validation(#[from] ProfileError),
    #[error("this assessment opens at {opens_at}")]
    NotOpenYet { opens_at: DateTime<Utc> },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `RecruiterService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecruiterError {
    #[error(transparent)]
    Validation(#[from] JobError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
