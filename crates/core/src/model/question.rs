use thiserror::Error;

use crate::model::skill::SkillName;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while building an answer submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("invalid option index: {0}")]
    InvalidOption(u32),
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question as served by the backend.
///
/// There is at most one current question per attempt; a new one replaces
/// the previous wholesale and is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Backend identifier, when the backend sends one. Never echoed back;
    /// answers are addressed by skill and option position instead.
    pub id: Option<u64>,
    pub text: String,
    pub options: Vec<String>,
    pub skill: SkillName,
    pub number: u32,
}

impl Question {
    #[must_use]
    pub fn new(text: impl Into<String>, options: Vec<String>, skill: SkillName, number: u32) -> Self {
        Self {
            id: None,
            text: text.into(),
            options,
            skill,
            number,
        }
    }

    /// True when there is nothing to choose from. The answer form stays
    /// disabled for such questions; only ending the session moves on.
    #[must_use]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

//
// ─── SELECTED OPTION ──────────────────────────────────────────────────────────
//

/// One-based index into a question's options list.
///
/// The backend resolves answers positionally, so the selection travels as
/// the index (one-based), not the option text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedOption(u32);

impl SelectedOption {
    /// Wraps a one-based option index.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::InvalidOption` for index zero.
    pub fn new(index: u32) -> Result<Self, AnswerError> {
        if index == 0 {
            return Err(AnswerError::InvalidOption(index));
        }
        Ok(Self(index))
    }

    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

//
// ─── ANSWER SUBMISSION ────────────────────────────────────────────────────────
//

/// Ephemeral payload for one answer: constructed, sent, not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub skill: SkillName,
    pub selected: SelectedOption,
    /// Seconds between the question being shown and the submission.
    pub seconds_taken: i64,
}

impl AnswerSubmission {
    #[must_use]
    pub fn new(skill: SkillName, selected: SelectedOption, seconds_taken: i64) -> Self {
        Self {
            skill,
            selected,
            seconds_taken: seconds_taken.max(0),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
