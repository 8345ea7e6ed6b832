use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::question::Question;
use crate::model::report::CandidateReport;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a requested operation is refused by the session machine.
///
/// These are guard refusals, not transport failures: the caller decides
/// whether to surface them or treat them as a silent skip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptStateError {
    #[error("the {0} call is still in flight")]
    Busy(AttemptOp),
    #[error("the attempt is already complete")]
    Completed,
    #[error("the attempt has already been started")]
    AlreadyStarted,
    #[error("the attempt has not been started yet")]
    NotStarted,
    #[error("no question is currently shown")]
    NoQuestion,
}

//
// ─── OPERATIONS ───────────────────────────────────────────────────────────────
//

/// Backend calls the session can have in flight, at most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOp {
    Start,
    FetchQuestion,
    SubmitAnswer,
    End,
}

impl fmt::Display for AttemptOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::FetchQuestion => "next-question",
            Self::SubmitAnswer => "submit-answer",
            Self::End => "end",
        };
        write!(f, "{name}")
    }
}

//
// ─── PHASE ────────────────────────────────────────────────────────────────────
//

/// Where the session currently is, derived from the machine's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    NotStarted,
    Starting,
    AwaitingQuestion,
    QuestionShown,
    Submitting,
    AwaitingNext,
    Completed,
}

//
// ─── TICK ─────────────────────────────────────────────────────────────────────
//

/// What a one-second tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running (not started, already complete, or expiry
    /// was already raised).
    Idle,
    /// Timer counted down; the new remaining value is reported.
    Running { seconds_remaining: u32 },
    /// The countdown just hit zero with no call in flight. Raised at
    /// most once per attempt; the caller must end the session now.
    Expired,
}

//
// ─── SESSION MACHINE ──────────────────────────────────────────────────────────
//

/// Pure state machine for one assessment attempt.
///
/// Owns no I/O. Callers `begin` an operation (which locks the machine),
/// perform the backend call themselves, then report back with exactly one
/// of `abort` or the matching `finish_*`. Every guard lives here so the
/// surrounding async plumbing stays trivially simple.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptSession {
    started: bool,
    completed: bool,
    total_questions: u32,
    seconds_remaining: u32,
    question: Option<Question>,
    question_shown_at: Option<DateTime<Utc>>,
    report: Option<CandidateReport>,
    in_flight: Option<AttemptOp>,
    expiry_fired: bool,
}

impl Default for AttemptSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AttemptSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: false,
            completed: false,
            total_questions: 0,
            seconds_remaining: 0,
            question: None,
            question_shown_at: None,
            report: None,
            in_flight: None,
            expiry_fired: false,
        }
    }

    /// Locks the machine for `op`.
    ///
    /// At most one operation may be in flight; everything else is refused
    /// until `abort` or a `finish_*` releases the lock.
    ///
    /// # Errors
    ///
    /// - `Busy` while another call is in flight
    /// - `Completed` once the attempt has finished
    /// - `AlreadyStarted` for a second start
    /// - `NotStarted` for any other operation before the start settles
    /// - `NoQuestion` for a submit with no question on screen
    pub fn begin(&mut self, op: AttemptOp) -> Result<(), AttemptStateError> {
        if let Some(current) = self.in_flight {
            return Err(AttemptStateError::Busy(current));
        }
        if self.completed {
            return Err(AttemptStateError::Completed);
        }
        match op {
            AttemptOp::Start => {
                if self.started {
                    return Err(AttemptStateError::AlreadyStarted);
                }
            }
            AttemptOp::FetchQuestion | AttemptOp::End => {
                if !self.started {
                    return Err(AttemptStateError::NotStarted);
                }
            }
            AttemptOp::SubmitAnswer => {
                if !self.started {
                    return Err(AttemptStateError::NotStarted);
                }
                if self.question.is_none() {
                    return Err(AttemptStateError::NoQuestion);
                }
            }
        }
        self.in_flight = Some(op);
        Ok(())
    }

    /// Releases the in-flight lock after a failed call.
    ///
    /// Nothing else changes: a failed submit keeps the current question
    /// and its shown-at instant so the candidate can resubmit.
    pub fn abort(&mut self) {
        self.in_flight = None;
    }

    /// Applies a successful start: totals arrive, countdown is armed.
    pub fn finish_start(&mut self, total_questions: u32, duration_secs: u32) {
        self.started = true;
        self.total_questions = total_questions;
        self.seconds_remaining = duration_secs;
        self.in_flight = None;
    }

    /// Applies a fetched question, replacing any previous one wholesale.
    pub fn finish_question(&mut self, question: Question, shown_at: DateTime<Utc>) {
        self.question = Some(question);
        self.question_shown_at = Some(shown_at);
        self.in_flight = None;
    }

    /// Applies a successful submit: the answered question is consumed.
    pub fn finish_submit(&mut self) {
        self.question = None;
        self.question_shown_at = None;
        self.in_flight = None;
    }

    /// Applies a completion payload, from either the next-question call
    /// or an explicit end. Stops the countdown for good.
    pub fn finish_report(&mut self, report: CandidateReport) {
        self.completed = true;
        self.report = Some(report);
        self.question = None;
        self.question_shown_at = None;
        self.in_flight = None;
    }

    /// Advances the countdown by one second.
    ///
    /// Once the counter reaches zero this yields `Expired` exactly once,
    /// and only while no call is in flight; with a call pending it keeps
    /// reporting `Running { seconds_remaining: 0 }` so the expiry fires
    /// after the call settles instead of racing it.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.started || self.completed {
            return TickOutcome::Idle;
        }
        if self.seconds_remaining > 0 {
            self.seconds_remaining -= 1;
        }
        if self.seconds_remaining > 0 {
            return TickOutcome::Running {
                seconds_remaining: self.seconds_remaining,
            };
        }
        if self.expiry_fired {
            return TickOutcome::Idle;
        }
        if self.in_flight.is_some() {
            return TickOutcome::Running {
                seconds_remaining: 0,
            };
        }
        self.expiry_fired = true;
        TickOutcome::Expired
    }

    /// Whole seconds since the current question appeared, if one is shown.
    ///
    /// Clamped at zero so clock skew never produces a negative duration.
    #[must_use]
    pub fn elapsed_since_shown(&self, now: DateTime<Utc>) -> Option<i64> {
        self.question_shown_at
            .map(|shown| (now - shown).num_seconds().max(0))
    }

    #[must_use]
    pub fn phase(&self) -> AttemptPhase {
        if self.completed {
            return AttemptPhase::Completed;
        }
        match self.in_flight {
            Some(AttemptOp::Start) => AttemptPhase::Starting,
            Some(AttemptOp::FetchQuestion) => AttemptPhase::AwaitingQuestion,
            Some(AttemptOp::SubmitAnswer) => AttemptPhase::Submitting,
            Some(AttemptOp::End) | None => {
                if !self.started {
                    AttemptPhase::NotStarted
                } else if self.question.is_some() {
                    AttemptPhase::QuestionShown
                } else {
                    AttemptPhase::AwaitingNext
                }
            }
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn report(&self) -> Option<&CandidateReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<AttemptOp> {
        self.in_flight
    }

    /// True after the countdown has raised its one `Expired` outcome.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.expiry_fired
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
