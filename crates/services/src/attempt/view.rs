use assess_core::model::{AttemptPhase, CandidateReport, Question};

/// Presentation-agnostic snapshot of one attempt for rendering.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings beyond what the backend sent verbatim
/// - no layout assumptions
///
/// The UI formats the countdown, the progress line and the report table
/// however it likes.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptView {
    pub phase: AttemptPhase,
    pub total_questions: u32,
    pub seconds_remaining: u32,
    pub question: Option<Question>,
    /// Backend welcome line that rides along with the first question.
    pub greeting: Option<String>,
    /// Feedback for the most recently submitted answer, shown until the
    /// next question replaces it.
    pub feedback: Option<String>,
    /// Backend explanation for a 2xx next-question response that carried
    /// neither a question nor a report.
    pub notice: Option<String>,
    /// Message for the most recent failure, cleared by retry or progress.
    pub error: Option<String>,
    pub report: Option<CandidateReport>,
    /// True while any backend call is outstanding.
    pub busy: bool,
}

impl AttemptView {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == AttemptPhase::Completed
    }
}
