use std::sync::Arc;
use std::time::Duration;

use assess_core::model::{SelectedOption, TickOutcome};
use services::{AttemptController, AttemptView};

/// What the attempt screen can ask for. `Select` is handled locally;
/// everything else goes through the controller and hits the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptIntent {
    Start,
    Select(u32),
    Submit,
    FetchNext,
    End,
}

/// Screen-side wrapper around one attempt: a shared controller handle
/// plus the candidate's pending option selection, which is purely local
/// until submit.
pub struct AttemptVm {
    controller: Arc<AttemptController>,
    selected: Option<SelectedOption>,
}

impl AttemptVm {
    #[must_use]
    pub fn new(controller: AttemptController) -> Self {
        Self {
            controller: Arc::new(controller),
            selected: None,
        }
    }

    /// Handle for backend-facing calls. Cloning it out before an await
    /// means nothing borrows the screen's state while the call runs, so
    /// the tick loop keeps draining the countdown in the meantime.
    #[must_use]
    pub fn handle(&self) -> Arc<AttemptController> {
        self.controller.clone()
    }

    /// Records a one-based option choice. Index zero is not a valid
    /// radio value and is ignored.
    pub fn select(&mut self, index: u32) {
        if let Ok(option) = SelectedOption::new(index) {
            self.selected = Some(option);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<SelectedOption> {
        self.selected
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<u32> {
        self.selected.map(SelectedOption::index)
    }

    pub fn tick(&self) -> TickOutcome {
        self.controller.tick()
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.controller.advance_delay()
    }

    #[must_use]
    pub fn snapshot(&self) -> AttemptView {
        self.controller.view()
    }
}
