//! Applies [`UiEvent`]s to what the window shows below the form.

use client_core::SubmitControl;

use crate::controller::events::UiEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub result: Option<String>,
    pub error: Option<String>,
    pub submit: SubmitControl,
    /// Set once per shown result; the next frame scrolls to it and clears it.
    pub scroll_to_result: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            result: None,
            error: None,
            submit: SubmitControl::idle(),
            scroll_to_result: false,
        }
    }
}

impl PanelState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::MessagesCleared => {
                self.result = None;
                self.error = None;
                self.scroll_to_result = false;
            }
            UiEvent::SubmitControlChanged(control) => self.submit = control,
            UiEvent::ResultShown(formatted_salary) => {
                self.error = None;
                self.result = Some(formatted_salary);
            }
            UiEvent::ResultRevealed => self.scroll_to_result = self.result.is_some(),
            UiEvent::ErrorShown(message) => {
                self.result = None;
                self.error = Some(message);
            }
            UiEvent::BackendFailed(message) => {
                self.error = Some(message);
                self.submit = SubmitControl::idle();
            }
        }
    }

    /// Marks the form as submitting before the worker picks the command up.
    pub fn begin_submit(&mut self) {
        self.submit = SubmitControl::busy();
    }

    /// Undoes [`PanelState::begin_submit`] when the command never reached the worker.
    pub fn submit_not_queued(&mut self, message: String) {
        self.submit = SubmitControl::idle();
        self.error = Some(message);
    }
}
