//! UI events emitted by the form controller and the backend worker.

use client_core::{PredictionView, SubmitControl};
use crossbeam_channel::{Sender, TrySendError};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    MessagesCleared,
    SubmitControlChanged(SubmitControl),
    ResultShown(String),
    ResultRevealed,
    ErrorShown(String),
    BackendFailed(String),
}

/// [`PredictionView`] that forwards every update to the UI thread.
pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }

    fn emit(&self, event: UiEvent) {
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "ui event queue is full; dropping update")
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event receiver gone; window closed")
            }
        }
    }
}

impl PredictionView for ChannelView {
    fn clear_messages(&self) {
        self.emit(UiEvent::MessagesCleared);
    }

    fn set_submit_control(&self, control: SubmitControl) {
        self.emit(UiEvent::SubmitControlChanged(control));
    }

    fn show_result(&self, formatted_salary: &str) {
        self.emit(UiEvent::ResultShown(formatted_salary.to_string()));
    }

    fn reveal_result(&self) {
        self.emit(UiEvent::ResultRevealed);
    }

    fn show_error(&self, message: &str) {
        self.emit(UiEvent::ErrorShown(message.to_string()));
    }
}
