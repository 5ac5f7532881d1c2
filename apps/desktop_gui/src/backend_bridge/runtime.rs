//! Runtime bridge between UI command queue and the form controller.

use std::{sync::Arc, thread};

use client_core::{FormController, SubmitOutcome};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread that owns the tokio runtime.
///
/// Commands are handled one at a time. The thread exits once every
/// command sender has been dropped.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    controller: Arc<FormController>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit { form } => {
                        let outcome = controller.submit(&form).await;
                        log_outcome(&outcome);
                    }
                }
            }
            tracing::debug!("ui command queue closed; backend worker stopping");
        });
    })
}

fn log_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Predicted { .. } => tracing::debug!("submission finished"),
        SubmitOutcome::AlreadyInFlight => {
            tracing::warn!("submission dropped: another prediction is in flight")
        }
        other => tracing::debug!(error = ?other.error_message(), "submission finished with error"),
    }
}
