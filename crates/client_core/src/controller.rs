//! Form submission controller: form snapshot in, one prediction call, view updates out.
//!
//! Lifecycle of a submission is *idle -> submitting -> (success | error) -> idle*.
//! The submit control is disabled for the whole submitting phase and is
//! restored on every exit path, including the submission future being dropped.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::{domain::field_spec, error::ValidationError, protocol::PredictionResponse};
use tracing::{debug, error, info, warn};

use crate::{
    form::{clamp_to_bounds, parse_request, CoercionPolicy, FormSnapshot},
    format::format_inr,
    transport::PredictionEndpoint,
};

pub const SUBMIT_LABEL: &str = "Predict Expected CTC";
pub const SUBMITTING_LABEL: &str = "Predicting...";
pub const GENERIC_PREDICTION_ERROR: &str = "An error occurred during prediction.";
pub const NETWORK_ERROR: &str = "Network error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitControl {
    pub const fn idle() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL,
        }
    }

    pub const fn busy() -> Self {
        Self {
            enabled: false,
            label: SUBMITTING_LABEL,
        }
    }
}

/// Everything the controller needs from the surface showing the form.
pub trait PredictionView: Send + Sync {
    /// Hide both the result and the error region.
    fn clear_messages(&self);
    fn set_submit_control(&self, control: SubmitControl);
    fn show_result(&self, formatted_salary: &str);
    /// Bring the result region into view after [`PredictionView::show_result`].
    fn reveal_result(&self) {}
    fn show_error(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Predicted { formatted_salary: String },
    /// The endpoint answered but reported a failure.
    Rejected { message: String },
    /// The form did not coerce; nothing was sent.
    Invalid(ValidationError),
    NetworkError,
    /// Another submission is still in flight; the view was not touched.
    AlreadyInFlight,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Predicted { .. })
    }

    /// Text shown in the error region for this outcome, if any.
    pub fn error_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Rejected { message } => Some(message.clone()),
            SubmitOutcome::Invalid(err) => Some(err.to_string()),
            SubmitOutcome::NetworkError => Some(NETWORK_ERROR.to_string()),
            SubmitOutcome::Predicted { .. } | SubmitOutcome::AlreadyInFlight => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Idle,
    Submitting,
}

pub struct FormController {
    endpoint: Arc<dyn PredictionEndpoint>,
    view: Arc<dyn PredictionView>,
    policy: CoercionPolicy,
    in_flight: AtomicBool,
}

impl FormController {
    pub fn new(endpoint: Arc<dyn PredictionEndpoint>, view: Arc<dyn PredictionView>) -> Self {
        Self {
            endpoint,
            view,
            policy: CoercionPolicy::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    pub fn phase(&self) -> ControllerPhase {
        if self.in_flight.load(Ordering::Acquire) {
            ControllerPhase::Submitting
        } else {
            ControllerPhase::Idle
        }
    }

    /// Handles a form submit.
    ///
    /// Pre: none. A call made while another submission is in flight returns
    /// [`SubmitOutcome::AlreadyInFlight`] and leaves the view alone.
    /// Post: exactly one of result/error is shown (none for `AlreadyInFlight`)
    /// and the submit control is back to [`SubmitControl::idle`].
    pub async fn submit(&self, form: &FormSnapshot) -> SubmitOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submit ignored while a prediction is in flight");
            return SubmitOutcome::AlreadyInFlight;
        }
        let _guard = InFlightGuard { controller: self };

        self.view.clear_messages();
        self.view.set_submit_control(SubmitControl::busy());

        let outcome = self.run_submission(form).await;
        self.render(&outcome);
        outcome
    }

    async fn run_submission(&self, form: &FormSnapshot) -> SubmitOutcome {
        let request = match parse_request(form, self.policy) {
            Ok(request) => request,
            Err(err) => {
                warn!(field = %err.field, "form rejected before submission: {err}");
                return SubmitOutcome::Invalid(err);
            }
        };
        if !request.is_fully_numeric() {
            warn!("sending request with null numeric fields");
        }

        match self.endpoint.predict(&request).await {
            Ok(response) => interpret_response(response),
            Err(err) => {
                error!("prediction request failed: {err}");
                SubmitOutcome::NetworkError
            }
        }
    }

    fn render(&self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Predicted { formatted_salary } => {
                info!(salary = %formatted_salary, "prediction received");
                self.view.show_result(formatted_salary);
                self.view.reveal_result();
            }
            SubmitOutcome::AlreadyInFlight => {}
            other => {
                if let Some(message) = other.error_message() {
                    self.view.show_error(&message);
                }
            }
        }
    }

    /// Handles a numeric input losing focus.
    ///
    /// Returns the value the input must be rewritten to, or `None` to leave
    /// it as typed. Fields without declared bounds are never rewritten.
    pub fn on_numeric_blur(&self, field: &str, raw: &str) -> Option<String> {
        let bounds = field_spec(field)?.kind.bounds()?;
        let clamped = clamp_to_bounds(raw, bounds)?;
        debug!(field, from = raw, to = %clamped, "numeric input clamped to bounds");
        Some(clamped)
    }

    /// Education selector change hook; observational only.
    pub fn on_education_changed(&self, education: &str) {
        info!(education, "education level changed");
    }
}

struct InFlightGuard<'a> {
    controller: &'a FormController,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.controller
            .view
            .set_submit_control(SubmitControl::idle());
        self.controller.in_flight.store(false, Ordering::Release);
    }
}

/// Maps a completed response onto what the user should see.
pub fn interpret_response(response: PredictionResponse) -> SubmitOutcome {
    if response.success {
        let formatted = response
            .formatted_salary
            .or_else(|| response.predicted_salary.and_then(format_inr));
        return match formatted {
            Some(formatted_salary) => SubmitOutcome::Predicted { formatted_salary },
            None => SubmitOutcome::Rejected {
                message: GENERIC_PREDICTION_ERROR.to_string(),
            },
        };
    }

    let message = response
        .error
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_PREDICTION_ERROR.to_string());
    SubmitOutcome::Rejected { message }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
