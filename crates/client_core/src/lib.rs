//! Client side of the expected-CTC prediction service.

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod format;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use controller::{
    interpret_response, ControllerPhase, FormController, PredictionView, SubmitControl,
    SubmitOutcome, GENERIC_PREDICTION_ERROR, NETWORK_ERROR, SUBMITTING_LABEL, SUBMIT_LABEL,
};
pub use error::TransportError;
pub use form::{clamp_to_bounds, parse_request, CoercionPolicy, FormSnapshot};
pub use format::format_inr;
pub use transport::{HttpPredictionEndpoint, PredictionEndpoint};

use std::sync::Arc;

/// Controller talking HTTP to the endpoint described by `settings`.
pub fn http_controller(
    settings: &ClientSettings,
    view: Arc<dyn PredictionView>,
) -> Result<FormController, TransportError> {
    let endpoint = HttpPredictionEndpoint::from_settings(settings)?;
    Ok(FormController::new(Arc::new(endpoint), view).with_policy(settings.coercion_policy))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;
