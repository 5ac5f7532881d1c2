use super::*;

use std::sync::Mutex as StdMutex;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use shared::domain::{
    CERTIFICATIONS, CURRENT_CTC, EDUCATION, INTERNATIONAL_DEGREE_ANY, NO_OF_COMPANIES_WORKED,
    NUMBER_OF_PUBLICATIONS, PASSING_YEAR_OF_GRADUATION, PASSING_YEAR_OF_PG, PASSING_YEAR_OF_PHD,
    TOTAL_EXPERIENCE, TOTAL_EXPERIENCE_IN_FIELD,
};
use tokio::net::TcpListener;

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: &'static str,
    received: Arc<StdMutex<Vec<(Option<String>, Value)>>>,
}

async fn handle_predict(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let payload = serde_json::from_str(&body).unwrap_or(Value::Null);
    state
        .received
        .lock()
        .expect("received lock")
        .push((content_type, payload));
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

async fn spawn_prediction_server(
    status: StatusCode,
    body: &'static str,
) -> anyhow::Result<(String, Arc<StdMutex<Vec<(Option<String>, Value)>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(StdMutex::new(Vec::new()));
    let state = ServerState {
        status,
        body,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/predict", post(handle_predict))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), received))
}

fn complete_form() -> FormSnapshot {
    FormSnapshot::new()
        .with(TOTAL_EXPERIENCE, "10")
        .with(TOTAL_EXPERIENCE_IN_FIELD, "7.5")
        .with(CURRENT_CTC, "1800000")
        .with(NO_OF_COMPANIES_WORKED, "4")
        .with(PASSING_YEAR_OF_GRADUATION, "2012")
        .with(NUMBER_OF_PUBLICATIONS, "3")
        .with(CERTIFICATIONS, "2")
        .with(INTERNATIONAL_DEGREE_ANY, "0")
        .with(EDUCATION, "Doctorate")
        .with(PASSING_YEAR_OF_PHD, "2019")
        .with("Industry", "Analytics")
}

#[derive(Default)]
struct LastMessage {
    result: StdMutex<Option<String>>,
    error: StdMutex<Option<String>>,
    control: StdMutex<Option<SubmitControl>>,
}

impl PredictionView for LastMessage {
    fn clear_messages(&self) {
        *self.result.lock().expect("lock") = None;
        *self.error.lock().expect("lock") = None;
    }

    fn set_submit_control(&self, control: SubmitControl) {
        *self.control.lock().expect("lock") = Some(control);
    }

    fn show_result(&self, formatted_salary: &str) {
        *self.result.lock().expect("lock") = Some(formatted_salary.to_string());
    }

    fn show_error(&self, message: &str) {
        *self.error.lock().expect("lock") = Some(message.to_string());
    }
}

#[tokio::test]
async fn posts_json_body_with_numeric_fields() {
    let (server_url, received) = spawn_prediction_server(
        StatusCode::OK,
        r#"{"predicted_salary": 2500000.0, "formatted_salary": "₹2,500,000.00", "success": true}"#,
    )
    .await
    .expect("spawn server");
    let endpoint = HttpPredictionEndpoint::new(&server_url).expect("endpoint");
    let request = parse_request(&complete_form(), CoercionPolicy::Reject).expect("request");

    let response = endpoint.predict(&request).await.expect("predict");
    assert!(response.success);
    assert_eq!(response.formatted_salary.as_deref(), Some("₹2,500,000.00"));

    let received = received.lock().expect("received lock");
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body[TOTAL_EXPERIENCE], serde_json::json!(10.0));
    assert_eq!(body[TOTAL_EXPERIENCE_IN_FIELD], serde_json::json!(7.5));
    assert!(body[CURRENT_CTC].is_number());
    assert!(body[NO_OF_COMPANIES_WORKED].is_i64());
    assert!(body[CERTIFICATIONS].is_i64());
    assert_eq!(body[PASSING_YEAR_OF_PG], serde_json::json!(""));
    assert_eq!(body[PASSING_YEAR_OF_PHD], serde_json::json!("2019"));
    assert_eq!(body[EDUCATION], serde_json::json!("Doctorate"));
    assert_eq!(body["Industry"], serde_json::json!("Analytics"));
}

#[tokio::test]
async fn error_status_body_is_still_parsed() {
    let (server_url, _received) = spawn_prediction_server(
        StatusCode::BAD_REQUEST,
        r#"{"error": "Invalid graduation year", "success": false}"#,
    )
    .await
    .expect("spawn server");
    let endpoint = HttpPredictionEndpoint::new(&server_url).expect("endpoint");
    let request = parse_request(&complete_form(), CoercionPolicy::Reject).expect("request");

    let response = endpoint.predict(&request).await.expect("predict");
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Invalid graduation year"));
}

#[tokio::test]
async fn non_json_body_is_a_transport_failure() {
    let (server_url, _received) = spawn_prediction_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        "<h1>Internal Server Error</h1>",
    )
    .await
    .expect("spawn server");
    let endpoint = HttpPredictionEndpoint::new(&server_url).expect("endpoint");
    let request = parse_request(&complete_form(), CoercionPolicy::Reject).expect("request");

    let err = endpoint.predict(&request).await.expect_err("must fail");
    assert!(matches!(err, TransportError::Decode { status: 500, .. }), "{err}");
}

#[tokio::test]
async fn controller_renders_missing_model_response_from_service() {
    let (server_url, _received) = spawn_prediction_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "Model not loaded"}"#,
    )
    .await
    .expect("spawn server");
    let view = Arc::new(LastMessage::default());
    let settings = ClientSettings {
        server_url,
        ..ClientSettings::default()
    };
    let controller = http_controller(&settings, view.clone()).expect("controller");

    let outcome = controller.submit(&complete_form()).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            message: "Model not loaded".to_string()
        }
    );
    assert_eq!(view.error.lock().expect("lock").as_deref(), Some("Model not loaded"));
    assert_eq!(*view.result.lock().expect("lock"), None);
    assert_eq!(*view.control.lock().expect("lock"), Some(SubmitControl::idle()));
}

#[tokio::test]
async fn unreachable_server_shows_network_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let view = Arc::new(LastMessage::default());
    let settings = ClientSettings {
        server_url: format!("http://{addr}"),
        request_timeout_secs: Some(5),
        ..ClientSettings::default()
    };
    let controller = http_controller(&settings, view.clone()).expect("controller");

    let outcome = controller.submit(&complete_form()).await;

    assert_eq!(outcome, SubmitOutcome::NetworkError);
    assert_eq!(view.error.lock().expect("lock").as_deref(), Some(NETWORK_ERROR));
    assert_eq!(*view.control.lock().expect("lock"), Some(SubmitControl::idle()));
}
