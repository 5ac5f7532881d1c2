//! The `/predict` collaborator and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{PredictionRequest, PredictionResponse};
use tracing::{debug, info};
use url::Url;

use crate::{config::ClientSettings, error::TransportError};

const PREDICT_PATH: &str = "predict";

#[async_trait]
pub trait PredictionEndpoint: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, TransportError>;
}

pub struct HttpPredictionEndpoint {
    http: Client,
    predict_url: Url,
}

impl HttpPredictionEndpoint {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(server_url, None)
    }

    pub fn with_timeout(
        server_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let predict_url = predict_url(server_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::Client)?;
        info!(url = %predict_url, "prediction endpoint configured");
        Ok(Self { http, predict_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, TransportError> {
        Self::with_timeout(
            &settings.server_url,
            settings.request_timeout_secs.map(Duration::from_secs),
        )
    }
}

#[async_trait]
impl PredictionEndpoint for HttpPredictionEndpoint {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, TransportError> {
        let response = self
            .http
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await
            .map_err(TransportError::Request)?;

        // Failure statuses still carry a `{"success": false, ...}` body.
        let status = response.status();
        let body = response.text().await.map_err(TransportError::Request)?;
        debug!(status = status.as_u16(), bytes = body.len(), "prediction endpoint responded");

        serde_json::from_str(&body).map_err(|source| TransportError::Decode {
            status: status.as_u16(),
            source,
        })
    }
}

fn predict_url(server_url: &str) -> Result<Url, TransportError> {
    let trimmed = server_url.trim();
    let mut base = Url::parse(trimmed).map_err(|source| TransportError::InvalidServerUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(TransportError::UnsupportedScheme(base.scheme().to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREDICT_PATH)
        .map_err(|source| TransportError::InvalidServerUrl {
            url: trimmed.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_predict_to_bare_host() {
        let url = predict_url("http://127.0.0.1:5000").expect("url");
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/predict");
    }

    #[test]
    fn keeps_path_prefix_of_mounted_service() {
        let url = predict_url("https://example.test/salary").expect("url");
        assert_eq!(url.as_str(), "https://example.test/salary/predict");
        let url = predict_url("https://example.test/salary/").expect("url");
        assert_eq!(url.as_str(), "https://example.test/salary/predict");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            predict_url("ftp://example.test"),
            Err(TransportError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
        assert!(matches!(
            predict_url("not a url"),
            Err(TransportError::InvalidServerUrl { .. })
        ));
    }
}
