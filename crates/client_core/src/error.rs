use thiserror::Error;

/// The prediction call did not produce a readable response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported server url scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("prediction request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("malformed prediction response (status {status}): {source}")]
    Decode {
        status: u16,
        source: serde_json::Error,
    },
}
