use std::time::Duration;

use counterview_core::{AnalysisRequest, AnalysisResponse};
use counterview_logging::client_debug;
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, TransportError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub endpoint: Url,
    /// `None` leaves the platform default in place.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the platform default in place.
    pub request_timeout: Option<Duration>,
    /// Keep and replay cookies set by the endpoint (credentials-included mode).
    pub send_cookies: bool,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout: None,
            request_timeout: None,
            send_cookies: false,
        }
    }
}

pub fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url")
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Issue exactly one analyze call. No retries.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().cookie_store(settings.send_cookies);
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, TransportError> {
        client_debug!(
            "POST {} content_len={}",
            self.settings.endpoint,
            request.content().len()
        );

        let response = self
            .client
            .post(self.settings.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match error_detail(&body) {
                Some(detail) => format!("{status}: {detail}"),
                None => status.to_string(),
            };
            client_debug!("analyze endpoint answered {}", message);
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<AnalysisResponse>(&body)
            .map_err(|err| TransportError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

/// Error body in the `{"detail": ...}` form used by the analyze service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::MalformedResponse, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
