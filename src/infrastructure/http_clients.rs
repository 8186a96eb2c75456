use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::entities::{ErrorDescriptor, Outcome};
use crate::infrastructure::config::SquareConfig;

pub const API_PREFIX: &str = "v2";
pub const SQUARE_VERSION_HEADER: &str = "Square-Version";

pub const API_ERROR_CATEGORY: &str = "API_ERROR";
pub const TRANSPORT_ERROR_CATEGORY: &str = "TRANSPORT_ERROR";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to Square failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid base url {0:?}")]
    BaseUrl(String),
}

impl TransportError {
    pub fn code(&self) -> &'static str {
        match self {
            TransportError::Request(e) if e.is_decode() || e.is_body() => "INVALID_RESPONSE",
            TransportError::Request(_) => "NETWORK_FAILURE",
            TransportError::BaseUrl(_) => "INVALID_BASE_URL",
        }
    }

    pub fn into_descriptor(self) -> ErrorDescriptor {
        ErrorDescriptor::local(TRANSPORT_ERROR_CATEGORY, self.code(), Some(self.to_string()))
    }
}

/// Owns the HTTP client and the configuration for one Square account.
#[derive(Clone, Debug)]
pub struct SquareClient {
    http: Client,
    config: SquareConfig,
}

impl SquareClient {
    pub fn new(config: SquareConfig) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SquareConfig {
        &self.config
    }

    pub async fn get(&self, path: &[&str]) -> Outcome {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &[&str], body: &Value) -> Outcome {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &[&str], body: &Value) -> Outcome {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn send(&self, method: Method, path: &[&str], body: Option<&Value>) -> Outcome {
        match self.try_send(method, path, body).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "no usable response from Square");
                Outcome::Error(vec![e.into_descriptor()])
            }
        }
    }

    async fn try_send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&Value>,
    ) -> Result<Outcome, TransportError> {
        let url = self.url(path)?;
        debug!(method = method.as_str(), path = url.path(), "sending request");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.config.access_token)
            .header(SQUARE_VERSION_HEADER, &self.config.square_version)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), "response received");
        Ok(classify(status, &text))
    }

    /// `{base_url}/v2/{segments...}`, each segment percent-encoded.
    fn url(&self, path: &[&str]) -> Result<Url, TransportError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|_| TransportError::BaseUrl(self.config.base_url.clone()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| TransportError::BaseUrl(self.config.base_url.clone()))?;
            segments.pop_if_empty().push(API_PREFIX).extend(path);
        }
        Ok(url)
    }
}

/// Turns a status and raw body into an [`Outcome`]. Success is decided by the
/// status alone; on failure the remote `errors` array is passed through, or a
/// single synthetic descriptor when the body carries none.
pub fn classify(status: StatusCode, body: &str) -> Outcome {
    let blank = body.trim().is_empty();
    let parsed: Option<Value> = if blank {
        None
    } else {
        serde_json::from_str(body).ok()
    };

    if status.is_success() {
        return match parsed {
            Some(payload) => Outcome::Success(payload),
            None if blank => Outcome::Success(Value::Object(Map::new())),
            None => Outcome::Error(vec![ErrorDescriptor::local(
                API_ERROR_CATEGORY,
                "INVALID_RESPONSE",
                Some(body.to_string()),
            )]),
        };
    }

    let errors = parsed
        .as_ref()
        .and_then(|payload| payload.get("errors"))
        .and_then(|errors| serde_json::from_value::<Vec<ErrorDescriptor>>(errors.clone()).ok())
        .filter(|errors| !errors.is_empty());

    match errors {
        Some(errors) => Outcome::Error(errors),
        None => Outcome::Error(vec![ErrorDescriptor::local(
            API_ERROR_CATEGORY,
            format!("HTTP_{}", status.as_u16()),
            (!blank).then(|| body.to_string()),
        )]),
    }
}
