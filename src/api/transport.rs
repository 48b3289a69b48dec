use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::COOKIE;
use serde_json::Value;

use crate::core::config::ResolvedConfig;
use crate::core::outcome::{ActionError, ActionResult, Payload};
use crate::core::request::{ActionRequest, Method, ResponseFormat};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Sends an [`ActionRequest`] and interprets the response.
///
/// Implementations only classify the outcome. State transitions and
/// presentation belong to the controller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the name of the transport, for logs.
    fn name(&self) -> &str;

    async fn execute(&self, request: &ActionRequest) -> ActionResult;
}

/// HTTP transport against the learning platform backend.
pub struct HttpTransport {
    base_url: String,
    session_cookie: Option<String>,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport without a request timeout.
    ///
    /// # Arguments
    /// * `base_url` - Server root, e.g. `http://localhost:5000`
    /// * `session_cookie` - Value of the backend's `session` cookie, if logged in
    pub fn new(base_url: String, session_cookie: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
            client: reqwest::Client::new(),
        }
    }

    /// Rebuilds the client with a whole-request timeout. Expiry surfaces as a network error.
    pub fn with_timeout(self, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, ..self })
    }

    /// Builds the transport a resolved config describes.
    pub fn from_config(config: &ResolvedConfig) -> reqwest::Result<Self> {
        let transport = Self::new(config.base_url.clone(), config.session_cookie.clone());
        match config.timeout {
            Some(timeout) => transport.with_timeout(timeout),
            None => Ok(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

/// Pulls a readable message out of an error body: the `error` field of a JSON
/// object if there is one, the raw text otherwise.
fn error_message(json: Option<&Value>, text: &str) -> String {
    json.and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| text.trim().to_string())
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn execute(&self, request: &ActionRequest) -> ActionResult {
        let url = self.url_for(request.endpoint());
        info!("[{}] {} {}", request.id(), request.method(), url);

        let mut builder = match request.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, format!("session={cookie}"));
        }
        if let Some(payload) = request.payload() {
            debug!("[{}] body: {}", request.id(), Value::Object(payload.clone()));
            builder = builder.json(payload);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?;

        let status = response.status();
        debug!("[{}] response status: {}", request.id(), status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("[{}] {} failed: {} - {}", request.id(), url, status, text);
            let body = serde_json::from_str::<Value>(&text).ok();
            return Err(ActionError::Http {
                status: status.as_u16(),
                message: error_message(body.as_ref(), &text),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?;
        debug!("[{}] received {} bytes", request.id(), bytes.len());

        match request.expect() {
            ResponseFormat::Json => serde_json::from_slice::<Value>(&bytes)
                .map(Payload::Json)
                .map_err(|e| ActionError::Payload(e.to_string())),
            ResponseFormat::Binary => Ok(Payload::Binary(bytes.to_vec())),
        }
    }
}
