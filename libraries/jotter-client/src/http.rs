//! Transport layer: one request in, one parsed JSON body out.
//!
//! The session credential is an HttpOnly cookie. It lives in the reqwest
//! cookie store and is never read or attached by this crate.

use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, Method};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Description of a single API call, kept so it can be replayed verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, starting with `/`
    pub path: String,
    pub body: Option<Value>,
    /// Set once the request has been replayed after a session refresh
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path, None)
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    pub fn put_json(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, None)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Something that can execute an [`ApiRequest`].
///
/// Implementations must not retry; that decision belongs to the
/// session interceptor.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<Value>;
}

/// reqwest-backed transport bound to one base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client with its own cookie store.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.normalized_url()?;
        let user_agent = HeaderValue::from_str(&config.user_agent())
            .map_err(|e| ClientError::Config(format!("Invalid user agent: {}", e)))?;

        // No timeout: transport defaults apply
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, url = %url, retried = request.retried, "Sending request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text).map_err(|e| {
                ClientError::ParseError(format!("Failed to parse {} response: {}", request, e))
            })
        } else {
            Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&text),
                request: Box::new(request.clone()),
            })
        }
    }
}

/// Pull `message` out of a JSON error body, else keep the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_string())
}
