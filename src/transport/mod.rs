//! HTTP transport boundary.
//!
//! The core performs requests through the [`Transport`] trait: one method,
//! one request, one [`RawResponse`]. This is the sole seam for substituting
//! a test double (see [`crate::mocks`]) or an alternate HTTP backend. The
//! production implementation is [`HttpTransport`] over `reqwest::blocking`;
//! timeout and deadline behavior live entirely in its configuration.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// HTTP method for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl Method {
    /// The method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully assembled request handed to the transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: String,
    /// Request headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to the URL.
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Looks up a request header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw HTTP response: status code, headers, and an undecoded body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl RawResponse {
    /// Creates a response with the given status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Adds a response header. Names are stored lowercased.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Looks up a response header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Decodes the body as JSON; fails on a malformed body.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Failures inside the transport shim.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The configured deadline elapsed.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Any other request failure.
    #[error("request failed: {0}")]
    Other(String),
}

/// Performs a single HTTP request.
pub trait Transport {
    /// Sends `request` and returns the raw response. One invocation performs
    /// exactly one request; the core never retries.
    fn perform(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

/// Production transport over a blocking `reqwest` client.
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds a transport with the given User-Agent and request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn perform(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &request.url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        debug!(method = request.method.as_str(), url = %request.url, "performing request");

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else if e.is_connect() {
                TransportError::Connection(e.to_string())
            } else {
                TransportError::Other(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let mut raw = RawResponse::new(status, String::new());
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                raw = raw.with_header(name.as_str(), value);
            }
        }
        raw.body = response
            .text()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        debug!(status, "received response");
        Ok(raw)
    }
}
