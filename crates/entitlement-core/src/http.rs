//! HTTP request template and transport seam
//!
//! The entitlement protocol only ever POSTs a JSON array and reads a JSON
//! array back. The session prepares one [`HttpRequest`] template at
//! construction and stamps a fresh body onto it for each round trip.

use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// MIME type of request and reply bodies
pub const MIME_TYPE_JSON: &str = "application/json";
/// Content encoding applied to request bodies
pub const ENCODING_GZIP: &str = "gzip";

/// `Content-Type` header name
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// `Content-Encoding` header name
pub const HEADER_CONTENT_ENCODING: &str = "Content-Encoding";
/// `Accept` header name
pub const HEADER_ACCEPT: &str = "Accept";

/// HTTP request method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP POST
    Post,
}

impl HttpMethod {
    /// Method name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// HTTP request handed to an [`HttpTransport`].
///
/// The body carries subscriber identities and AKA credentials, so `Debug`
/// only reports whether one is attached.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    /// Target URL
    pub url: Url,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers as key-value pairs
    pub headers: Vec<(String, String)>,
    /// JSON body, uncompressed
    pub body: Option<serde_json::Value>,
    /// Deadline for the whole round trip, connection setup included
    pub timeout: Duration,
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequest")
            .field("url", &self.url.as_str())
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpRequest {
    /// POST template for JSON exchanges with gzip-encoded request bodies.
    pub fn post_json(url: Url, timeout: Duration) -> Self {
        Self {
            url,
            method: HttpMethod::Post,
            headers: vec![
                (HEADER_CONTENT_TYPE.to_string(), MIME_TYPE_JSON.to_string()),
                (HEADER_CONTENT_ENCODING.to_string(), ENCODING_GZIP.to_string()),
                (HEADER_ACCEPT.to_string(), MIME_TYPE_JSON.to_string()),
            ],
            body: None,
            timeout,
        }
    }

    /// Copy of this template carrying `body`
    pub fn with_json_body(&self, body: serde_json::Value) -> Self {
        Self {
            body: Some(body),
            ..self.clone()
        }
    }

    /// Look up a header value, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the body must be gzip-compressed before sending
    pub fn is_gzip_encoded(&self) -> bool {
        self.header(HEADER_CONTENT_ENCODING)
            .is_some_and(|value| value.eq_ignore_ascii_case(ENCODING_GZIP))
    }
}

/// HTTP response returned by an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body text
    pub body: String,
}

impl HttpResponse {
    /// Check if the response indicates success (2xx status)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request/response transport used by the session.
///
/// Implementations own connection handling, TLS, compression and timeouts.
/// Any failure to obtain a 2xx reply is a [`TransportError`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and wait for its reply
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
