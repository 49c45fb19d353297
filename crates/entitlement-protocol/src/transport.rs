//! HTTPS transport for entitlement requests

use async_trait::async_trait;
use entitlement_core::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
    DEFAULT_CONNECT_TIMEOUT_SECS,
};
use flate2::{write::GzEncoder, Compression};
use std::io::Write;
use std::time::Duration;

/// [`HttpTransport`] backed by a shared `reqwest` client.
///
/// Request bodies are serialized as JSON and gzip-compressed when the
/// request carries `Content-Encoding: gzip`. Gzip replies are inflated by
/// the client. Connection setup is bounded by the client's connect timeout,
/// the whole round trip by [`HttpRequest::timeout`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default connect timeout
    pub fn new() -> Result<Self, TransportError> {
        Self::with_connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
    }

    /// Create a transport whose client gives up connecting after `timeout`
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| TransportError::ClientSetup(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create a transport around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn encode_body(request: &HttpRequest) -> Result<Vec<u8>, TransportError> {
        let json = match &request.body {
            Some(body) => serde_json::to_vec(body)
                .map_err(|e| TransportError::Body(format!("failed to serialize body: {e}")))?,
            None => Vec::new(),
        };

        if request.is_gzip_encoded() {
            gzip(&json).map_err(|e| TransportError::Body(format!("failed to compress body: {e}")))
        } else {
            Ok(json)
        }
    }
}

/// Gzip-compress `data`
pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let body = Self::encode_body(request)?;

        let mut builder = match request.method {
            HttpMethod::Post => self.client.post(request.url.clone()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!(
            "Sending {} request to {} ({} body bytes)",
            request.method.as_str(),
            request.url.host_str().unwrap_or_default(),
            body.len()
        );

        let response = builder
            .body(body)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(request.timeout)
                } else {
                    TransportError::Connect(e.to_string())
                }
            })?;

        let reply = HttpResponse {
            status: response.status().as_u16(),
            body: response
                .text()
                .await
                .map_err(|e| TransportError::Body(e.to_string()))?,
        };

        if !reply.is_success() {
            tracing::warn!("Entitlement server answered with status {}", reply.status);
            return Err(TransportError::Status(reply.status));
        }
        Ok(reply)
    }
}
