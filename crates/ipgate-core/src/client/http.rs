//! HTTP layer: request sending and body decoding.
//!
//! Status codes are not interpreted. The body is decoded whatever the status,
//! so `403 {"blocked": true}` is a valid answer and `400 {"error": ...}` fails
//! on the missing field.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{GateError, GateResult};

pub const USER_AGENT_VALUE: &str = concat!("ipgate/", env!("CARGO_PKG_VERSION"));

/// Shared reqwest client.
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    pub(crate) fn new() -> GateResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| GateError::Client {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// GET `url` and decode the body as `T`.
    ///
    /// The error is a plain message; callers wrap it in the variant for their
    /// lookup stage.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| format!("request to {} failed: {}", redact(&url), e))?;

        let status = response.status();
        debug!(url = %redact(&url), status = status.as_u16(), "response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read response body: {}", e))?;

        serde_json::from_slice(&body).map_err(|e| {
            format!(
                "unexpected body (HTTP {}): {}: {}",
                status.as_u16(),
                e,
                preview(&body)
            )
        })
    }
}

/// URL without its query string, for logs.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

fn preview(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    String::from_utf8_lossy(body).chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_drops_query() {
        let url = Url::parse("https://gate.example.com/check-ip?ip=203.0.113.5").unwrap();
        assert_eq!(redact(&url), "https://gate.example.com/check-ip");
    }

    #[test]
    fn test_preview_truncates() {
        let body = "x".repeat(500);
        assert_eq!(preview(body.as_bytes()).len(), 200);
        assert_eq!(preview(b""), "<empty>");
    }
}
