//! Wire types and configuration for the gate.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GateError, GateResult};

/// Visitor's public IP, exactly as the identity endpoint reported it.
///
/// The format is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIp(String);

impl ClientIp {
    pub fn new(ip: impl Into<String>) -> Self {
        Self(ip.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decision returned by the authorization endpoint for one IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockDecision {
    Blocked,
    Allowed,
}

impl BlockDecision {
    pub fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

impl From<bool> for BlockDecision {
    fn from(blocked: bool) -> Self {
        if blocked {
            Self::Blocked
        } else {
            Self::Allowed
        }
    }
}

/// Body of the identity endpoint: `{"ip": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub ip: String,
}

/// Body of the authorization endpoint: `{"blocked": true|false}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    pub blocked: bool,
}

/// Gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Identity endpoint (returns the caller's public IP).
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    /// Authorization endpoint (the `/check-ip` URL). Unset means every run
    /// fails open.
    #[serde(default)]
    pub authorization_url: Option<String>,

    /// Identifier of the element hidden for blocked visitors.
    #[serde(default = "default_element_id")]
    pub element_id: String,
}

/// Default identity endpoint.
pub const DEFAULT_IDENTITY_URL: &str = "https://api.ipify.org?format=json";

/// Default element identifier.
pub const DEFAULT_ELEMENT_ID: &str = "ad-block";

fn default_identity_url() -> String {
    DEFAULT_IDENTITY_URL.to_string()
}

fn default_element_id() -> String {
    DEFAULT_ELEMENT_ID.to_string()
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            identity_url: default_identity_url(),
            authorization_url: None,
            element_id: default_element_id(),
        }
    }
}

impl GateConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `IPGATE_IDENTITY_URL` | Identity endpoint |
    /// | `IPGATE_AUTHORIZATION_URL` | Authorization endpoint |
    /// | `IPGATE_ELEMENT_ID` | Element to hide |
    ///
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        fn non_empty(name: &str) -> Option<String> {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            identity_url: non_empty("IPGATE_IDENTITY_URL").unwrap_or_else(default_identity_url),
            authorization_url: non_empty("IPGATE_AUTHORIZATION_URL"),
            element_id: non_empty("IPGATE_ELEMENT_ID").unwrap_or_else(default_element_id),
        }
    }

    /// Set the identity endpoint.
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into();
        self
    }

    /// Set the authorization endpoint.
    pub fn with_authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    /// Set the element identifier.
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = id.into();
        self
    }

    pub(crate) fn identity_endpoint(&self) -> GateResult<Url> {
        parse_endpoint(Some(&self.identity_url), "identity endpoint")
    }

    pub(crate) fn authorization_endpoint(&self) -> GateResult<Url> {
        parse_endpoint(self.authorization_url.as_deref(), "authorization endpoint")
    }
}

fn parse_endpoint(raw: Option<&str>, what: &str) -> GateResult<Url> {
    let unconfigured = || GateError::Unconfigured {
        what: what.to_string(),
    };

    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(unconfigured)?;
    let url = Url::parse(raw).map_err(|_| unconfigured())?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(unconfigured()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_identity_response_requires_string_ip() {
        let ok: IdentityResponse = serde_json::from_str(r#"{"ip":"203.0.113.5"}"#).unwrap();
        assert_eq!(ok.ip, "203.0.113.5");

        assert!(serde_json::from_str::<IdentityResponse>(r#"{"ip":42}"#).is_err());
        assert!(serde_json::from_str::<IdentityResponse>(r#"{"addr":"1.2.3.4"}"#).is_err());
    }

    #[test]
    fn test_authorization_response_requires_bool() {
        let ok: AuthorizationResponse = serde_json::from_str(r#"{"blocked":true}"#).unwrap();
        assert!(ok.blocked);

        assert!(serde_json::from_str::<AuthorizationResponse>(r#"{"blocked":"yes"}"#).is_err());
        assert!(
            serde_json::from_str::<AuthorizationResponse>(r#"{"error":"bad ip"}"#).is_err()
        );
    }

    #[test]
    fn test_block_decision_from_bool() {
        assert!(BlockDecision::from(true).is_blocked());
        assert!(!BlockDecision::from(false).is_blocked());
    }

    #[test]
    fn test_unset_authorization_endpoint_is_unconfigured() {
        let config = GateConfig::default();
        assert!(matches!(
            config.authorization_endpoint(),
            Err(GateError::Unconfigured { .. })
        ));
    }

    #[test]
    fn test_invalid_authorization_endpoint_is_unconfigured() {
        for raw in ["", "   ", "YOUR_API_URL/check-ip", "ftp://example.com/check-ip"] {
            let config = GateConfig::default().with_authorization_url(raw);
            assert!(
                matches!(
                    config.authorization_endpoint(),
                    Err(GateError::Unconfigured { .. })
                ),
                "expected unconfigured for {raw:?}"
            );
        }
    }

    #[test]
    fn test_config_builder() {
        let config = GateConfig::default()
            .with_identity_url("http://127.0.0.1:9000/ip")
            .with_authorization_url("https://gate.example.com/check-ip")
            .with_element_id("promo");

        assert_eq!(config.identity_url, "http://127.0.0.1:9000/ip");
        assert_eq!(
            config.authorization_endpoint().unwrap().as_str(),
            "https://gate.example.com/check-ip"
        );
        assert_eq!(config.element_id, "promo");
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        std::env::remove_var("IPGATE_IDENTITY_URL");
        std::env::remove_var("IPGATE_AUTHORIZATION_URL");
        std::env::remove_var("IPGATE_ELEMENT_ID");

        let config = GateConfig::from_env();
        assert_eq!(config.identity_url, DEFAULT_IDENTITY_URL);
        assert!(config.authorization_url.is_none());
        assert_eq!(config.element_id, DEFAULT_ELEMENT_ID);
    }

    #[test]
    #[serial]
    fn test_config_from_env_overrides() {
        std::env::set_var("IPGATE_AUTHORIZATION_URL", "https://gate.example.com/check-ip");
        std::env::set_var("IPGATE_ELEMENT_ID", "  ");

        let config = GateConfig::from_env();
        assert_eq!(
            config.authorization_url.as_deref(),
            Some("https://gate.example.com/check-ip")
        );
        assert_eq!(config.element_id, DEFAULT_ELEMENT_ID);

        std::env::remove_var("IPGATE_AUTHORIZATION_URL");
        std::env::remove_var("IPGATE_ELEMENT_ID");
    }
}
