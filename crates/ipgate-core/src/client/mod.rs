//! Identity and authorization clients.
//!
//! Both hold their endpoint as parsed at construction. A missing or invalid
//! endpoint does not fail construction; it fails each lookup with
//! [`GateError::Unconfigured`], which the gate then treats as fail-open.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{GateError, GateResult};
use crate::gate::{AuthorizationService, IdentityService};
use crate::types::{AuthorizationResponse, BlockDecision, ClientIp, GateConfig, IdentityResponse};

mod http;

pub(crate) use http::HttpBackend;
pub use http::USER_AGENT_VALUE as GATE_USER_AGENT;

/// Client for the identity endpoint.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: HttpBackend,
    endpoint: GateResult<Url>,
}

impl IdentityClient {
    pub fn new(config: &GateConfig) -> GateResult<Self> {
        Ok(Self::with_backend(HttpBackend::new()?, config))
    }

    pub(crate) fn with_backend(http: HttpBackend, config: &GateConfig) -> Self {
        Self {
            http,
            endpoint: config.identity_endpoint(),
        }
    }

    /// GET the identity endpoint and return the `ip` field.
    pub async fn fetch_client_ip(&self) -> GateResult<ClientIp> {
        let url = self.endpoint.clone()?;
        debug!(url = %url, "fetching client ip");

        let body: IdentityResponse = self
            .http
            .get_json(url)
            .await
            .map_err(|message| GateError::Identity { message })?;

        Ok(ClientIp::new(body.ip))
    }
}

#[async_trait]
impl IdentityService for IdentityClient {
    async fn fetch_client_ip(&self) -> GateResult<ClientIp> {
        IdentityClient::fetch_client_ip(self).await
    }
}

/// Client for the authorization endpoint.
#[derive(Debug, Clone)]
pub struct AuthorizationClient {
    http: HttpBackend,
    endpoint: GateResult<Url>,
}

impl AuthorizationClient {
    pub fn new(config: &GateConfig) -> GateResult<Self> {
        Ok(Self::with_backend(HttpBackend::new()?, config))
    }

    pub(crate) fn with_backend(http: HttpBackend, config: &GateConfig) -> Self {
        Self {
            http,
            endpoint: config.authorization_endpoint(),
        }
    }

    /// GET the authorization endpoint with `?ip=<ip>` and return the decision.
    pub async fn check_blocked(&self, ip: &ClientIp) -> GateResult<BlockDecision> {
        let url = check_url(self.endpoint.clone()?, ip);
        debug!(ip = %ip, "checking block status");

        let body: AuthorizationResponse = self
            .http
            .get_json(url)
            .await
            .map_err(|message| GateError::Authorization { message })?;

        Ok(BlockDecision::from(body.blocked))
    }
}

#[async_trait]
impl AuthorizationService for AuthorizationClient {
    async fn check_blocked(&self, ip: &ClientIp) -> GateResult<BlockDecision> {
        AuthorizationClient::check_blocked(self, ip).await
    }
}

/// Append the URL-encoded `ip` query parameter, keeping any existing ones.
fn check_url(mut endpoint: Url, ip: &ClientIp) -> Url {
    endpoint.query_pairs_mut().append_pair("ip", ip.as_str());
    endpoint
}
