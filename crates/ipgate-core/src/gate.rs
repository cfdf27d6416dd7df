//! The gate: resolve the visitor's IP, ask whether it is blocked, hide the
//! element if so.
//!
//! The pipeline is two fallible lookups and one infallible mutation:
//!
//! 1. [`IdentityService::fetch_client_ip`]
//! 2. [`AuthorizationService::check_blocked`]
//! 3. [`Document::element_by_id`] + [`PageElement::hide`]
//!
//! [`Gate::run`] matches every lookup error to the same branch,
//! [`GateOutcome::FailedOpen`], and leaves the element untouched.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::client::{AuthorizationClient, HttpBackend, IdentityClient};
use crate::element::{Document, PageElement};
use crate::error::{GateError, GateResult};
use crate::types::{BlockDecision, ClientIp, GateConfig};

/// Source of the visitor's public IP.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn fetch_client_ip(&self) -> GateResult<ClientIp>;
}

/// Source of block decisions.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    async fn check_blocked(&self, ip: &ClientIp) -> GateResult<BlockDecision>;
}

/// What one gate run did.
#[derive(Debug, Clone)]
pub enum GateOutcome {
    /// Blocked; the element was hidden.
    Hidden { ip: ClientIp },
    /// Not blocked; nothing was touched.
    Allowed { ip: ClientIp },
    /// Blocked, but the page has no element with the configured id.
    ElementMissing { ip: ClientIp },
    /// A lookup failed; nothing was touched.
    FailedOpen { error: GateError },
}

impl GateOutcome {
    /// Whether the run hid the element.
    pub fn hid_element(&self) -> bool {
        matches!(self, Self::Hidden { .. })
    }

    /// Short label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hidden { .. } => "hidden",
            Self::Allowed { .. } => "allowed",
            Self::ElementMissing { .. } => "element_missing",
            Self::FailedOpen { .. } => "failed_open",
        }
    }

    /// The IP the run resolved, if it got that far.
    pub fn client_ip(&self) -> Option<&ClientIp> {
        match self {
            Self::Hidden { ip } | Self::Allowed { ip } | Self::ElementMissing { ip } => Some(ip),
            Self::FailedOpen { .. } => None,
        }
    }
}

/// Single-shot IP gate.
///
/// [`Gate::run`] takes `self`, so a gate runs at most once.
pub struct Gate {
    identity: Box<dyn IdentityService>,
    authorization: Box<dyn AuthorizationService>,
    element_id: String,
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("element_id", &self.element_id)
            .finish_non_exhaustive()
    }
}

impl Gate {
    pub fn new(
        identity: impl IdentityService + 'static,
        authorization: impl AuthorizationService + 'static,
        element_id: impl Into<String>,
    ) -> Self {
        Self {
            identity: Box::new(identity),
            authorization: Box::new(authorization),
            element_id: element_id.into(),
        }
    }

    /// Build a gate backed by the HTTP clients.
    ///
    /// Only HTTP client construction can fail here. Endpoint problems surface
    /// at run time as a fail-open outcome.
    pub fn from_config(config: &GateConfig) -> GateResult<Self> {
        let http = HttpBackend::new()?;
        Ok(Self::new(
            IdentityClient::with_backend(http.clone(), config),
            AuthorizationClient::with_backend(http, config),
            config.element_id.clone(),
        ))
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Run the gate against `document`. Never fails.
    pub async fn run<D>(self, document: &mut D) -> GateOutcome
    where
        D: Document + ?Sized,
    {
        match self.decide().await {
            Ok((ip, BlockDecision::Blocked)) => {
                info!(ip = %ip, "ip blocked");
                match document.element_by_id(&self.element_id) {
                    Some(element) => {
                        element.hide();
                        GateOutcome::Hidden { ip }
                    }
                    None => GateOutcome::ElementMissing { ip },
                }
            }
            Ok((ip, BlockDecision::Allowed)) => {
                info!(ip = %ip, "ip allowed");
                GateOutcome::Allowed { ip }
            }
            Err(error) => {
                warn!(
                    stage = error.stage(),
                    error = %error,
                    "ip check failed, content stays visible"
                );
                GateOutcome::FailedOpen { error }
            }
        }
    }

    async fn decide(&self) -> GateResult<(ClientIp, BlockDecision)> {
        let ip = self.identity.fetch_client_ip().await?;
        info!(ip = %ip, "client ip resolved");

        let decision = self.authorization.check_blocked(&ip).await?;
        Ok((ip, decision))
    }
}
