//! Fail-open IP gate.
//!
//! Resolves the visitor's public IP, asks an authorization endpoint whether
//! that IP is blocked, and hides one page element when it is. Any failure
//! along the way leaves the element visible.
//!
//! # Quick Start
//!
//! ```no_run
//! use ipgate_core::{Element, Gate, GateConfig, InMemoryDocument};
//!
//! # async fn example() -> Result<(), ipgate_core::GateError> {
//! let config = GateConfig::from_env().with_authorization_url("https://gate.example.com/check-ip");
//! let mut page = InMemoryDocument::new().with_element(&config.element_id, Element::new());
//!
//! let outcome = Gate::from_config(&config)?.run(&mut page).await;
//! println!("gate outcome: {}", outcome.label());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `IPGATE_IDENTITY_URL` | Identity endpoint (default: `https://api.ipify.org?format=json`) |
//! | `IPGATE_AUTHORIZATION_URL` | Authorization endpoint (no default; unset fails open) |
//! | `IPGATE_ELEMENT_ID` | Element hidden for blocked visitors (default: `ad-block`) |

pub mod client;
pub mod element;
pub mod error;
pub mod gate;
pub mod types;

pub use client::{AuthorizationClient, IdentityClient, GATE_USER_AGENT};
pub use element::{Document, Element, InMemoryDocument, PageElement, DISPLAY_NONE};
pub use error::{GateError, GateResult};
pub use gate::{AuthorizationService, Gate, GateOutcome, IdentityService};
pub use types::{
    AuthorizationResponse, BlockDecision, ClientIp, GateConfig, IdentityResponse,
    DEFAULT_ELEMENT_ID, DEFAULT_IDENTITY_URL,
};
