//! Request handlers.
//!
//! - `GET /check-ip?ip=<addr>`: `400` invalid or missing ip, `403 {"blocked": true}`
//!   for listed addresses, `200 {"blocked": false}` otherwise
//! - `GET /health`: `200 {"status": "ok"}`

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::blocklist::{parse_ip, Blocklist};

/// Shared handler state. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub blocklist: Arc<Blocklist>,
}

impl AppState {
    pub fn new(blocklist: Blocklist) -> Self {
        Self {
            blocklist: Arc::new(blocklist),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckIpResponse {
    pub blocked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// First `ip` value of the query string. Later duplicates are ignored.
fn first_ip_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "ip")
        .map(|(_, value)| value.as_str())
}

/// GET /check-ip
pub async fn check_ip(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let Some(ip) = first_ip_param(&pairs).and_then(parse_ip) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid IP address".to_string(),
            }),
        )
            .into_response();
    };

    info!(ip = %ip, "checking ip");

    if state.blocklist.contains(&ip) {
        warn!(ip = %ip, "ip is blocklisted");
        (StatusCode::FORBIDDEN, Json(CheckIpResponse { blocked: true })).into_response()
    } else {
        info!(ip = %ip, "ip allowed");
        (StatusCode::OK, Json(CheckIpResponse { blocked: false })).into_response()
    }
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_ip_param_wins() {
        let query = pairs(&[("format", "json"), ("ip", "203.0.113.5"), ("ip", "198.51.100.9")]);
        assert_eq!(first_ip_param(&query), Some("203.0.113.5"));
    }

    #[test]
    fn test_first_ip_param_missing() {
        assert_eq!(first_ip_param(&pairs(&[("addr", "203.0.113.5")])), None);
        assert_eq!(first_ip_param(&[]), None);
    }
}
