//! Error types for the gate pipeline.

/// Gate errors.
///
/// Every variant ends in the same place: the gate logs it and leaves the
/// element visible. The variants exist so the diagnostic log says which
/// lookup broke.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GateError {
    /// Identity lookup failed (network error or malformed body).
    #[error("identity lookup failed: {message}")]
    Identity { message: String },

    /// Authorization lookup failed (network error or malformed body).
    #[error("authorization lookup failed: {message}")]
    Authorization { message: String },

    /// An endpoint is unset or not a usable URL.
    #[error("{what} is not configured")]
    Unconfigured { what: String },

    /// The HTTP client could not be built.
    #[error("http client error: {message}")]
    Client { message: String },
}

impl GateError {
    /// Which lookup stage produced the error, for log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Identity { .. } => "identity",
            Self::Authorization { .. } => "authorization",
            Self::Unconfigured { .. } => "config",
            Self::Client { .. } => "client",
        }
    }
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_message() {
        let err = GateError::Unconfigured {
            what: "authorization endpoint".to_string(),
        };
        assert_eq!(err.stage(), "config");
        assert_eq!(err.to_string(), "authorization endpoint is not configured");
    }

    #[test]
    fn test_identity_message() {
        let err = GateError::Identity {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.stage(), "identity");
        assert!(err.to_string().contains("connection refused"));
    }
}
