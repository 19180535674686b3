//! API error types.
//!
//! All errors implement `std::error::Error` via `thiserror`. Structured logging
//! is the caller's responsibility — these types carry the context needed to
//! build meaningful log entries.

use thiserror::Error;

/// Errors that can occur talking to the TRACE backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// TCP/HTTP connection to the backend failed.
    #[error("connection failed to {endpoint}: {reason}")]
    ConnectionFailed {
        endpoint: String,
        reason: String,
    },

    /// The backend did not respond within the configured timeout.
    #[error("request timeout after {duration_secs}s")]
    Timeout {
        duration_secs: u64,
    },

    /// Non-2xx HTTP response from the backend.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape the endpoint promises.
    #[error("malformed reply: {reason}")]
    MalformedReply {
        reason: String,
    },

    /// Configuration loading or validation error.
    #[error("config error: {reason}")]
    ConfigError {
        reason: String,
    },
}

impl ApiError {
    /// Whether this error is a transport-level fault (unreachable endpoint,
    /// timeout, bad status, undecodable body) as opposed to a config problem.
    ///
    /// The chat controller turns transport faults into the canned fallback
    /// turn; the nearby-search variant logs them and preserves prior results.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::ConnectionFailed { .. }
                | ApiError::Timeout { .. }
                | ApiError::HttpStatus { .. }
                | ApiError::MalformedReply { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification() {
        assert!(ApiError::ConnectionFailed {
            endpoint: "http://localhost:8000".into(),
            reason: "refused".into(),
        }
        .is_transport());
        assert!(ApiError::Timeout { duration_secs: 30 }.is_transport());
        assert!(ApiError::HttpStatus {
            status: 502,
            body: String::new(),
        }
        .is_transport());
        assert!(ApiError::MalformedReply {
            reason: "expected object".into(),
        }
        .is_transport());
        assert!(!ApiError::ConfigError {
            reason: "missing base_url".into(),
        }
        .is_transport());
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::HttpStatus {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
    }
}
