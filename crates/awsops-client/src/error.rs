//! Invocation errors
//!
//! Local validation failures come through unchanged from
//! [`CoreError`]; everything else happens on or after the wire.

use awsops_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request never produced an HTTP response
    #[error("{operation}: transport error calling {endpoint}: {message}")]
    Transport {
        operation: String,
        endpoint: String,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// The service answered with a non-2xx status
    #[error("{operation}: {code} (HTTP {status}): {message}")]
    Service {
        operation: String,
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("{operation}: cancelled after {pages} page(s)")]
    Cancelled { operation: String, pages: usize },

    /// The response body was not the JSON document the protocol promises
    #[error("{operation}: malformed response body: {message}")]
    Decode { operation: String, message: String },

    #[error("{operation}: failed to sign request: {message}")]
    Signing { operation: String, message: String },
}

impl InvokeError {
    /// Stable error code for programmatic handling
    ///
    /// Service errors report the code returned by the service.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Core(e) => e.error_code(),
            Self::Transport { .. } => "TransportError",
            Self::Service { code, .. } => code,
            Self::Cancelled { .. } => "Cancelled",
            Self::Decode { .. } => "DecodeError",
            Self::Signing { .. } => "SigningError",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Whether an error chain comes from a failed host name lookup
pub(crate) fn is_name_resolution_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        let text = cause.to_string().to_ascii_lowercase();
        text.contains("dns error")
            || text.contains("failed to lookup address")
            || text.contains("name or service not known")
            || text.contains("nodename nor servname")
            || text.contains("no such host")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_codes() {
        let err = InvokeError::Service {
            operation: "keyspaces:GetKeyspace".into(),
            status: 400,
            code: "ResourceNotFoundException".into(),
            message: "not found".into(),
            request_id: None,
        };
        assert_eq!(err.error_code(), "ResourceNotFoundException");
        assert!(err.to_string().contains("HTTP 400"));

        let err = InvokeError::from(CoreError::UnknownOperation {
            name: "Nope".into(),
        });
        assert_eq!(err.error_code(), "UnknownOperation");

        let err = InvokeError::Cancelled {
            operation: "keyspaces:ListKeyspaces".into(),
            pages: 2,
        };
        assert!(err.is_cancelled());
        assert_eq!(err.error_code(), "Cancelled");
    }

    #[test]
    fn test_name_resolution_detected_in_chain() {
        let err = anyhow!("dns error: failed to lookup address information")
            .context("error sending request")
            .context("HTTP request failed");
        assert!(is_name_resolution_failure(&err));

        let err = anyhow!("connection refused").context("HTTP request failed");
        assert!(!is_name_resolution_failure(&err));
    }
}
