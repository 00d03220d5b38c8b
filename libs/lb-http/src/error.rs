use std::time::Duration;
use thiserror::Error;

/// Classification of URL validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidUriKind {
    /// Malformed URL syntax
    ParseError,
    /// No host/authority component
    MissingAuthority,
    /// No scheme component
    MissingScheme,
}

/// Transport error types.
///
/// HTTP status codes are not errors at this layer: any response that
/// arrives is returned to the caller, who decides what a 404 means.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// Request building failed
    #[error("failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    /// Invalid header name
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Invalid header value
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// The request did not complete within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Network level failure (connect, reset, protocol)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// TLS setup failure
    #[error("TLS error: {0}")]
    Tls(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body exceeded the configured size limit
    #[error("response body too large: limit {limit} bytes, got {actual} bytes")]
    BodyTooLarge { limit: usize, actual: usize },

    /// JSON serialization of a request body failed
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Background transport worker is gone
    #[error("transport unavailable: worker closed")]
    ServiceClosed,

    /// URL could not be used as an absolute request target.
    ///
    /// Match on `kind`; `reason` is a diagnostic string for logs.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUri {
        url: String,
        kind: InvalidUriKind,
        reason: String,
    },

    /// URL scheme rejected by the transport security mode
    #[error("URL scheme '{scheme}' not allowed: {reason}")]
    InvalidScheme { scheme: String, reason: String },
}

impl From<hyper_util::client::legacy::Error> for HttpError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        HttpError::Transport(Box::new(err))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::error::Error;
    use std::fmt;

    #[derive(Debug)]
    struct ConnRefused;

    impl fmt::Display for ConnRefused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl Error for ConnRefused {}

    #[test]
    fn test_transport_error_keeps_source() {
        let err = HttpError::Transport(Box::new(ConnRefused));

        let source = err.source().expect("transport error must expose its source");
        assert!(source.downcast_ref::<ConnRefused>().is_some());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn test_body_too_large_message() {
        let err = HttpError::BodyTooLarge {
            limit: 10,
            actual: 42,
        };
        assert_eq!(
            err.to_string(),
            "response body too large: limit 10 bytes, got 42 bytes"
        );
    }
}
