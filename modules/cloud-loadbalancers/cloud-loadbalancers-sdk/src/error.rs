//! Error type for node operations.
//!
//! Transport-agnostic: HTTP outcomes are reduced to status codes and raw
//! bodies so callers never depend on the transport crate.

use thiserror::Error;

/// Error type for Cloud Load Balancers node operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadBalancerError {
    /// The addressed load balancer or node does not exist (HTTP 404).
    #[error("not found: {resource}")]
    NotFound { resource: String, body: String },

    /// The service rejected the request payload (HTTP 400/422).
    #[error("validation failed with status {status}: {}", .messages.join("; "))]
    Validation {
        status: u16,
        messages: Vec<String>,
        body: String,
    },

    /// Any other non-success status.
    #[error("API error: status {status}")]
    Api { status: u16, body: String },

    /// A success response whose body does not have the expected shape.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// A precondition checked before any request is sent.
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// The service catalog has no endpoint for the region.
    #[error("no load balancer endpoint for region {region}")]
    UnknownRegion { region: String },

    /// The authentication collaborator failed.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Network, TLS, timeout or body-limit failure.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl LoadBalancerError {
    #[must_use]
    pub fn not_found(resource: impl Into<String>, body: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_argument(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unknown_region(region: impl Into<String>) -> Self {
        Self::UnknownRegion {
            region: region.into(),
        }
    }

    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status reported by the service, if the error came from a response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Validation { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::MalformedResponse { .. }
            | Self::InvalidArgument { .. }
            | Self::UnknownRegion { .. }
            | Self::Authentication { .. }
            | Self::Transport { .. } => None,
        }
    }
}
