//! Authentication collaborator seam.
//!
//! The client never talks to the identity service itself. An [`AuthProvider`]
//! hands over a token and the region-to-endpoint service catalog once per
//! session.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use cloud_loadbalancers_sdk::LoadBalancerError;
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque `X-Auth-Token` value.
///
/// `Debug` and `Display` print `[REDACTED]`. The buffer is zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token for the request header. Never log the returned slice.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Clone for AuthToken {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Token plus the load balancer service catalog.
#[derive(Debug, Clone)]
pub struct AuthContext {
    token: AuthToken,
    endpoints: HashMap<String, Url>,
}

impl AuthContext {
    #[must_use]
    pub fn new(token: AuthToken) -> Self {
        Self {
            token,
            endpoints: HashMap::new(),
        }
    }

    /// Register the public endpoint for a region, e.g.
    /// `https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123`.
    #[must_use]
    pub fn with_endpoint(mut self, region: &str, endpoint: Url) -> Self {
        self.endpoints.insert(region.to_ascii_uppercase(), endpoint);
        self
    }

    #[must_use]
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Endpoint for `region`, matched case-insensitively.
    #[must_use]
    pub fn endpoint(&self, region: &str) -> Option<&Url> {
        self.endpoints.get(&region.to_ascii_uppercase())
    }

    /// Catalog regions, sorted.
    #[must_use]
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.endpoints.keys().cloned().collect();
        regions.sort_unstable();
        regions
    }
}

/// Supplies an authenticated context.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// # Errors
    /// `LoadBalancerError::Authentication` when credentials are rejected or
    /// the identity service cannot be reached.
    async fn authenticate(&self) -> Result<AuthContext, LoadBalancerError>;
}

/// Provider returning a context obtained elsewhere.
#[derive(Debug, Clone)]
pub struct StaticAuthProvider {
    context: AuthContext,
}

impl StaticAuthProvider {
    #[must_use]
    pub fn new(context: AuthContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn authenticate(&self) -> Result<AuthContext, LoadBalancerError> {
        Ok(self.context.clone())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_redacted() {
        let token = AuthToken::new("a4b7c2d9-secret");
        assert_eq!(format!("{token:?}"), "[REDACTED]");
        assert_eq!(format!("{token}"), "[REDACTED]");
        assert_eq!(token.expose(), "a4b7c2d9-secret");

        let context = AuthContext::new(token);
        assert!(!format!("{context:?}").contains("a4b7c2d9-secret"));
    }

    #[test]
    fn test_token_zeroize() {
        let mut token = AuthToken::new("sensitive");
        token.zeroize();
        assert!(token.expose().is_empty());
    }

    #[test]
    fn test_region_lookup_is_case_insensitive() {
        let dfw = Url::parse("https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123").unwrap();
        let ord = Url::parse("https://ord.loadbalancers.api.rackspacecloud.com/v1.0/123123").unwrap();
        let context = AuthContext::new(AuthToken::new("t"))
            .with_endpoint("ord", ord.clone())
            .with_endpoint("DFW", dfw.clone());

        assert_eq!(context.endpoint("dfw"), Some(&dfw));
        assert_eq!(context.endpoint("Ord"), Some(&ord));
        assert_eq!(context.endpoint("LON"), None);
        assert_eq!(context.regions(), vec!["DFW".to_owned(), "ORD".to_owned()]);
    }

    #[tokio::test]
    async fn test_static_provider_returns_context() {
        let endpoint = Url::parse("https://lon.loadbalancers.api.rackspacecloud.com/v1.0/1").unwrap();
        let provider = StaticAuthProvider::new(
            AuthContext::new(AuthToken::new("token-1")).with_endpoint("LON", endpoint),
        );

        let context = provider.authenticate().await.unwrap();
        assert_eq!(context.token().expose(), "token-1");
        assert_eq!(context.regions(), vec!["LON".to_owned()]);
    }
}
