//! Region-scoped client factory.

use cloud_loadbalancers_sdk::LoadBalancerError;
use lb_http::{HttpClient, HttpClientBuilder};
use tracing::{info, instrument};

use crate::auth::{AuthContext, AuthProvider};
use crate::config::CloudLoadBalancersConfig;
use crate::infra::http::NodeClient;
use crate::infra::http::errors::transport_error;

/// Authenticated session handing out per-region [`NodeClient`]s.
///
/// Every node client shares one transport and connection pool.
#[derive(Debug, Clone)]
pub struct CloudLoadBalancersClient {
    http: HttpClient,
    context: AuthContext,
    default_region: String,
}

impl CloudLoadBalancersClient {
    /// Authenticate once and build the shared transport.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Propagates the provider's error, or `Transport` when the HTTP client
    /// cannot be built.
    #[instrument(skip_all, fields(region = %config.region))]
    pub async fn connect(
        config: &CloudLoadBalancersConfig,
        auth: &dyn AuthProvider,
    ) -> Result<Self, LoadBalancerError> {
        let context = auth.authenticate().await?;
        let http = HttpClientBuilder::with_config(config.http_config())
            .build()
            .map_err(|e| transport_error(&e))?;

        info!(regions = ?context.regions(), "cloud load balancers session ready");
        Ok(Self {
            http,
            context,
            default_region: config.region.clone(),
        })
    }

    /// # Errors
    /// `UnknownRegion` when the service catalog has no endpoint for `region`.
    pub fn node_client(&self, region: &str) -> Result<NodeClient, LoadBalancerError> {
        let endpoint = self
            .context
            .endpoint(region)
            .ok_or_else(|| LoadBalancerError::unknown_region(region))?;
        Ok(NodeClient::new(
            self.http.clone(),
            endpoint.clone(),
            self.context.token().clone(),
        ))
    }

    /// Node client for the configured region.
    ///
    /// # Errors
    /// `UnknownRegion` when the configured region is not in the catalog.
    pub fn default_node_client(&self) -> Result<NodeClient, LoadBalancerError> {
        self.node_client(&self.default_region)
    }

    #[must_use]
    pub fn regions(&self) -> Vec<String> {
        self.context.regions()
    }
}
