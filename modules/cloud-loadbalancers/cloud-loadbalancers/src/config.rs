//! Client configuration.

use std::time::Duration;

use figment::Figment;
use lb_http::{HttpClientConfig, TransportSecurity};
use serde::Deserialize;

/// Figment key holding the client section.
pub const CONFIG_KEY: &str = "cloud_loadbalancers";

/// Cloud Load Balancers client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudLoadBalancersConfig {
    /// Region used by `default_node_client` (case-insensitive).
    pub region: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Largest response body accepted, in bytes.
    pub max_body_size_bytes: usize,
    /// User-Agent override. `None` keeps the transport default.
    pub user_agent: Option<String>,
    /// Permit `http://` endpoints. Local mock servers only.
    pub allow_insecure_http: bool,
    /// Idle pooled connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for CloudLoadBalancersConfig {
    fn default() -> Self {
        Self {
            region: "DFW".to_owned(),
            request_timeout_ms: 30_000,
            max_body_size_bytes: lb_http::DEFAULT_MAX_BODY_SIZE,
            user_agent: None,
            allow_insecure_http: false,
            pool_max_idle_per_host: 16,
        }
    }
}

impl CloudLoadBalancersConfig {
    /// Extract the `cloud_loadbalancers` section, falling back to defaults
    /// when the section is absent.
    ///
    /// # Errors
    /// Returns the figment error when the section exists but does not match
    /// the expected shape.
    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        if figment.contains(CONFIG_KEY) {
            figment.extract_inner(CONFIG_KEY)
        } else {
            Ok(Self::default())
        }
    }

    /// Transport settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpClientConfig {
        let mut http = HttpClientConfig {
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_body_size: self.max_body_size_bytes,
            pool_max_idle_per_host: self.pool_max_idle_per_host,
            ..HttpClientConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            http.user_agent.clone_from(user_agent);
        }
        if self.allow_insecure_http {
            http.transport = TransportSecurity::AllowInsecureHttp;
        }
        http
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;
    use figment::providers::{Env, Serialized};
    use serde_json::json;

    #[test]
    fn test_defaults_when_section_absent() {
        let figment = Figment::new().merge(Serialized::defaults(json!({
            "other_module": { "enabled": true }
        })));

        let config = CloudLoadBalancersConfig::from_figment(&figment).unwrap();
        assert_eq!(config, CloudLoadBalancersConfig::default());
        assert_eq!(config.region, "DFW");
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let figment = Figment::new().merge(Serialized::defaults(json!({
            "cloud_loadbalancers": {
                "region": "ORD",
                "request_timeout_ms": 5000
            }
        })));

        let config = CloudLoadBalancersConfig::from_figment(&figment).unwrap();
        assert_eq!(config.region, "ORD");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.max_body_size_bytes, lb_http::DEFAULT_MAX_BODY_SIZE);
        assert!(!config.allow_insecure_http);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let figment = Figment::new().merge(Serialized::defaults(json!({
            "cloud_loadbalancers": { "retries": 3 }
        })));

        assert!(CloudLoadBalancersConfig::from_figment(&figment).is_err());
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("CLB_CLOUD_LOADBALANCERS__REGION", "LON");
            let figment = Figment::new()
                .merge(Serialized::defaults(json!({
                    "cloud_loadbalancers": { "region": "DFW" }
                })))
                .merge(Env::prefixed("CLB_").split("__"));

            let config = CloudLoadBalancersConfig::from_figment(&figment)?;
            assert_eq!(config.region, "LON");
            Ok(())
        });
    }

    #[test]
    fn test_http_config_mapping() {
        let config = CloudLoadBalancersConfig {
            request_timeout_ms: 1500,
            max_body_size_bytes: 1024,
            user_agent: Some("lb-tests/1.0".to_owned()),
            allow_insecure_http: true,
            pool_max_idle_per_host: 2,
            ..CloudLoadBalancersConfig::default()
        };

        let http = config.http_config();
        assert_eq!(http.request_timeout, Duration::from_millis(1500));
        assert_eq!(http.max_body_size, 1024);
        assert_eq!(http.user_agent, "lb-tests/1.0");
        assert_eq!(http.transport, TransportSecurity::AllowInsecureHttp);
        assert_eq!(http.pool_max_idle_per_host, 2);
    }

    #[test]
    fn test_http_config_is_tls_only_by_default() {
        let http = CloudLoadBalancersConfig::default().http_config();
        assert_eq!(http.transport, TransportSecurity::TlsOnly);
        assert_eq!(http.user_agent, lb_http::DEFAULT_USER_AGENT);
    }
}
