#![allow(dead_code)]

use std::path::Path;

use cloud_loadbalancers::{
    AuthContext, AuthToken, CloudLoadBalancersConfig, NodeClient, StaticAuthProvider,
};
use cloud_loadbalancers_sdk::{Node, NodeCondition, NodeStatus};
use httpmock::MockServer;
use lb_http::HttpClientBuilder;
use url::Url;

pub const TOKEN: &str = "2c1d9b2e-0d6f-4f6e-9a57-0e2bd1f0c1aa";
pub const ACCOUNT_PATH: &str = "/v1.0/123123";

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
        .trim()
        .to_owned()
}

/// Config accepting the mock server's `http://` URLs.
pub fn mock_config() -> CloudLoadBalancersConfig {
    CloudLoadBalancersConfig {
        allow_insecure_http: true,
        request_timeout_ms: 5_000,
        ..CloudLoadBalancersConfig::default()
    }
}

pub fn endpoint(server: &MockServer) -> Url {
    Url::parse(&server.url(ACCOUNT_PATH)).unwrap()
}

pub fn node_client(server: &MockServer) -> NodeClient {
    node_client_with(server, &mock_config())
}

pub fn node_client_with(server: &MockServer, config: &CloudLoadBalancersConfig) -> NodeClient {
    let http = HttpClientBuilder::with_config(config.http_config())
        .build()
        .unwrap();
    NodeClient::new(http, endpoint(server), AuthToken::new(TOKEN))
}

pub fn auth_provider(server: &MockServer) -> StaticAuthProvider {
    StaticAuthProvider::new(
        AuthContext::new(AuthToken::new(TOKEN)).with_endpoint("DFW", endpoint(server)),
    )
}

pub fn node(
    id: u32,
    address: &str,
    condition: NodeCondition,
    status: NodeStatus,
    weight: u32,
) -> Node {
    Node::new(id, address, 80, condition, status, Some(weight)).unwrap()
}

/// Path under the mock endpoint, e.g. `nodes_path(2000)`.
pub fn nodes_path(lb_id: u32) -> String {
    format!("{ACCOUNT_PATH}/loadbalancers/{lb_id}/nodes")
}

pub fn node_path(lb_id: u32, node_id: u32) -> String {
    format!("{ACCOUNT_PATH}/loadbalancers/{lb_id}/nodes/{node_id}")
}
