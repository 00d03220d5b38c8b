use std::collections::{BTreeSet, HashSet};

use async_trait::async_trait;
use bytes::Bytes;
use cloud_loadbalancers_sdk::{
    LoadBalancerError, LoadBalancerId, Node, NodeApi, NodeAttributes, NodeId, NodeRequest,
};
use http::Method;
use lb_http::{HttpClient, RequestBuilder};
use tracing::{debug, instrument, warn};
use url::Url;

use super::errors::{status_error, transport_error};
use super::{mapper, urls};
use crate::auth::AuthToken;

const AUTH_TOKEN_HEADER: &str = "x-auth-token";
const ACCEPT_JSON: &str = "application/json";
const ACCEPT_ANY: &str = "*/*";

/// HTTP adapter implementing [`NodeApi`] against one region endpoint.
///
/// Holds the shared transport, the region endpoint
/// (e.g. <https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123>)
/// and the session token. `HttpClient` is `Clone + Send + Sync`, so clones
/// of this client can be used concurrently without locking.
///
/// Concurrent calls share the transport's request queue
/// (`HttpClientConfig::buffer_capacity`). When it is full, further calls wait
/// for a slot instead of failing. Each call's timeout starts once it leaves
/// the queue.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: HttpClient,
    endpoint: Url,
    token: AuthToken,
}

impl NodeClient {
    #[must_use]
    pub fn new(http: HttpClient, endpoint: Url, token: AuthToken) -> Self {
        Self {
            http,
            endpoint,
            token,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, method: Method, url: &Url, accept: &str) -> RequestBuilder {
        debug!(%method, %url, "dispatching load balancer request");
        self.http
            .request(method, url.as_str())
            .header(AUTH_TOKEN_HEADER, self.token.expose())
            .header("accept", accept)
    }
}

/// Send and return the body of a 2xx response.
async fn execute(request: RequestBuilder, resource: &str) -> Result<Bytes, LoadBalancerError> {
    let response = request.send().await.map_err(|e| transport_error(&e))?;
    let status = response.status();
    if status.is_success() {
        return response.bytes().await.map_err(|e| transport_error(&e));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(
                status = status.as_u16(),
                resource,
                error = %e,
                "failed to read load balancer error body"
            );
            return Err(transport_error(&e));
        }
    };
    warn!(status = status.as_u16(), resource, "load balancer request failed");
    Err(status_error(status, resource, body))
}

fn require_id(field: &'static str, id: u32) -> Result<(), LoadBalancerError> {
    if id == 0 {
        return Err(LoadBalancerError::invalid_argument(
            field,
            "identifier must be positive",
        ));
    }
    Ok(())
}

fn lb_resource(lb_id: LoadBalancerId) -> String {
    format!("load balancer {lb_id}")
}

fn node_resource(node_id: NodeId, lb_id: LoadBalancerId) -> String {
    format!("node {node_id} of load balancer {lb_id}")
}

#[async_trait]
impl NodeApi for NodeClient {
    #[instrument(skip_all, fields(lb_id = lb_id))]
    async fn list_nodes(&self, lb_id: LoadBalancerId) -> Result<HashSet<Node>, LoadBalancerError> {
        require_id("lb_id", lb_id)?;
        let url = urls::nodes_url(&self.endpoint, lb_id)?;

        let body = execute(self.request(Method::GET, &url, ACCEPT_JSON), &lb_resource(lb_id))
            .await?;
        mapper::decode_node_list(&body)
    }

    #[instrument(skip_all, fields(lb_id = lb_id, node_id = node_id))]
    async fn get_node(
        &self,
        node_id: NodeId,
        lb_id: LoadBalancerId,
    ) -> Result<Node, LoadBalancerError> {
        require_id("lb_id", lb_id)?;
        require_id("node_id", node_id)?;
        let url = urls::node_url(&self.endpoint, lb_id, node_id)?;

        let body = execute(
            self.request(Method::GET, &url, ACCEPT_JSON),
            &node_resource(node_id, lb_id),
        )
        .await?;
        mapper::decode_node(&body)
    }

    #[instrument(skip_all, fields(lb_id = lb_id, count = requests.len()))]
    async fn create_nodes(
        &self,
        requests: &[NodeRequest],
        lb_id: LoadBalancerId,
    ) -> Result<HashSet<Node>, LoadBalancerError> {
        require_id("lb_id", lb_id)?;
        if requests.is_empty() {
            return Err(LoadBalancerError::invalid_argument(
                "requests",
                "at least one node is required",
            ));
        }
        let url = urls::nodes_url(&self.endpoint, lb_id)?;

        let request = self
            .request(Method::POST, &url, ACCEPT_JSON)
            .json(&mapper::create_nodes_request(requests))
            .map_err(|e| transport_error(&e))?;
        let body = execute(request, &lb_resource(lb_id)).await?;
        mapper::decode_node_list(&body)
    }

    #[instrument(skip_all, fields(lb_id = lb_id, node_id = node_id))]
    async fn update_node_attributes(
        &self,
        attributes: &NodeAttributes,
        node_id: NodeId,
        lb_id: LoadBalancerId,
    ) -> Result<(), LoadBalancerError> {
        require_id("lb_id", lb_id)?;
        require_id("node_id", node_id)?;
        let url = urls::node_url(&self.endpoint, lb_id, node_id)?;

        let request = self
            .request(Method::PUT, &url, ACCEPT_JSON)
            .json(&mapper::update_node_request(attributes))
            .map_err(|e| transport_error(&e))?;
        execute(request, &node_resource(node_id, lb_id)).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(lb_id = lb_id, node_id = node_id))]
    async fn remove_node(
        &self,
        node_id: NodeId,
        lb_id: LoadBalancerId,
    ) -> Result<(), LoadBalancerError> {
        require_id("lb_id", lb_id)?;
        require_id("node_id", node_id)?;
        let url = urls::node_url(&self.endpoint, lb_id, node_id)?;

        execute(
            self.request(Method::DELETE, &url, ACCEPT_ANY),
            &node_resource(node_id, lb_id),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip_all, fields(lb_id = lb_id, count = node_ids.len()))]
    async fn remove_nodes(
        &self,
        node_ids: &BTreeSet<NodeId>,
        lb_id: LoadBalancerId,
    ) -> Result<(), LoadBalancerError> {
        require_id("lb_id", lb_id)?;
        if node_ids.is_empty() {
            return Err(LoadBalancerError::invalid_argument(
                "node_ids",
                "at least one node id is required",
            ));
        }
        if node_ids.contains(&0) {
            return Err(LoadBalancerError::invalid_argument(
                "node_ids",
                "identifier must be positive",
            ));
        }
        let url = urls::batch_delete_url(&self.endpoint, lb_id, node_ids)?;

        execute(
            self.request(Method::DELETE, &url, ACCEPT_ANY),
            &format!("nodes of load balancer {lb_id}"),
        )
        .await?;
        Ok(())
    }
}
