//! Node API trait.

use std::collections::{BTreeSet, HashSet};

use async_trait::async_trait;

use crate::error::LoadBalancerError;
use crate::models::{LoadBalancerId, Node, NodeAttributes, NodeId, NodeRequest};

/// Node management for one region of the Cloud Load Balancers service.
///
/// Each method is a single request/response exchange. Nothing is retried;
/// errors are returned as reported by the service.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// List every node of a load balancer. Order is not significant.
    async fn list_nodes(&self, lb_id: LoadBalancerId) -> Result<HashSet<Node>, LoadBalancerError>;

    /// Fetch one node.
    async fn get_node(
        &self,
        node_id: NodeId,
        lb_id: LoadBalancerId,
    ) -> Result<Node, LoadBalancerError>;

    /// Add nodes to a load balancer.
    ///
    /// Requests are submitted in slice order. Returns the nodes created by
    /// the service with `id` and `status` assigned.
    async fn create_nodes(
        &self,
        requests: &[NodeRequest],
        lb_id: LoadBalancerId,
    ) -> Result<HashSet<Node>, LoadBalancerError>;

    /// Change the condition and/or weight of a node.
    async fn update_node_attributes(
        &self,
        attributes: &NodeAttributes,
        node_id: NodeId,
        lb_id: LoadBalancerId,
    ) -> Result<(), LoadBalancerError>;

    /// Remove a single node.
    async fn remove_node(&self, node_id: NodeId, lb_id: LoadBalancerId)
    -> Result<(), LoadBalancerError>;

    /// Remove several nodes in one request.
    ///
    /// All-or-nothing from the caller's view: a non-success response fails
    /// the whole call.
    async fn remove_nodes(
        &self,
        node_ids: &BTreeSet<NodeId>,
        lb_id: LoadBalancerId,
    ) -> Result<(), LoadBalancerError>;
}
