//! DTO to domain model mappers.

use std::collections::HashSet;

use cloud_loadbalancers_sdk::{
    LoadBalancerError, Node, NodeAttributes, NodeCondition, NodeRequest, NodeStatus,
};

use super::dto::{
    ConditionDto, CreateNodesRequest, NewNodeDto, NodeAttributesDto, NodeDto, NodeListResponse,
    NodeResponse, StatusDto, UpdateNodeRequest,
};

impl From<ConditionDto> for NodeCondition {
    fn from(dto: ConditionDto) -> Self {
        match dto {
            ConditionDto::Enabled => Self::Enabled,
            ConditionDto::Disabled => Self::Disabled,
            ConditionDto::Draining => Self::Draining,
        }
    }
}

impl From<NodeCondition> for ConditionDto {
    fn from(condition: NodeCondition) -> Self {
        match condition {
            NodeCondition::Enabled => Self::Enabled,
            NodeCondition::Disabled => Self::Disabled,
            NodeCondition::Draining => Self::Draining,
        }
    }
}

impl From<StatusDto> for NodeStatus {
    fn from(dto: StatusDto) -> Self {
        match dto {
            StatusDto::Online => Self::Online,
            StatusDto::Offline => Self::Offline,
            StatusDto::Draining => Self::Draining,
        }
    }
}

/// Convert a decoded node, re-checking the model invariants.
///
/// A node the service sent that violates them is a malformed response, not
/// a caller mistake.
pub fn node_from_dto(dto: NodeDto) -> Result<Node, LoadBalancerError> {
    let id = dto.id;
    Node::new(
        dto.id,
        dto.address,
        dto.port,
        dto.condition.into(),
        dto.status.into(),
        dto.weight,
    )
    .map_err(|e| LoadBalancerError::malformed(format!("node {id}: {e}")))
}

pub fn decode_node_list(body: &[u8]) -> Result<HashSet<Node>, LoadBalancerError> {
    let envelope: NodeListResponse = serde_json::from_slice(body)
        .map_err(|e| LoadBalancerError::malformed(format!("invalid node list: {e}")))?;
    envelope.nodes.into_iter().map(node_from_dto).collect()
}

pub fn decode_node(body: &[u8]) -> Result<Node, LoadBalancerError> {
    let envelope: NodeResponse = serde_json::from_slice(body)
        .map_err(|e| LoadBalancerError::malformed(format!("invalid node: {e}")))?;
    node_from_dto(envelope.node)
}

/// Build the create body, keeping slice order.
pub fn create_nodes_request(requests: &[NodeRequest]) -> CreateNodesRequest<'_> {
    CreateNodesRequest {
        nodes: requests
            .iter()
            .map(|r| NewNodeDto {
                address: r.address(),
                condition: r.condition().into(),
                port: r.port(),
                weight: r.weight(),
            })
            .collect(),
    }
}

pub fn update_node_request(attributes: &NodeAttributes) -> UpdateNodeRequest {
    UpdateNodeRequest {
        node: NodeAttributesDto {
            condition: attributes.condition().map(Into::into),
            weight: attributes.weight(),
        },
    }
}
