//! Wire DTOs for the node resource.
//!
//! Field declaration order is the JSON key order on serialization.
//! Unknown response fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionDto {
    Enabled,
    Disabled,
    Draining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusDto {
    Online,
    Offline,
    Draining,
}

/// Node as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDto {
    pub id: u32,
    pub address: String,
    pub port: u16,
    pub condition: ConditionDto,
    pub status: StatusDto,
    #[serde(default)]
    pub weight: Option<u32>,
}

/// `{"nodes": [...]}`
#[derive(Debug, Deserialize)]
pub struct NodeListResponse {
    pub nodes: Vec<NodeDto>,
}

/// `{"node": {...}}`
#[derive(Debug, Deserialize)]
pub struct NodeResponse {
    pub node: NodeDto,
}

#[derive(Debug, Serialize)]
pub struct NewNodeDto<'a> {
    pub address: &'a str,
    pub condition: ConditionDto,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreateNodesRequest<'a> {
    pub nodes: Vec<NewNodeDto<'a>>,
}

#[derive(Debug, Serialize)]
pub struct NodeAttributesDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UpdateNodeRequest {
    pub node: NodeAttributesDto,
}

/// Error body returned with 4xx/5xx responses, e.g.
/// `{"message":"Validation Failure","code":400,"validationErrors":{"messages":[...]}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub validation_errors: Option<ValidationErrors>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ValidationErrors {
    #[serde(default)]
    pub messages: Vec<String>,
}
