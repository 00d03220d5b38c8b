//! Node domain models.
//!
//! Transport-agnostic value types. No serde derives here; the wire shape
//! lives in the client crate's DTOs.

use std::fmt;
use std::net::IpAddr;

use crate::error::LoadBalancerError;

/// Server-assigned node identifier, unique within one load balancer.
pub type NodeId = u32;

/// Load balancer identifier.
pub type LoadBalancerId = u32;

/// Operability state requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeCondition {
    Enabled,
    Disabled,
    Draining,
}

impl NodeCondition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "ENABLED",
            Self::Disabled => "DISABLED",
            Self::Draining => "DRAINING",
        }
    }
}

impl fmt::Display for NodeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State observed by the service. Read-only for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Online,
    Offline,
    Draining,
}

impl NodeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Offline => "OFFLINE",
            Self::Draining => "DRAINING",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend target registered under a load balancer.
///
/// Equality and hashing cover every field, so decoded lists can be collected
/// into a `HashSet` and compared against hand-built values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    id: NodeId,
    address: String,
    port: u16,
    condition: NodeCondition,
    status: NodeStatus,
    weight: Option<u32>,
}

impl Node {
    /// Build a node, checking the invariants the service guarantees.
    ///
    /// `weight` is `None` when the load balancer uses a non-weighted
    /// algorithm and the service omits it.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero id, an empty address, port 0 or weight 0.
    pub fn new(
        id: NodeId,
        address: impl Into<String>,
        port: u16,
        condition: NodeCondition,
        status: NodeStatus,
        weight: Option<u32>,
    ) -> Result<Self, LoadBalancerError> {
        let address = address.into();
        if id == 0 {
            return Err(LoadBalancerError::invalid_argument(
                "id",
                "node id must be positive",
            ));
        }
        if address.trim().is_empty() {
            return Err(LoadBalancerError::invalid_argument(
                "address",
                "address must not be empty",
            ));
        }
        check_port(port)?;
        check_weight(weight)?;
        Ok(Self {
            id,
            address,
            port,
            condition,
            status,
            weight,
        })
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn condition(&self) -> NodeCondition {
        self.condition
    }

    #[must_use]
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    #[must_use]
    pub fn weight(&self) -> Option<u32> {
        self.weight
    }
}

/// Creation payload for a node. The service assigns `id` and `status`.
///
/// Ordered by address, then port, condition and weight, so a batch can be
/// sorted deterministically before submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRequest {
    // Field order defines the derived ordering.
    address: String,
    port: u16,
    condition: NodeCondition,
    weight: Option<u32>,
}

impl NodeRequest {
    /// # Errors
    /// `InvalidArgument` when `address` is not an IPv4/IPv6 literal, or for
    /// port 0 or weight 0.
    pub fn new(
        address: impl Into<String>,
        port: u16,
        condition: NodeCondition,
        weight: Option<u32>,
    ) -> Result<Self, LoadBalancerError> {
        let address = address.into();
        if address.parse::<IpAddr>().is_err() {
            return Err(LoadBalancerError::invalid_argument(
                "address",
                format!("`{address}` is not an IP address"),
            ));
        }
        check_port(port)?;
        check_weight(weight)?;
        Ok(Self {
            address,
            port,
            condition,
            weight,
        })
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn condition(&self) -> NodeCondition {
        self.condition
    }

    #[must_use]
    pub fn weight(&self) -> Option<u32> {
        self.weight
    }
}

/// Partial update of a node. Only populated fields are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeAttributes {
    condition: Option<NodeCondition>,
    weight: Option<u32>,
}

impl NodeAttributes {
    /// # Errors
    /// `InvalidArgument` when neither field is set or when weight is 0.
    pub fn new(
        condition: Option<NodeCondition>,
        weight: Option<u32>,
    ) -> Result<Self, LoadBalancerError> {
        if condition.is_none() && weight.is_none() {
            return Err(LoadBalancerError::invalid_argument(
                "attributes",
                "at least one of condition or weight must be set",
            ));
        }
        check_weight(weight)?;
        Ok(Self { condition, weight })
    }

    #[must_use]
    pub fn condition(&self) -> Option<NodeCondition> {
        self.condition
    }

    #[must_use]
    pub fn weight(&self) -> Option<u32> {
        self.weight
    }
}

fn check_port(port: u16) -> Result<(), LoadBalancerError> {
    if port == 0 {
        return Err(LoadBalancerError::invalid_argument(
            "port",
            "port must be between 1 and 65535",
        ));
    }
    Ok(())
}

fn check_weight(weight: Option<u32>) -> Result<(), LoadBalancerError> {
    if weight == Some(0) {
        return Err(LoadBalancerError::invalid_argument(
            "weight",
            "weight must be positive",
        ));
    }
    Ok(())
}
