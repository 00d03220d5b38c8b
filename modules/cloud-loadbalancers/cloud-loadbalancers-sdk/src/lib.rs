#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Cloud Load Balancers SDK
//!
//! Public contract for node management on a Rackspace Cloud Load Balancer:
//! the [`NodeApi`] trait, the node models and [`LoadBalancerError`].
//!
//! ## Usage
//!
//! ```ignore
//! use cloud_loadbalancers_sdk::NodeApi;
//!
//! let nodes = client.list_nodes(2000).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

pub use api::NodeApi;
pub use error::LoadBalancerError;
pub use models::{
    LoadBalancerId, Node, NodeAttributes, NodeCondition, NodeId, NodeRequest, NodeStatus,
};
