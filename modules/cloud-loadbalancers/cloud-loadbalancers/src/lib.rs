#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Rackspace Cloud Load Balancers node client.
//!
//! [`NodeClient`] implements [`cloud_loadbalancers_sdk::NodeApi`] over the
//! `lb_http` transport. [`CloudLoadBalancersClient`] authenticates once
//! through an [`AuthProvider`] and hands out clients bound to a region
//! endpoint from the service catalog.
//!
//! ```ignore
//! use cloud_loadbalancers::{CloudLoadBalancersClient, CloudLoadBalancersConfig};
//! use cloud_loadbalancers_sdk::NodeApi;
//!
//! let config = CloudLoadBalancersConfig::from_figment(&figment)?;
//! let session = CloudLoadBalancersClient::connect(&config, &provider).await?;
//! let nodes = session.node_client("DFW")?.list_nodes(2000).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod auth;
pub mod client;
pub mod config;
mod infra;

pub use auth::{AuthContext, AuthProvider, AuthToken, StaticAuthProvider};
pub use client::CloudLoadBalancersClient;
pub use config::{CONFIG_KEY, CloudLoadBalancersConfig};
pub use infra::http::NodeClient;
