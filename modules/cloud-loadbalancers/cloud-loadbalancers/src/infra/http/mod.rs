//! HTTP adapter for the node resource.

pub mod dto;
pub mod errors;
pub mod mapper;
pub mod node_client;
pub mod urls;

pub use node_client::NodeClient;
