#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! HTTP transport for the Cloud Load Balancers client.
//!
//! A hyper-based client with:
//! - TLS via rustls (HTTPS only unless explicitly relaxed for mock servers)
//! - Connection pooling
//! - Per-request timeout
//! - User-Agent injection
//! - Transparent response decompression, with body limits applied to the
//!   decompressed bytes
//!
//! No retries and no redirects: callers see exactly one
//! exchange per request and decide what to do with every status code.
//!
//! # Example
//!
//! ```ignore
//! use lb_http::HttpClient;
//!
//! let client = HttpClient::builder().build()?;
//! let resp = client
//!     .get("https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123/loadbalancers/2000/nodes")
//!     .header("x-auth-token", token.expose())
//!     .send()
//!     .await?;
//! if resp.status().is_success() {
//!     let body = resp.bytes().await?;
//! }
//! ```

mod builder;
mod client;
mod config;
mod error;
mod request;
mod response;
pub mod tls;
mod user_agent;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{
    DEFAULT_MAX_BODY_SIZE, DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity,
};
pub use error::{HttpError, InvalidUriKind};
pub use request::RequestBuilder;
pub use response::{HttpResponse, ResponseBody};
pub use user_agent::{UserAgentLayer, UserAgentService};
