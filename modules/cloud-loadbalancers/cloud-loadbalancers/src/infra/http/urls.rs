//! URL construction under a region endpoint.
//!
//! Layout: `{endpoint}/loadbalancers/{lb_id}/nodes[/{node_id}]`.

use std::collections::BTreeSet;

use cloud_loadbalancers_sdk::{LoadBalancerError, LoadBalancerId, NodeId};
use url::Url;

pub fn nodes_url(endpoint: &Url, lb_id: LoadBalancerId) -> Result<Url, LoadBalancerError> {
    with_segments(endpoint, &["loadbalancers", &lb_id.to_string(), "nodes"])
}

pub fn node_url(
    endpoint: &Url,
    lb_id: LoadBalancerId,
    node_id: NodeId,
) -> Result<Url, LoadBalancerError> {
    with_segments(
        endpoint,
        &["loadbalancers", &lb_id.to_string(), "nodes", &node_id.to_string()],
    )
}

/// `.../nodes?id=%5B410%2C%20411%5D`
///
/// The id list is a single bracketed, comma-space separated value,
/// percent-encoded with `%20` for spaces.
pub fn batch_delete_url(
    endpoint: &Url,
    lb_id: LoadBalancerId,
    node_ids: &BTreeSet<NodeId>,
) -> Result<Url, LoadBalancerError> {
    let mut url = nodes_url(endpoint, lb_id)?;
    let encoded = urlencoding::encode(&id_list(node_ids)).into_owned();
    // query_pairs_mut would form-encode the space as `+`
    url.set_query(Some(&format!("id={encoded}")));
    Ok(url)
}

/// `[410, 411]`, ascending.
fn id_list(node_ids: &BTreeSet<NodeId>) -> String {
    let joined = node_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

fn with_segments(endpoint: &Url, segments: &[&str]) -> Result<Url, LoadBalancerError> {
    let mut url = endpoint.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| {
            LoadBalancerError::invalid_argument("endpoint", format!("`{endpoint}` cannot be a base URL"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123").unwrap()
    }

    #[test]
    fn test_nodes_url() {
        assert_eq!(
            nodes_url(&endpoint(), 2000).unwrap().as_str(),
            "https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123/loadbalancers/2000/nodes"
        );
    }

    #[test]
    fn test_node_url_with_trailing_slash_endpoint() {
        let endpoint = Url::parse("https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123/").unwrap();
        assert_eq!(
            node_url(&endpoint, 2000, 410).unwrap().as_str(),
            "https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123/loadbalancers/2000/nodes/410"
        );
    }

    #[test]
    fn test_batch_delete_query_encoding() {
        let ids: BTreeSet<NodeId> = [411, 410].into_iter().collect();
        assert_eq!(
            batch_delete_url(&endpoint(), 2000, &ids).unwrap().as_str(),
            "https://dfw.loadbalancers.api.rackspacecloud.com/v1.0/123123/loadbalancers/2000/nodes?id=%5B410%2C%20411%5D"
        );
    }

    #[test]
    fn test_batch_delete_single_id() {
        let ids: BTreeSet<NodeId> = [7].into_iter().collect();
        let url = batch_delete_url(&endpoint(), 1, &ids).unwrap();
        assert_eq!(url.query(), Some("id=%5B7%5D"));
    }

    #[test]
    fn test_non_base_endpoint_rejected() {
        let endpoint = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            nodes_url(&endpoint, 1),
            Err(LoadBalancerError::InvalidArgument { field: "endpoint", .. })
        ));
    }
}
