//! Mapping of transport failures and non-success statuses to
//! `LoadBalancerError`.

use cloud_loadbalancers_sdk::LoadBalancerError;
use http::StatusCode;
use lb_http::HttpError;

use super::dto::FaultResponse;

#[must_use]
pub fn transport_error(err: &HttpError) -> LoadBalancerError {
    LoadBalancerError::transport(err.to_string())
}

/// Classify a non-success response.
///
/// 404 is `NotFound`, 400 and 422 are `Validation` with the messages from
/// the fault body, everything else is `Api` with the raw body.
#[must_use]
pub fn status_error(status: StatusCode, resource: &str, body: String) -> LoadBalancerError {
    match status {
        StatusCode::NOT_FOUND => LoadBalancerError::not_found(resource, body),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            LoadBalancerError::Validation {
                status: status.as_u16(),
                messages: validation_messages(&body),
                body,
            }
        }
        _ => LoadBalancerError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

fn validation_messages(body: &str) -> Vec<String> {
    let fault: FaultResponse = serde_json::from_str(body).unwrap_or_default();
    if let Some(errors) = fault.validation_errors
        && !errors.messages.is_empty()
    {
        return errors.messages;
    }
    [fault.message, fault.details]
        .into_iter()
        .flatten()
        .filter(|m| !m.is_empty())
        .collect()
}
