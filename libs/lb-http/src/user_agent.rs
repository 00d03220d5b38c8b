use crate::error::HttpError;
use http::{HeaderValue, Request, Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that sets a default User-Agent header
#[derive(Clone)]
pub struct UserAgentLayer {
    user_agent: HeaderValue,
}

impl UserAgentLayer {
    /// # Errors
    /// Returns `HttpError::InvalidHeaderValue` if `user_agent` is not a valid header value
    pub fn try_new(user_agent: impl AsRef<str>) -> Result<Self, HttpError> {
        let user_agent = HeaderValue::from_str(user_agent.as_ref())?;
        Ok(Self { user_agent })
    }
}

impl<S> Layer<S> for UserAgentLayer {
    type Service = UserAgentService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        UserAgentService {
            inner,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Service produced by [`UserAgentLayer`]
#[derive(Clone)]
pub struct UserAgentService<S> {
    inner: S,
    user_agent: HeaderValue,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for UserAgentService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        // caller-supplied value wins
        req.headers_mut()
            .entry(http::header::USER_AGENT)
            .or_insert_with(|| self.user_agent.clone());
        self.inner.call(req)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Method, StatusCode};
    use http_body_util::Full;
    use tower::ServiceExt;

    /// Echoes the User-Agent it received back as the response body.
    #[derive(Clone)]
    struct EchoUa;

    impl Service<Request<Full<Bytes>>> for EchoUa {
        type Response = Response<String>;
        type Error = std::convert::Infallible;
        type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Full<Bytes>>) -> Self::Future {
            let ua = req
                .headers()
                .get(http::header::USER_AGENT)
                .map(|v| v.to_str().unwrap().to_owned())
                .unwrap_or_default();
            let mut resp = Response::new(ua);
            *resp.status_mut() = StatusCode::OK;
            std::future::ready(Ok(resp))
        }
    }

    fn request(ua: Option<&str>) -> Request<Full<Bytes>> {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri("https://dfw.loadbalancers.example.com/v1.0/1/loadbalancers");
        if let Some(ua) = ua {
            builder = builder.header(http::header::USER_AGENT, ua);
        }
        builder.body(Full::new(Bytes::new())).unwrap()
    }

    #[tokio::test]
    async fn test_user_agent_added() {
        let service = UserAgentLayer::try_new("lb-test/1.0").unwrap().layer(EchoUa);
        let resp = service.oneshot(request(None)).await.unwrap();
        assert_eq!(resp.body(), "lb-test/1.0");
    }

    #[tokio::test]
    async fn test_user_agent_not_overwritten() {
        let service = UserAgentLayer::try_new("lb-test/1.0").unwrap().layer(EchoUa);
        let resp = service.oneshot(request(Some("caller/2.0"))).await.unwrap();
        assert_eq!(resp.body(), "caller/2.0");
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        assert!(UserAgentLayer::try_new("bad\x00agent").is_err());
    }
}
