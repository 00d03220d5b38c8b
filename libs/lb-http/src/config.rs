use std::time::Duration;

/// Default User-Agent string for outbound requests
pub const DEFAULT_USER_AGENT: &str = concat!("cloud-lb-http/", env!("CARGO_PKG_VERSION"));

/// Default cap on a buffered response body (4 MiB).
///
/// Node listings are small JSON documents; anything larger is treated as a
/// misbehaving endpoint rather than buffered into memory.
pub const DEFAULT_MAX_BODY_SIZE: usize = 4 * 1024 * 1024;

/// TLS root certificate configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TlsRootConfig {
    /// Mozilla's root certificates (webpki-roots, no OS dependency)
    #[default]
    WebPki,
    /// OS native root certificate store
    Native,
}

/// Transport security mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// HTTPS only
    #[default]
    TlsOnly,
    /// Allow plain `http://` URLs.
    ///
    /// **WARNING**: only for local mock servers. Tokens sent over plain HTTP
    /// can be intercepted.
    AllowInsecureHttp,
}

/// Transport configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout covering connect, send and response headers
    /// (default: 30 seconds)
    pub request_timeout: Duration,

    /// Maximum buffered response body size in bytes (default: 4 MiB)
    pub max_body_size: usize,

    /// User-Agent header value
    pub user_agent: String,

    /// Transport security mode (default: `TlsOnly`)
    pub transport: TransportSecurity,

    /// TLS root certificate strategy (default: `WebPki`)
    pub tls_roots: TlsRootConfig,

    /// Maximum number of queued requests waiting for the transport worker
    /// (default: 256, minimum 1)
    pub buffer_capacity: usize,

    /// Idle pooled connection lifetime (default: 90 seconds)
    ///
    /// `None` keeps hyper-util's default.
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum idle connections kept per host (default: 16)
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
            tls_roots: TlsRootConfig::default(),
            buffer_capacity: 256,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 16,
        }
    }
}
