//! HTTP client setup and middleware configuration.
//!
//! The playlist fetch and every file transfer share one client built by
//! [`create_http_client`]. Requests are traced through `reqwest-tracing`;
//! failed requests are never retried, a rerun of the tool is the retry.
//!
//! ```rust
//! use precache::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Proxy,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("precache/", env!("CARGO_PKG_VERSION"));

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        Self {
            proxy: None,
            headers: Some(headers),
        }
    }
}

/// Creates an HTTP client with tracing middleware.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder();

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert!(config.proxy.is_none());
        assert_eq!(
            config.headers.unwrap().get(USER_AGENT),
            Some(&HeaderValue::from_static(DEFAULT_USER_AGENT))
        );
    }

    #[test]
    fn test_create_http_client_default() {
        let client = create_http_client(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_http_client_without_headers() {
        let config = HttpClientConfig {
            proxy: None,
            headers: None,
        };
        assert!(create_http_client(config).is_ok());
    }
}
