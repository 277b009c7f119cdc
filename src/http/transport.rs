//! The network seam and its reqwest-backed implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, Method};
use serde_json::Value;
use url::Url;

use super::request::RequestOptions;
use super::response::TransportResponse;
use crate::config::{HttpMethod, TransportConfig};
use crate::error::{Result, RestError};
use crate::utils::UrlUtils;

/// Performs the actual network call for a built URL and options record.
///
/// Retries, timeouts and connection handling all belong to the transport.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: TransportResponse;

    async fn send(&self, url: &str, options: RequestOptions) -> Result<Self::Response>;
}

/// Default transport built on `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    origin: Option<Url>,
}

impl ReqwestTransport {
    /// Create a transport with the given configuration
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new().connect_timeout(config.connect_timeout);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        if let Some(proxy_config) = &config.proxy {
            let proxy = reqwest::Proxy::all(&proxy_config.url)
                .map_err(|e| RestError::Config(format!("Invalid proxy: {}", e)))?;

            let proxy = if let (Some(username), Some(password)) =
                (&proxy_config.username, &proxy_config.password)
            {
                proxy.basic_auth(username, password)
            } else {
                proxy
            };

            builder = builder.proxy(proxy);
        }

        if config.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(RestError::Http)?;

        Ok(Self {
            client,
            origin: config.origin,
        })
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn with_client(client: Client, origin: Option<Url>) -> Self {
        Self { client, origin }
    }

    pub fn origin(&self) -> Option<&Url> {
        self.origin.as_ref()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Response = ReqwestResponse;

    async fn send(&self, url: &str, options: RequestOptions) -> Result<ReqwestResponse> {
        let url = UrlUtils::resolve_url(self.origin.as_ref(), url)?;
        let mut request = self.client.request(to_reqwest_method(options.method), url);

        for (key, value) in &options.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        for (key, value) in &options.extra {
            match (key.as_str(), value) {
                ("timeout", Value::Number(millis)) => {
                    if let Some(millis) = millis.as_u64() {
                        request = request.timeout(Duration::from_millis(millis));
                    }
                }
                _ => log::debug!("Ignoring transport option '{}'", key),
            }
        }

        if let Some(body) = options.body {
            log::trace!("Request body: {}", body);
            request = request.body(body);
        }

        let request = request.build().map_err(RestError::Http)?;
        log_request(&request);

        let response = self.client.execute(request).await.map_err(RestError::Http)?;
        log::debug!("< {}", response.status());
        Ok(ReqwestResponse { inner: response })
    }
}

/// Response returned by [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestResponse {
    inner: reqwest::Response,
}

impl ReqwestResponse {
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }
}

#[async_trait]
impl TransportResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    fn supports_json(&self) -> bool {
        true
    }

    async fn json(self) -> Result<Value> {
        let bytes = self.inner.bytes().await.map_err(RestError::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(RestError::Http)
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Trace => Method::TRACE,
    }
}

fn log_request(request: &reqwest::Request) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let url = request.url();
    log::debug!("> {} {}", request.method(), request_path(url));
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => log::debug!("> Host: {}:{}", host, port),
            None => log::debug!("> Host: {}", host),
        }
    }

    for (name, value) in request.headers().iter() {
        let value = value.to_str().unwrap_or("<non-utf8>");
        log::debug!("> {}: {}", name, value);
    }
}

fn request_path(url: &Url) -> String {
    match url[url::Position::BeforePath..].trim() {
        "" => "/".to_string(),
        path => path.to_string(),
    }
}
