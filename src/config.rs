//! Configuration for the REST client and its default transport

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use url::Url;

/// HTTP method enumeration
///
/// Serializes in lowercase (`"get"`, `"post"`, ...), the form the request
/// options record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Lowercase method name as it appears in request options.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        };
        write!(f, "{}", method)
    }
}

/// Construction-time settings of a [`RestClient`](crate::http::RestClient).
///
/// Never mutated after the client is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestConfig {
    /// Prefix for every built URL. May carry its own query string
    /// (`/api?authentication=foobar`), which is kept ahead of any
    /// per-request parameters.
    pub base_url: String,
    /// Force a trailing `/` on every built path.
    pub use_trailing_slashes: bool,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        RestConfig {
            base_url: base_url.into(),
            ..RestConfig::default()
        }
    }

    pub fn trailing_slashes(mut self, enabled: bool) -> Self {
        self.use_trailing_slashes = enabled;
        self
    }
}

/// Proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Settings for the reqwest-backed transport.
///
/// Timeouts and connection behavior are the transport's business; the REST
/// client itself enforces none.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Origin used to resolve relative URLs such as `/api/me`.
    pub origin: Option<Url>,
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
    pub proxy: Option<ProxyConfig>,
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            origin: None,
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            user_agent: Some(format!("restcall/{}", crate::VERSION)),
            proxy: None,
            accept_invalid_certs: false,
        }
    }
}
