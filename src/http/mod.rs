//! REST client module
//!
//! [`RestClient`] turns a path specifier and optional query parameters into a
//! URL, fills in JSON-oriented default options, lets the configured
//! [`OptionsMutator`] adjust them and hands the request to a [`Transport`].

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{HttpMethod, RestConfig, TransportConfig};
use crate::error::Result;
use crate::utils::UrlUtils;

pub mod auth;
pub mod request;
pub mod response;
pub mod transport;

pub use request::{
    OptionsMutator, PathSpec, QueryParams, RequestOptions, Segment, ACCEPT, APPLICATION_JSON,
    CONTENT_TYPE,
};
pub use response::{decode_json, JsonResponse, TextResponse, TransportResponse};
pub use transport::{ReqwestResponse, ReqwestTransport, Transport};

/// JSON REST client over a pluggable transport.
///
/// Configuration is fixed at construction. Every call builds its own options
/// record, so concurrent calls never interact.
#[derive(Clone)]
pub struct RestClient<T = ReqwestTransport> {
    config: RestConfig,
    mutator: Option<Arc<dyn OptionsMutator>>,
    transport: T,
}

impl<T: fmt::Debug> fmt::Debug for RestClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("config", &self.config)
            .field("mutator", &self.mutator.as_ref().map(|_| "dyn OptionsMutator"))
            .field("transport", &self.transport)
            .finish()
    }
}

impl RestClient<ReqwestTransport> {
    /// Create a client backed by a default [`ReqwestTransport`].
    ///
    /// Relative base URLs need an origin; use [`RestClient::with_transport`]
    /// with a [`TransportConfig`] that sets one.
    pub fn new(config: RestConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(TransportConfig::default())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(config: RestConfig, transport: T) -> Self {
        Self {
            config,
            mutator: None,
            transport,
        }
    }

    /// Install the per-request options hook, replacing any previous one.
    pub fn with_mutator(mut self, mutator: impl OptionsMutator + 'static) -> Self {
        self.mutator = Some(Arc::new(mutator));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn use_trailing_slashes(&self) -> bool {
        self.config.use_trailing_slashes
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the full URL for a path and optional query parameters.
    ///
    /// A query string already present on the base URL is kept verbatim and
    /// placed before the supplied parameters. A base fragment stays last.
    pub fn build_url(&self, path: impl Into<PathSpec>, query: Option<&QueryParams>) -> String {
        let base = UrlUtils::split_base(&self.config.base_url);
        let segments = path.into().segments();
        let mut url = UrlUtils::join_path(base.path, &segments, self.config.use_trailing_slashes);

        let extra = query.map(QueryParams::to_query_string);
        if let Some(query) = UrlUtils::merge_query(base.query, extra.as_deref()) {
            url.push('?');
            url.push_str(&query);
        }
        if let Some(fragment) = base.fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }

    /// Issue a GET and return the transport's response without decoding it.
    pub async fn raw_get(
        &self,
        path: impl Into<PathSpec>,
        query: Option<QueryParams>,
    ) -> Result<T::Response> {
        let options = RequestOptions::new(HttpMethod::Get);
        let url = self.build_url(path, query.as_ref());
        self.dispatch(url, options).await
    }

    /// Issue a GET expecting JSON and decode the body.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: impl Into<PathSpec>,
        query: Option<QueryParams>,
    ) -> Result<R> {
        let mut options = RequestOptions::new(HttpMethod::Get);
        options.set_header(ACCEPT, APPLICATION_JSON);
        let url = self.build_url(path, query.as_ref());
        decode_json(self.dispatch(url, options).await?).await
    }

    /// POST `data` as a JSON body.
    pub async fn post<B, R>(&self, path: impl Into<PathSpec>, data: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_string(data)?;
        self.send_json(HttpMethod::Post, path.into(), Some(body)).await
    }

    /// POST without a body; no `Content-Type` is sent.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: impl Into<PathSpec>) -> Result<R> {
        self.send_json(HttpMethod::Post, path.into(), None).await
    }

    /// DELETE with `data` as a JSON body.
    pub async fn delete<B, R>(&self, path: impl Into<PathSpec>, data: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_string(data)?;
        self.send_json(HttpMethod::Delete, path.into(), Some(body)).await
    }

    /// DELETE without a body; no `Content-Type` is sent.
    pub async fn delete_empty<R: DeserializeOwned>(&self, path: impl Into<PathSpec>) -> Result<R> {
        self.send_json(HttpMethod::Delete, path.into(), None).await
    }

    async fn send_json<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: PathSpec,
        body: Option<String>,
    ) -> Result<R> {
        let mut options = RequestOptions::new(method);
        options.set_header(ACCEPT, APPLICATION_JSON);
        if let Some(body) = body {
            options.set_json_body(body);
        }
        let url = self.build_url(path, None);
        decode_json(self.dispatch(url, options).await?).await
    }

    async fn dispatch(&self, url: String, mut options: RequestOptions) -> Result<T::Response> {
        if let Some(mutator) = &self.mutator {
            mutator.mutate(&mut options);
        }
        self.transport.send(&url, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoTransport;

    #[async_trait::async_trait]
    impl Transport for NoTransport {
        type Response = TextResponse;

        async fn send(&self, _url: &str, _options: RequestOptions) -> Result<TextResponse> {
            Ok(TextResponse::new(200, "null"))
        }
    }

    fn client(base_url: &str, trailing: bool) -> RestClient<NoTransport> {
        RestClient::with_transport(RestConfig::new(base_url).trailing_slashes(trailing), NoTransport)
    }

    #[test]
    fn builds_urls_from_segments() {
        let api = client("/api", false);
        assert_eq!(api.build_url(["users", "me"], None), "/api/users/me");
        assert_eq!(api.build_url("me", None), "/api/me");
        assert_eq!(client("", false).build_url(("posts", 33), None), "/posts/33");
    }

    #[test]
    fn raw_json_query_is_one_encoded_token() {
        let api = client("/api", false);
        let params = QueryParams::json(&json!({"a": "b", "c": 4})).expect("serialize");
        assert_eq!(
            api.build_url(["users", "me"], Some(&params)),
            "/api/users/me?%7B%22a%22%3A%22b%22%2C%22c%22%3A4%7D"
        );
    }

    #[test]
    fn base_query_comes_first() {
        let api = client("/api?authentication=foobar", false);
        assert_eq!(
            api.build_url(["users", "me"], None),
            "/api/users/me?authentication=foobar"
        );
        let params = QueryParams::from([("foo", "bar")]);
        assert_eq!(
            api.build_url(["users", "me"], Some(&params)),
            "/api/users/me?authentication=foobar&foo=bar"
        );
    }

    #[test]
    fn trailing_slashes_apply_before_query() {
        let api = client("/base/?token=a%20b", true);
        let params = QueryParams::from([("page", "2")]);
        assert_eq!(api.build_url("me", Some(&params)), "/base/me/?token=a%20b&page=2");
        assert_eq!(api.build_url(["screens", "33"], None), "/base/screens/33/?token=a%20b");
    }

    #[test]
    fn build_url_is_deterministic() {
        let api = client("/api", true);
        assert_eq!(api.build_url("me", None), api.build_url("me", None));
        assert_eq!(api.base_url(), "/api");
        assert!(api.use_trailing_slashes());
    }

    #[test]
    fn data_segments_are_escaped() {
        let api = client("/api", false);
        assert_eq!(
            api.build_url(["100%", "a b", "x/y"], None),
            "/api/100%25/a%20b/x/y"
        );
    }

    #[test]
    fn base_fragment_stays_after_path_and_query() {
        let api = client("/api#frag", false);
        assert_eq!(api.build_url("me", None), "/api/me#frag");

        let api = client("/api?token=t#frag", true);
        let params = QueryParams::from([("foo", "bar")]);
        assert_eq!(api.build_url("me", Some(&params)), "/api/me/?token=t&foo=bar#frag");
    }

    #[test]
    fn empty_pairs_add_no_query() {
        let api = client("/api", false);
        let params = QueryParams::Pairs(Vec::new());
        assert_eq!(api.build_url("me", Some(&params)), "/api/me");
    }
}
