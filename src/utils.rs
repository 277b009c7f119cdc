//! URL building helpers
//!
//! Percent-encoding, base URL splitting, path joining and query assembly.
//! Everything here is pure string work; nothing touches the network.

use crate::error::{Result, RestError};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use url::Url;

/// Everything except RFC 3986 unreserved characters.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Characters that cannot appear raw inside a path segment. `%` is handled
/// separately by [`UrlUtils::encode_path_segment`].
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A base URL taken apart around its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseParts<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// URL validation and assembly utilities
pub struct UrlUtils;

impl UrlUtils {
    /// Percent-encode a value as a single opaque URI component.
    pub fn encode_component(input: &str) -> String {
        utf8_percent_encode(input, COMPONENT_ENCODE_SET).to_string()
    }

    /// Percent-encode the characters that are illegal inside a path segment.
    ///
    /// An existing `%XX` escape is kept; any other `%` becomes `%25`.
    pub fn encode_path_segment(input: &str) -> String {
        let bytes = input.as_bytes();
        let mut encoded = String::with_capacity(input.len());
        let mut start = 0;

        for (index, _) in input.match_indices('%') {
            encoded.extend(utf8_percent_encode(&input[start..index], PATH_SEGMENT_ENCODE_SET));
            let escape = bytes
                .get(index + 1..index + 3)
                .is_some_and(|hex| hex.iter().all(|b| b.is_ascii_hexdigit()));
            encoded.push_str(if escape { "%" } else { "%25" });
            start = index + 1;
        }

        encoded.extend(utf8_percent_encode(&input[start..], PATH_SEGMENT_ENCODE_SET));
        encoded
    }

    /// Split a base URL into its path, query string and fragment.
    ///
    /// An empty query (`/api?`) or fragment (`/api#`) counts as absent.
    pub fn split_base(base: &str) -> BaseParts<'_> {
        let (rest, fragment) = match base.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment).filter(|f| !f.is_empty())),
            None => (base, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query).filter(|q| !q.is_empty())),
            None => (rest, None),
        };
        BaseParts {
            path,
            query,
            fragment,
        }
    }

    /// Append path segments to a base path with exactly one `/` between
    /// components.
    ///
    /// Segments may themselves contain `/`; empty pieces are dropped so no
    /// duplicate slashes appear. The base path is otherwise kept verbatim.
    pub fn join_path<S: AsRef<str>>(base_path: &str, segments: &[S], trailing_slash: bool) -> String {
        let mut path = base_path.trim_end_matches('/').to_string();

        for segment in segments {
            for piece in segment.as_ref().split('/').filter(|p| !p.is_empty()) {
                path.push('/');
                path.push_str(&Self::encode_path_segment(piece));
            }
        }

        if path.is_empty() || (trailing_slash && !path.ends_with('/')) {
            path.push('/');
        }
        path
    }

    /// Expand pairs into `key=value&key=value`, encoding both sides.
    pub fn encode_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
        pairs
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    Self::encode_component(key.as_ref()),
                    Self::encode_component(value.as_ref())
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Merge the base URL's own query string with a per-request one.
    ///
    /// The base query is kept verbatim and always comes first.
    pub fn merge_query(base: Option<&str>, extra: Option<&str>) -> Option<String> {
        match (base, extra.filter(|q| !q.is_empty())) {
            (Some(base), Some(extra)) => Some(format!("{}&{}", base, extra)),
            (Some(base), None) => Some(base.to_string()),
            (None, Some(extra)) => Some(extra.to_string()),
            (None, None) => None,
        }
    }

    /// Parse a built URL, resolving it against `origin` when it is relative.
    pub fn resolve_url(origin: Option<&Url>, input: &str) -> Result<Url> {
        match Url::parse(input) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match origin {
                Some(origin) => origin
                    .join(input)
                    .map_err(|e| RestError::InvalidUrl(format!("Invalid URL '{}': {}", input, e))),
                None => Err(RestError::InvalidUrl(format!(
                    "Relative URL '{}' needs a transport origin",
                    input
                ))),
            },
            Err(e) => Err(RestError::InvalidUrl(format!("Invalid URL '{}': {}", input, e))),
        }
    }
}
