//! Request construction types
//!
//! Path specifiers, query parameters, the per-request options record and the
//! hook that customizes it.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::HttpMethod;
use crate::error::Result;
use crate::utils::UrlUtils;

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// One path segment. Integers are rendered in decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Integer(i128),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Text(text) => f.write_str(text),
            Segment::Integer(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Text(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Text(value)
    }
}

impl From<&String> for Segment {
    fn from(value: &String) -> Self {
        Segment::Text(value.clone())
    }
}

/// Identifies a resource path: a single segment or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    One(Segment),
    Many(Vec<Segment>),
}

impl PathSpec {
    /// Normalize to a sequence of rendered segments.
    pub fn segments(&self) -> Vec<String> {
        match self {
            PathSpec::One(segment) => vec![segment.to_string()],
            PathSpec::Many(segments) => segments.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<Segment> for PathSpec {
    fn from(value: Segment) -> Self {
        PathSpec::One(value)
    }
}

impl From<&str> for PathSpec {
    fn from(value: &str) -> Self {
        PathSpec::One(value.into())
    }
}

impl From<String> for PathSpec {
    fn from(value: String) -> Self {
        PathSpec::One(value.into())
    }
}

impl From<&String> for PathSpec {
    fn from(value: &String) -> Self {
        PathSpec::One(value.into())
    }
}

macro_rules! integer_segments {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Segment {
                fn from(value: $ty) -> Self {
                    Segment::Integer(value as i128)
                }
            }

            impl From<$ty> for PathSpec {
                fn from(value: $ty) -> Self {
                    PathSpec::One(value.into())
                }
            }
        )*
    };
}

integer_segments!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Into<Segment>> From<Vec<T>> for PathSpec {
    fn from(value: Vec<T>) -> Self {
        PathSpec::Many(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Segment>, const N: usize> From<[T; N]> for PathSpec {
    fn from(value: [T; N]) -> Self {
        PathSpec::Many(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Segment> + Clone> From<&[T]> for PathSpec {
    fn from(value: &[T]) -> Self {
        PathSpec::Many(value.iter().cloned().map(Into::into).collect())
    }
}

macro_rules! tuple_segments {
    ($($ty:ident => $var:ident),+) => {
        impl<$($ty: Into<Segment>),+> From<($($ty,)+)> for PathSpec {
            fn from(($($var,)+): ($($ty,)+)) -> Self {
                PathSpec::Many(vec![$($var.into()),+])
            }
        }
    };
}

tuple_segments!(A => a, B => b);
tuple_segments!(A => a, B => b, C => c);
tuple_segments!(A => a, B => b, C => c, D => d);
tuple_segments!(A => a, B => b, C => c, D => d, E => e);

/// Query parameters for a built URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParams {
    /// An already-serialized value, percent-encoded as one opaque token.
    Raw(String),
    /// Ordered `key=value` pairs.
    Pairs(Vec<(String, String)>),
}

impl QueryParams {
    pub fn raw(value: impl Into<String>) -> Self {
        QueryParams::Raw(value.into())
    }

    /// Serialize `value` to JSON and send it as a single opaque token.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(QueryParams::Raw(serde_json::to_string(value)?))
    }

    pub fn pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        QueryParams::Pairs(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Expand the top-level fields of a struct or map as pairs.
    ///
    /// Strings are used as-is, `null` fields are skipped and anything else
    /// is written as its JSON text.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let fields = match serde_json::to_value(value)? {
            Value::Object(fields) => fields,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "query parameters must serialize to a map, got {}",
                    other
                ))
                .into())
            }
        };

        let pairs = fields
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect();
        Ok(QueryParams::Pairs(pairs))
    }

    /// Encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        match self {
            QueryParams::Raw(raw) => UrlUtils::encode_component(raw),
            QueryParams::Pairs(pairs) => UrlUtils::encode_pairs(pairs),
        }
    }
}

impl From<&str> for QueryParams {
    fn from(value: &str) -> Self {
        QueryParams::Raw(value.to_string())
    }
}

impl From<String> for QueryParams {
    fn from(value: String) -> Self {
        QueryParams::Raw(value)
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for QueryParams {
    fn from(value: Vec<(K, V)>) -> Self {
        QueryParams::pairs(value)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for QueryParams {
    fn from(value: [(K, V); N]) -> Self {
        QueryParams::pairs(value)
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for QueryParams {
    fn from(value: BTreeMap<K, V>) -> Self {
        QueryParams::pairs(value)
    }
}

/// The record handed to the transport together with the URL.
///
/// Serializes to the flat shape a fetch-style transport expects:
/// `{"method": "post", "headers": {...}, "body": "...", "credentials": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Any other transport option (`credentials`, `mode`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        RequestOptions {
            method,
            headers: BTreeMap::new(),
            body: None,
            extra: Map::new(),
        }
    }

    /// Look up a header, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing one with the same name in any case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        let key = self
            .headers
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned()?;
        self.headers.remove(&key)
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Attach a serialized JSON body and declare its content type.
    pub(crate) fn set_json_body(&mut self, body: String) {
        self.set_header(CONTENT_TYPE, APPLICATION_JSON);
        self.body = Some(body);
    }
}

/// Per-request hook that adds or overrides default options.
///
/// Runs for every request, reads included, after the defaults for the
/// operation are in place and before dispatch. Any
/// `Fn(&mut RequestOptions) + Send + Sync` closure is a mutator.
pub trait OptionsMutator: Send + Sync {
    fn mutate(&self, options: &mut RequestOptions);
}

impl<F> OptionsMutator for F
where
    F: Fn(&mut RequestOptions) + Send + Sync,
{
    fn mutate(&self, options: &mut RequestOptions) {
        self(options)
    }
}
