//! HTTP authentication utilities and ready-made option mutators

use crate::config::HttpMethod;
use base64::Engine;

use super::request::{OptionsMutator, RequestOptions};

/// Authentication helper
pub struct Auth;

impl Auth {
    /// Create basic auth header value
    pub fn basic_auth(username: &str, password: &str) -> String {
        let credentials = format!("{}:{}", username, password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// Create bearer token header value
    pub fn bearer_token(token: &str) -> String {
        format!("Bearer {}", token)
    }
}

/// Fetch-style credentials policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Omit,
    SameOrigin,
    Include,
}

impl Credentials {
    pub fn as_str(&self) -> &'static str {
        match self {
            Credentials::Omit => "omit",
            Credentials::SameOrigin => "same-origin",
            Credentials::Include => "include",
        }
    }
}

/// Set the `credentials` option on every request.
pub fn credentials(policy: Credentials) -> impl OptionsMutator {
    move |options: &mut RequestOptions| options.set_option("credentials", policy.as_str())
}

/// Set a fixed header on every request.
pub fn header(name: impl Into<String>, value: impl Into<String>) -> impl OptionsMutator {
    let name = name.into();
    let value = value.into();
    move |options: &mut RequestOptions| options.set_header(name.clone(), value.clone())
}

/// Send a CSRF token header on every request that is not a GET.
pub fn csrf_token(header: impl Into<String>, token: impl Into<String>) -> impl OptionsMutator {
    let header = header.into();
    let token = token.into();
    move |options: &mut RequestOptions| {
        if options.method != HttpMethod::Get {
            options.set_header(header.clone(), token.clone());
        }
    }
}

pub fn bearer(token: &str) -> impl OptionsMutator {
    header("Authorization", Auth::bearer_token(token))
}

pub fn basic(username: &str, password: &str) -> impl OptionsMutator {
    header("Authorization", Auth::basic_auth(username, password))
}

/// Run `first`, then `second`.
pub fn chain<A, B>(first: A, second: B) -> impl OptionsMutator
where
    A: OptionsMutator,
    B: OptionsMutator,
{
    move |options: &mut RequestOptions| {
        first.mutate(options);
        second.mutate(options);
    }
}
