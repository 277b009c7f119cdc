//! Transport responses and JSON decoding

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// A response produced by a [`Transport`](super::transport::Transport).
///
/// A response always offers its body as text. It may additionally offer
/// structured JSON access, advertised through [`supports_json`].
///
/// [`supports_json`]: TransportResponse::supports_json
#[async_trait]
pub trait TransportResponse: Send + Sized {
    fn status(&self) -> u16;

    /// Whether [`json`](TransportResponse::json) is backed by the transport.
    fn supports_json(&self) -> bool {
        false
    }

    async fn json(self) -> Result<Value> {
        let text = self.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn text(self) -> Result<String>;
}

/// Decode a response body as JSON.
///
/// Uses the structured accessor when the response has one and parses the
/// text body otherwise; both paths give the same value for the same payload.
pub async fn decode_json<R, T>(response: R) -> Result<T>
where
    R: TransportResponse,
    T: DeserializeOwned,
{
    let value = if response.supports_json() {
        response.json().await?
    } else {
        let text = response.text().await?;
        serde_json::from_str(&text)?
    };
    Ok(serde_json::from_value(value)?)
}

/// A fully buffered response that only exposes its text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    pub status: u16,
    pub body: String,
}

impl TextResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
impl TransportResponse for TextResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn text(self) -> Result<String> {
        Ok(self.body)
    }
}

/// A response whose body is already a decoded JSON value.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: u16,
    pub value: Value,
}

impl JsonResponse {
    pub fn new(status: u16, value: Value) -> Self {
        Self { status, value }
    }
}

#[async_trait]
impl TransportResponse for JsonResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn supports_json(&self) -> bool {
        true
    }

    async fn json(self) -> Result<Value> {
        Ok(self.value)
    }

    async fn text(self) -> Result<String> {
        Ok(self.value.to_string())
    }
}
