//! 共通型定義
//!
//! FakeEndpoint, Request, Response等のコアデータ型

use crate::error::{CommonError, CommonResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods accepted in endpoint definitions.
const KNOWN_METHODS: &[&str] = &[
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "TRACE", "CONNECT",
];

/// Header map keyed by header name.
pub type Headers = BTreeMap<String, String>;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A mocked endpoint: the request it answers and the canned response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FakeEndpoint {
    /// 表示名
    #[serde(alias = "Name")]
    pub name: String,
    /// Excluded from compatibility runs when set
    #[serde(default, alias = "CDCDisabled")]
    pub cdcdisabled: bool,
    /// マッチ対象のリクエスト
    #[serde(alias = "Request")]
    pub request: Request,
    /// 返却するレスポンス
    #[serde(alias = "Response")]
    pub response: Response,
}

/// Request descriptor of an endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Request {
    /// Path plus optional query string, e.g. `/hello?name=x`
    #[serde(alias = "URI")]
    pub uri: String,
    /// HTTP method
    #[serde(alias = "Method")]
    pub method: String,
    /// Headers the request must carry
    #[serde(default, alias = "Headers", deserialize_with = "null_as_default")]
    pub headers: Headers,
    /// Body the request must carry; empty matches any body
    #[serde(default, alias = "Body", deserialize_with = "null_as_default")]
    pub body: String,
}

/// Canned response of an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    /// Status code
    #[serde(alias = "Code")]
    pub code: u16,
    /// Response body
    #[serde(default, alias = "Body", deserialize_with = "null_as_default")]
    pub body: String,
    /// Response headers
    #[serde(default, alias = "Headers", deserialize_with = "null_as_default")]
    pub headers: Headers,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            code: 200,
            body: String::new(),
            headers: Headers::new(),
        }
    }
}

/// A request received by the mock server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceivedRequest {
    /// Path plus query string as received
    pub uri: String,
    /// HTTP method
    pub method: String,
    /// Received headers (lowercase names)
    pub headers: Headers,
    /// Body decoded as UTF-8 (lossy)
    pub body: String,
    /// 受信時刻
    pub received_at: DateTime<Utc>,
}

fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

impl Request {
    /// Returns true if `received` satisfies this descriptor.
    ///
    /// Method is compared case-insensitively and the URI exactly. Every
    /// declared header must be present with the same value, and a declared
    /// body must match byte for byte.
    pub fn matches(&self, received: &ReceivedRequest) -> bool {
        if !self.method.eq_ignore_ascii_case(&received.method) || self.uri != received.uri {
            return false;
        }

        let headers_match = self
            .headers
            .iter()
            .all(|(name, value)| header_value(&received.headers, name) == Some(value.as_str()));
        if !headers_match {
            return false;
        }

        self.body.is_empty() || self.body == received.body
    }
}

impl Response {
    /// Returns the value of a header, ignoring name case.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.headers, name)
    }

    /// True when the declared content-type is a JSON media type.
    pub fn declares_json(&self) -> bool {
        self.header("content-type")
            .map(|value| value.to_ascii_lowercase().contains("json"))
            .unwrap_or(false)
    }
}

impl FakeEndpoint {
    /// Checks that the definition can be served and replayed.
    pub fn validate(&self) -> CommonResult<()> {
        if self.name.trim().is_empty() {
            return Err(CommonError::Validation(format!(
                "endpoint for '{}' has no name",
                self.request.uri
            )));
        }

        if !self.request.uri.starts_with('/') {
            return Err(CommonError::Validation(format!(
                "{}: uri '{}' must start with '/'",
                self.name, self.request.uri
            )));
        }

        let method = self.request.method.to_ascii_uppercase();
        if !KNOWN_METHODS.contains(&method.as_str()) {
            return Err(CommonError::Validation(format!(
                "{}: unsupported method '{}'",
                self.name, self.request.method
            )));
        }

        if !(100..=999).contains(&self.response.code) {
            return Err(CommonError::Validation(format!(
                "{}: invalid status code {}",
                self.name, self.response.code
            )));
        }

        if self.response.declares_json() && !self.response.body.is_empty() {
            serde_json::from_str::<serde_json::Value>(&self.response.body).map_err(|e| {
                CommonError::Validation(format!(
                    "{}: response body is declared as JSON but does not parse: {}",
                    self.name, e
                ))
            })?;
        }

        Ok(())
    }
}

impl fmt::Display for FakeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.name,
            self.request.method.to_ascii_uppercase(),
            self.request.uri
        )
    }
}
