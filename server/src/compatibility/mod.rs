//! 互換性チェッカー
//!
//! モック定義のリクエストを実サーバーに送信し、実際のレスポンスが
//! モックの約束と一致するかをエンドポイントごとに検証する。
//!
//! - ステータスコードは完全一致
//! - ボディは双方がJSONならば構造比較（キー順序・空白は無視）、それ以外は文字列一致
//! - ヘッダー比較はオプション（デフォルト無効）

use crate::error::{MockError, MockResult};
use futures::{stream, StreamExt};
use mockingjay_common::config::CheckerConfig;
use mockingjay_common::types::FakeEndpoint;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Why an endpoint failed its check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The request never produced a response (refused, timeout, DNS...)
    Transport {
        /// Client error text
        error: String,
    },
    /// Status codes differ
    Status {
        /// Declared status
        expected: u16,
        /// Status returned by the real server
        actual: u16,
    },
    /// Bodies differ
    Body {
        /// Declared body
        expected: String,
        /// Body returned by the real server
        actual: String,
    },
    /// A declared header is missing or differs
    Header {
        /// Header name
        name: String,
        /// Declared value
        expected: String,
        /// Value returned by the real server, if any
        actual: Option<String>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { error } => write!(f, "request failed: {}", error),
            Self::Status { expected, actual } => {
                write!(f, "status mismatch: expected {}, got {}", expected, actual)
            }
            Self::Body { expected, actual } => {
                write!(f, "body mismatch: expected {}, got {}", expected, actual)
            }
            Self::Header {
                name,
                expected,
                actual: Some(actual),
            } => write!(
                f,
                "header '{}' mismatch: expected '{}', got '{}'",
                name, expected, actual
            ),
            Self::Header {
                name,
                expected,
                actual: None,
            } => write!(f, "header '{}' missing: expected '{}'", name, expected),
        }
    }
}

/// Outcome of checking one endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Endpoint name
    pub name: String,
    /// HTTP method
    pub method: String,
    /// Request URI
    pub uri: String,
    /// Everything that did not match; empty when compatible
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    fn new(endpoint: &FakeEndpoint, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            name: endpoint.name.clone(),
            method: endpoint.request.method.to_ascii_uppercase(),
            uri: endpoint.request.uri.clone(),
            diagnostics,
        }
    }

    /// True when the real server honoured the mock.
    pub fn is_compatible(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_compatible() { "PASS" } else { "FAIL" };
        write!(f, "{} {} ({} {})", verdict, self.name, self.method, self.uri)?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n    {}", diagnostic)?;
        }
        Ok(())
    }
}

/// Results of one compatibility run, in endpoint declaration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompatibilityReport {
    /// Per-endpoint results
    pub results: Vec<CheckResult>,
    /// Names of endpoints skipped because they opt out (`cdcdisabled`)
    pub skipped: Vec<String>,
}

impl CompatibilityReport {
    /// True only if every checked endpoint is compatible.
    pub fn is_compatible(&self) -> bool {
        self.results.iter().all(CheckResult::is_compatible)
    }

    /// Results that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|result| !result.is_compatible())
    }
}

impl fmt::Display for CompatibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{}", result)?;
        }
        for name in &self.skipped {
            writeln!(f, "SKIP {}", name)?;
        }
        let failed = self.failures().count();
        write!(
            f,
            "{} checked, {} passed, {} failed, {} skipped",
            self.results.len(),
            self.results.len() - failed,
            failed,
            self.skipped.len()
        )
    }
}

/// Compares two bodies semantically.
///
/// When both parse as JSON they are compared as values, so key order,
/// formatting and number spelling (`1` vs `1.0`) are irrelevant. Otherwise
/// the strings must be identical.
pub fn bodies_match(expected: &str, actual: &str) -> bool {
    match (
        serde_json::from_str::<Value>(expected),
        serde_json::from_str::<Value>(actual),
    ) {
        (Ok(expected), Ok(actual)) => values_match(&expected, &actual),
        _ => expected == actual,
    }
}

fn values_match(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(expected), Value::Number(actual)) => {
            expected == actual || expected.as_f64() == actual.as_f64()
        }
        (Value::Array(expected), Value::Array(actual)) => {
            expected.len() == actual.len()
                && expected
                    .iter()
                    .zip(actual)
                    .all(|(expected, actual)| values_match(expected, actual))
        }
        (Value::Object(expected), Value::Object(actual)) => {
            expected.len() == actual.len()
                && expected.iter().all(|(key, expected)| {
                    actual
                        .get(key)
                        .is_some_and(|actual| values_match(expected, actual))
                })
        }
        _ => expected == actual,
    }
}

/// Replays endpoint definitions against a real server.
#[derive(Clone)]
pub struct CompatibilityChecker {
    endpoints: Vec<FakeEndpoint>,
    client: Client,
    concurrency: usize,
    check_headers: bool,
}

impl CompatibilityChecker {
    /// Creates a checker with default settings.
    ///
    /// Every endpoint is validated here, before any request is sent.
    pub fn new(endpoints: Vec<FakeEndpoint>) -> MockResult<Self> {
        Self::from_config(endpoints, &CheckerConfig::default())
    }

    /// Creates a checker from explicit settings.
    pub fn from_config(endpoints: Vec<FakeEndpoint>, config: &CheckerConfig) -> MockResult<Self> {
        for endpoint in &endpoints {
            endpoint.validate()?;
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            endpoints,
            client,
            concurrency: config.concurrency.max(1),
            check_headers: config.check_headers,
        })
    }

    /// Enables comparison of declared response headers.
    pub fn with_header_check(mut self, enabled: bool) -> Self {
        self.check_headers = enabled;
        self
    }

    /// Checks every endpoint against `base_url` and returns the full report.
    ///
    /// Failures never stop the run; up to `concurrency` requests are in
    /// flight at once.
    pub async fn check(&self, base_url: &str) -> CompatibilityReport {
        let (skipped, checked): (Vec<&FakeEndpoint>, Vec<&FakeEndpoint>) =
            self.endpoints.iter().partition(|endpoint| endpoint.cdcdisabled);

        for endpoint in &skipped {
            debug!(endpoint = %endpoint, "Compatibility check disabled, skipping");
        }

        info!(
            base_url = %base_url,
            count = checked.len(),
            concurrency = self.concurrency,
            "Starting compatibility check"
        );

        let results: Vec<CheckResult> = stream::iter(checked)
            .map(|endpoint| self.check_endpoint(base_url, endpoint))
            .buffered(self.concurrency)
            .collect()
            .await;

        let report = CompatibilityReport {
            results,
            skipped: skipped.iter().map(|endpoint| endpoint.name.clone()).collect(),
        };

        let failure_count = report.failures().count();
        info!(
            success = report.results.len() - failure_count,
            failure = failure_count,
            "Compatibility check completed"
        );

        report
    }

    /// Checks every endpoint and returns the overall verdict.
    pub async fn check_compatibility(&self, base_url: &str) -> bool {
        self.check(base_url).await.is_compatible()
    }

    /// 単一エンドポイントのチェック
    pub async fn check_endpoint(&self, base_url: &str, endpoint: &FakeEndpoint) -> CheckResult {
        let url = format!("{}{}", base_url.trim_end_matches('/'), endpoint.request.uri);

        let method_name = endpoint.request.method.to_ascii_uppercase();
        let method = match Method::from_bytes(method_name.as_bytes()) {
            Ok(method) => method,
            Err(e) => {
                return CheckResult::new(
                    endpoint,
                    vec![Diagnostic::Transport {
                        error: e.to_string(),
                    }],
                )
            }
        };

        let mut request = self.client.request(method, &url);
        for (name, value) in &endpoint.request.headers {
            request = request.header(name, value);
        }
        if !endpoint.request.body.is_empty() {
            request = request.body(endpoint.request.body.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return self.transport_failure(endpoint, &url, e),
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.transport_failure(endpoint, &url, e),
        };

        let mut diagnostics = Vec::new();

        if status != endpoint.response.code {
            diagnostics.push(Diagnostic::Status {
                expected: endpoint.response.code,
                actual: status,
            });
        }

        if !bodies_match(&endpoint.response.body, &body) {
            diagnostics.push(Diagnostic::Body {
                expected: endpoint.response.body.clone(),
                actual: body,
            });
        }

        if self.check_headers {
            for (name, expected) in &endpoint.response.headers {
                let actual = headers
                    .get(name.as_str())
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                if actual.as_deref() != Some(expected.as_str()) {
                    diagnostics.push(Diagnostic::Header {
                        name: name.clone(),
                        expected: expected.clone(),
                        actual,
                    });
                }
            }
        }

        let result = CheckResult::new(endpoint, diagnostics);
        if result.is_compatible() {
            debug!(endpoint = %endpoint, "Endpoint is compatible");
        } else {
            for diagnostic in &result.diagnostics {
                warn!(endpoint = %endpoint, url = %url, "{}", diagnostic);
            }
        }
        result
    }

    fn transport_failure(
        &self,
        endpoint: &FakeEndpoint,
        url: &str,
        error: reqwest::Error,
    ) -> CheckResult {
        let error = MockError::from(error).to_string();
        warn!(
            endpoint = %endpoint,
            url = %url,
            error = %error,
            "Compatibility request failed"
        );
        CheckResult::new(endpoint, vec![Diagnostic::Transport { error }])
    }
}
