//! Request executor
//!
//! Issues one HTTP call at a time against the backend under test and turns
//! every outcome, including transport failures, into a `CallRecord`. The
//! `execute` path is total: it never returns an error, so a broken backend
//! shows up as failed records rather than an aborted run.

use std::time::{Duration, Instant};

use colored::Colorize;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::{json, Value};

use crate::common::{Error, Result};

use super::record::{CallRecord, Method};

/// Timeout for the connectivity preflight. Test calls themselves run with
/// the client's default timeout.
const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(5);

/// Classify an HTTP status as a passing call
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Issues HTTP calls against a fixed base URL
pub struct RequestExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl RequestExecutor {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend's swagger page before sending any test traffic.
    ///
    /// A non-200 response or a connection failure is a hard stop: there is no
    /// point issuing test calls against a server that is not up.
    pub async fn preflight(&self) -> Result<()> {
        let url = format!("{}/../swagger/index.html", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(PREFLIGHT_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::preflight(&url, e))?;

        if response.status().as_u16() != 200 {
            return Err(Error::preflight(
                &url,
                format!("unexpected status {}", response.status()),
            ));
        }

        Ok(())
    }

    /// Issue one call and classify the outcome.
    ///
    /// `token`, when present, is attached as a bearer credential. The
    /// response body is parsed as JSON; unparseable bodies are wrapped as
    /// `{"text": raw}` instead of failing the call.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> CallRecord {
        let url = format!("{}{}", self.base_url, endpoint);
        let started = Instant::now();

        let outcome = self.send(method, &url, body, query, token).await;
        let elapsed_seconds = started.elapsed().as_secs_f64();

        let record = match outcome {
            Ok((status_code, body)) => {
                let success = is_success_status(status_code);
                let error_message = if success {
                    None
                } else {
                    Some(
                        body.get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("Unknown error")
                            .to_string(),
                    )
                };

                CallRecord {
                    endpoint: endpoint.to_string(),
                    method,
                    status_code,
                    success,
                    elapsed_seconds,
                    error_message,
                    body: Some(body),
                }
            }
            Err(e) => CallRecord {
                endpoint: endpoint.to_string(),
                method,
                status_code: 0,
                success: false,
                elapsed_seconds,
                error_message: Some(e.to_string()),
                body: None,
            },
        };

        log_call(&record);
        record
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> reqwest::Result<(u16, Value)> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "text": text }));
        Ok((status, body))
    }
}

fn log_call(record: &CallRecord) {
    let verdict = if record.success {
        "✓ PASS".green().bold()
    } else {
        "✗ FAIL".red().bold()
    };

    println!(
        "  {} {} {} ({}) - {:.3}s",
        verdict,
        record.method,
        record.endpoint.dimmed(),
        record.status_code,
        record.elapsed_seconds
    );

    if let Some(error) = &record.error_message {
        println!("    {}", error.red());
    }
}
