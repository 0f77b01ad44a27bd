//! The outcome of a single HTTP call
//!
//! A `CallRecord` is created once by the executor and never mutated. The
//! harness appends every record to its result list, so the list length always
//! equals the number of calls attempted.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// HTTP method of a test call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Immutable record of one HTTP call's outcome
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// Endpoint path relative to the base URL, e.g. `/members/42`
    pub endpoint: String,
    pub method: Method,
    /// HTTP status, or 0 for transport-level failures
    pub status_code: u16,
    /// True iff the status was in [200, 300)
    pub success: bool,
    pub elapsed_seconds: f64,
    /// Backend `message` field for HTTP failures, or the transport error
    pub error_message: Option<String>,
    /// Parsed response body; raw text is wrapped as `{"text": ...}`
    pub body: Option<Value>,
}

impl CallRecord {
    /// Resource module this call belongs to: the first path segment of the
    /// endpoint (`/members/42` -> `members`), or `auth` for a bare path.
    pub fn module(&self) -> &str {
        self.endpoint
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("auth")
    }

    /// Look up a field under the response's `data` object
    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.body.as_ref()?.get("data")?.get(key)
    }

    /// Extract a string field from the response's `data` object
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data_field(key).and_then(Value::as_str)
    }

    /// Extract a numeric identifier from the response's `data` object
    pub fn data_id(&self, key: &str) -> Option<i64> {
        self.data_field(key).and_then(Value::as_i64)
    }
}
