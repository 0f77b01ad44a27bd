//! Scenario runners
//!
//! Each submodule walks one resource module through its lifecycle: list the
//! collection, create an entity, then exercise detail/update/delete against
//! the created id. Dependent steps are skipped (with a warning, not a
//! failure) when creation did not succeed or did not return the expected id.

use serde_json::Value;
use tracing::warn;

use crate::client::{CallRecord, Method, RequestExecutor};
use crate::session::Session;

mod customers;
mod members;
mod order_categories;
mod operation_logs;
mod orders;
mod system_config;

pub use customers::customers;
pub use members::members;
pub use order_categories::order_categories;
pub use operation_logs::operation_logs;
pub use orders::orders;
pub use system_config::system_config;

/// Context handed to every scenario: the shared executor, the mutable
/// session, and the run's result list. One record is appended per call.
pub struct Ctx<'a> {
    executor: &'a RequestExecutor,
    pub session: &'a mut Session,
    records: &'a mut Vec<CallRecord>,
}

impl<'a> Ctx<'a> {
    pub fn new(
        executor: &'a RequestExecutor,
        session: &'a mut Session,
        records: &'a mut Vec<CallRecord>,
    ) -> Self {
        Self {
            executor,
            session,
            records,
        }
    }

    pub async fn get(&mut self, endpoint: &str, query: &[(&str, String)]) -> CallRecord {
        self.call(Method::Get, endpoint, None, query, true).await
    }

    pub async fn post(&mut self, endpoint: &str, body: Value) -> CallRecord {
        self.call(Method::Post, endpoint, Some(body), &[], true).await
    }

    /// POST without a bearer token; used for the login call only.
    pub async fn post_unauthed(&mut self, endpoint: &str, body: Value) -> CallRecord {
        self.call(Method::Post, endpoint, Some(body), &[], false).await
    }

    pub async fn put(&mut self, endpoint: &str, body: Value) -> CallRecord {
        self.call(Method::Put, endpoint, Some(body), &[], true).await
    }

    pub async fn delete(&mut self, endpoint: &str) -> CallRecord {
        self.call(Method::Delete, endpoint, None, &[], true).await
    }

    async fn call(
        &mut self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        query: &[(&str, String)],
        auth: bool,
    ) -> CallRecord {
        let token = if auth { self.session.token() } else { None };

        let record = self
            .executor
            .execute(method, endpoint, body.as_ref(), query, token)
            .await;

        self.records.push(record.clone());
        record
    }
}

/// The id of a just-created entity, or None when the creation call failed or
/// the response did not carry the expected field. The caller is expected to
/// skip dependent steps in the None case rather than abort.
pub fn created_id(record: &CallRecord, key: &str) -> Option<i64> {
    if !record.success {
        return None;
    }

    let id = record.data_id(key);
    if id.is_none() {
        warn!(
            "{} creation response did not contain '{}', skipping dependent steps",
            record.module(),
            key
        );
    }
    id
}

/// Seconds-resolution suffix for unique test accounts
pub(crate) fn unique_suffix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Today's date in the `YYYY-MM-DD` form the backend's filters expect
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
