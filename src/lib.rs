//! Smoke-test harness for the gig-order management REST API
//!
//! Logs in against a running backend, walks every resource module through its
//! CRUD lifecycle, and writes a timestamped JSON report of every call made.

pub mod client;
pub mod common;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod session;

// Re-export commonly used types for tests
pub use client::{CallRecord, Method, RequestExecutor};
pub use common::{Error, Result};
pub use runner::{Credentials, Harness, RunOutcome};
