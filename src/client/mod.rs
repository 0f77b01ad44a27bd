//! HTTP request execution and per-call result records

pub mod executor;
pub mod record;

pub use executor::RequestExecutor;
pub use record::{CallRecord, Method};
