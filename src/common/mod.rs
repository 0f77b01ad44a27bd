//! Common utilities shared across the harness

pub mod error;
pub mod logging;

pub use error::{Error, Result};
