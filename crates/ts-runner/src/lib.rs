//! ts-runner: classify, then notify the upstream with bounded retries.
//!
//! The upstream call is best-effort: its failures are logged and never reach
//! the caller or change the classification.

pub mod dispatch;
pub mod retry;
pub mod service;

pub use dispatch::{ExternalCall, RetryDispatcher, SimulatedUpstream};
pub use service::TaskService;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExternalCallError {
    #[error("upstream failure on attempt {attempt}: {message}")]
    Upstream { attempt: u32, message: String },
}
