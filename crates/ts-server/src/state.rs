//! Shared application state for the HTTP handlers.

use std::sync::Arc;
use ts_runner::{SimulatedUpstream, TaskService};

/// Shared state injected into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: TaskService<'static, SimulatedUpstream>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SimulatedUpstream::default())
    }
}

impl AppState {
    /// Built-in catalog, default retry policy.
    pub fn new(upstream: SimulatedUpstream) -> Self {
        Self {
            service: TaskService::with_upstream(upstream),
        }
    }
}

pub type SharedState = Arc<AppState>;
