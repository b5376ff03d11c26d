//! Retry-wrapped dispatcher: fire-and-forget upstream notification.

use crate::retry;
use crate::ExternalCallError;
use ts_core::policy::RetryPolicy;
use ts_core::task::TaskId;

/// The upstream operation invoked after a successful classification.
///
/// Any `Fn(&str, u32) -> Result<(), ExternalCallError>` works, which is how
/// tests script failure sequences.
pub trait ExternalCall {
    fn invoke(&self, utterance: &str, attempt: u32) -> Result<(), ExternalCallError>;
}

impl<F> ExternalCall for F
where
    F: Fn(&str, u32) -> Result<(), ExternalCallError>,
{
    fn invoke(&self, utterance: &str, attempt: u32) -> Result<(), ExternalCallError> {
        self(utterance, attempt)
    }
}

/// Deterministic stand-in for the upstream: fails the first
/// `failures_before_success` attempts, then succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedUpstream {
    failures_before_success: u32,
}

impl Default for SimulatedUpstream {
    /// Fails attempts 1 and 2, succeeds on 3.
    fn default() -> Self {
        Self::new(2)
    }
}

impl SimulatedUpstream {
    pub fn new(failures_before_success: u32) -> Self {
        Self {
            failures_before_success,
        }
    }
}

impl ExternalCall for SimulatedUpstream {
    fn invoke(&self, _utterance: &str, attempt: u32) -> Result<(), ExternalCallError> {
        if attempt <= self.failures_before_success {
            return Err(ExternalCallError::Upstream {
                attempt,
                message: "simulated upstream failure".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RetryDispatcher<C> {
    policy: RetryPolicy,
    call: C,
}

impl<C: ExternalCall> RetryDispatcher<C> {
    pub fn new(policy: RetryPolicy, call: C) -> Self {
        Self { policy, call }
    }

    /// Call the upstream for `task` until it succeeds or attempts run out.
    ///
    /// Never fails. `NO_TASK` makes zero attempts.
    pub fn dispatch(&self, task: &TaskId, utterance: &str) {
        if task.is_no_task() {
            tracing::debug!("No task matched, skipping external call");
            return;
        }

        let max = self.policy.max_attempts;
        for attempt in retry::attempts(&self.policy) {
            match self.call.invoke(utterance, attempt) {
                Ok(()) => {
                    tracing::info!(%task, attempt, "External call succeeded on attempt {attempt}");
                    return;
                }
                Err(e) if retry::is_last_attempt(&self.policy, attempt) => {
                    tracing::error!(%task, attempt, "External call failed after {max} attempts; continuing without it: {e}");
                }
                Err(e) => {
                    tracing::warn!(%task, attempt, "External call failed on attempt {attempt}/{max}: {e}");
                }
            }
        }
    }
}
