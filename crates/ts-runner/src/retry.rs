//! Retry bookkeeping. Attempts are numbered from 1.

use ts_core::policy::RetryPolicy;

/// Check whether another attempt may follow attempt `attempt`.
pub fn should_retry(policy: &RetryPolicy, attempt: u32) -> bool {
    attempt < policy.max_attempts
}

pub fn is_last_attempt(policy: &RetryPolicy, attempt: u32) -> bool {
    !should_retry(policy, attempt)
}

/// Attempt numbers allowed by `policy`, in order.
pub fn attempts(policy: &RetryPolicy) -> impl Iterator<Item = u32> {
    1..=policy.max_attempts
}
