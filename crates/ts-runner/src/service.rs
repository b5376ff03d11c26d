//! TaskService: classify an utterance, then notify the upstream.

use crate::dispatch::{ExternalCall, RetryDispatcher, SimulatedUpstream};
use ts_classifier::Classifier;
use ts_core::policy::RetryPolicy;
use ts_core::task::TaskId;

#[derive(Debug, Clone)]
pub struct TaskService<'c, C> {
    classifier: Classifier<'c>,
    dispatcher: RetryDispatcher<C>,
}

impl Default for TaskService<'static, SimulatedUpstream> {
    fn default() -> Self {
        Self::with_upstream(SimulatedUpstream::default())
    }
}

impl<C: ExternalCall> TaskService<'static, C> {
    /// Built-in catalog, default retry policy, custom upstream.
    pub fn with_upstream(upstream: C) -> Self {
        Self::new(
            Classifier::default(),
            RetryDispatcher::new(RetryPolicy::default(), upstream),
        )
    }
}

impl<'c, C: ExternalCall> TaskService<'c, C> {
    pub fn new(classifier: Classifier<'c>, dispatcher: RetryDispatcher<C>) -> Self {
        Self {
            classifier,
            dispatcher,
        }
    }

    /// Map an utterance to a task. The upstream call runs only for a real
    /// task and cannot change the returned value.
    pub fn suggest_task<'t>(&self, utterance: impl Into<Option<&'t str>>) -> TaskId {
        let utterance = utterance.into();
        let result = self.classifier.classify_detailed(utterance);
        tracing::debug!(
            task = %result.task,
            span = ?result.span,
            patterns = result.patterns_evaluated,
            "classified utterance"
        );

        if let Some(text) = utterance {
            self.dispatcher.dispatch(&result.task, text);
        }
        result.task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExternalCallError;
    use std::cell::Cell;
    use ts_classifier::{PatternCatalog, PatternSpec};
    use ts_core::task::{CHECK_ORDER_STATUS, NO_TASK};

    /// Counting upstream that fails the first `fails` attempts.
    struct Flaky<'a> {
        fails: u32,
        calls: &'a Cell<u32>,
    }

    impl ExternalCall for Flaky<'_> {
        fn invoke(&self, _utterance: &str, attempt: u32) -> Result<(), ExternalCallError> {
            self.calls.set(self.calls.get() + 1);
            if attempt <= self.fails {
                return Err(ExternalCallError::Upstream {
                    attempt,
                    message: "simulated transient failure".into(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn retries_do_not_change_the_task() {
        let calls = Cell::new(0);
        let svc = TaskService::with_upstream(Flaky { fails: 2, calls: &calls });
        assert_eq!(svc.suggest_task("check order"), CHECK_ORDER_STATUS);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn exhausted_retries_still_return_the_task() {
        let calls = Cell::new(0);
        let svc = TaskService::with_upstream(Flaky { fails: 10, calls: &calls });
        assert_eq!(svc.suggest_task("track my order"), CHECK_ORDER_STATUS);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn no_match_never_calls_upstream() {
        let calls = Cell::new(0);
        let svc = TaskService::with_upstream(Flaky { fails: 0, calls: &calls });
        assert_eq!(svc.suggest_task("how to change my email"), NO_TASK);
        assert_eq!(svc.suggest_task(""), NO_TASK);
        assert_eq!(svc.suggest_task(None), NO_TASK);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn default_service_uses_simulated_upstream() {
        let svc = TaskService::default();
        assert_eq!(svc.suggest_task("please RESET password").as_str(), "ResetPasswordTask");
    }

    #[test]
    fn custom_catalog_and_policy() {
        let catalog = PatternCatalog::builder()
            .task("GreetTask", [PatternSpec::phrase("hello", "there")])
            .build()
            .unwrap();
        let calls = Cell::new(0);
        let svc = TaskService::new(
            Classifier::new(&catalog),
            RetryDispatcher::new(
                RetryPolicy::with_max_attempts(1),
                Flaky { fails: 5, calls: &calls },
            ),
        );
        assert_eq!(svc.suggest_task("well hello there").as_str(), "GreetTask");
        assert_eq!(calls.get(), 1);
    }
}
