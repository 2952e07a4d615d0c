//! Failure handlers: what to do with a failure once an adapter or outcome has captured it.
//!
//! Any `Fn(&Failure)` closure is a handler. The named implementations cover the common cases
//! and keep tests deterministic (`RecordingHandler`).

use crate::error::{escalate, Failure};
use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use tracing::Level;

/// Receives a captured failure.
pub trait FailureHandler {
    fn handle(&self, failure: &Failure);
}

impl<F> FailureHandler for F
where
    F: Fn(&Failure),
{
    fn handle(&self, failure: &Failure) {
        self(failure)
    }
}

/// Drops the failure. Use only where losing the reason is acceptable.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreHandler;

impl FailureHandler for IgnoreHandler {
    fn handle(&self, _failure: &Failure) {}
}

/// Raises the failure as an [`EscalatedFailure`](crate::EscalatedFailure) from inside a handler slot.
#[derive(Debug, Default, Clone, Copy)]
pub struct EscalateHandler;

impl FailureHandler for EscalateHandler {
    #[track_caller]
    fn handle(&self, failure: &Failure) {
        escalate(failure.clone())
    }
}

/// Records failures as structured `tracing` events.
#[derive(Debug, Clone)]
pub struct LogHandler {
    level: Level,
    context: Cow<'static, str>,
}

impl LogHandler {
    pub fn new() -> Self {
        LogHandlerBuilder::new().build()
    }

    pub fn builder() -> LogHandlerBuilder {
        LogHandlerBuilder::new()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

impl Default for LogHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureHandler for LogHandler {
    fn handle(&self, failure: &Failure) {
        let context = self.context.as_ref();
        if self.level == Level::ERROR {
            tracing::error!(context, failure = %failure, "failure handled");
        } else if self.level == Level::WARN {
            tracing::warn!(context, failure = %failure, "failure handled");
        } else if self.level == Level::INFO {
            tracing::info!(context, failure = %failure, "failure handled");
        } else if self.level == Level::DEBUG {
            tracing::debug!(context, failure = %failure, "failure handled");
        } else {
            tracing::trace!(context, failure = %failure, "failure handled");
        }
    }
}

/// Builder for [`LogHandler`].
#[derive(Debug, Clone)]
pub struct LogHandlerBuilder {
    level: Level,
    context: Cow<'static, str>,
}

impl LogHandlerBuilder {
    /// Defaults: `WARN`, context `"unhandled failure"`.
    pub fn new() -> Self {
        Self { level: Level::WARN, context: Cow::Borrowed("unhandled failure") }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Label attached to every event, e.g. the operation name.
    pub fn context(mut self, context: impl Into<Cow<'static, str>>) -> Self {
        self.context = context.into();
        self
    }

    pub fn build(self) -> LogHandler {
        LogHandler { level: self.level, context: self.context }
    }
}

impl Default for LogHandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler that keeps every failure it receives. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    failures: Arc<Mutex<Vec<Failure>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<Failure> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.failures.lock().map(|f| f.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.clear();
        }
    }
}

impl FailureHandler for RecordingHandler {
    fn handle(&self, failure: &Failure) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure.clone());
        }
    }
}
