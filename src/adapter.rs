//! Checked-operation adapters.
//!
//! Adapts a fallible operation (a closure returning `Result<_, E>`) into an operation of the
//! same shape that does not return `Result`, routing failures through a
//! [`FailureStrategy`].
//!
//! Shapes:
//! - supplier: `FnMut() -> Result<T, E>`
//! - function: `FnMut(I) -> Result<O, E>`
//! - consumer: `FnMut(I) -> Result<(), E>`
//! - runnable: `FnMut() -> Result<(), E>`
//!
//! Semantics:
//! - With [`Escalate`] (the default) value shapes return the bare value and a failure is raised
//!   as an [`EscalatedFailure`](crate::EscalatedFailure) whose cause is the original failure.
//! - With [`Handle`] value shapes return `Option`; a failure is passed to the handler exactly
//!   once and the call yields `None`. Consumer and runnable shapes return normally.
//! - Each adapted call invokes the wrapped operation exactly once.
//! - The `*_with_input_handler` functions sit outside [`FailureStrategy`]: their handler is an
//!   `FnMut(I, &Failure)` that also takes ownership of the failing input, so it cannot be a
//!   [`FailureHandler`]. They always handle and never escalate.
//!
//! Example
//! ```rust
//! use verdict::{Adapter, RecordingHandler};
//!
//! let parse = |s: &str| s.parse::<u16>();
//!
//! let mut strict = Adapter::escalating().function(parse);
//! assert_eq!(strict("80"), 80);
//!
//! let recorder = RecordingHandler::new();
//! let mut lenient = Adapter::handling(recorder.clone()).function(parse);
//! assert_eq!(lenient("eighty"), None);
//! assert_eq!(recorder.count(), 1);
//! ```

use crate::error::Failure;
use crate::handler::{FailureHandler, IgnoreHandler, LogHandler};
use crate::strategy::{Escalate, FailureStrategy, Handle};

/// Wraps fallible operations according to a failure strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct Adapter<S = Escalate> {
    strategy: S,
}

impl Adapter<Escalate> {
    /// Raise on failure.
    pub fn escalating() -> Self {
        Self::new(Escalate)
    }
}

impl<H> Adapter<Handle<H>>
where
    H: FailureHandler,
{
    /// Route failures to `handler`.
    pub fn handling(handler: H) -> Self {
        Self::new(Handle(handler))
    }
}

impl Adapter<Handle<LogHandler>> {
    /// Route failures to a default [`LogHandler`].
    pub fn logging() -> Self {
        Self::handling(LogHandler::default())
    }
}

impl Adapter<Handle<IgnoreHandler>> {
    /// Drop failures and yield absent results.
    pub fn ignoring() -> Self {
        Self::handling(IgnoreHandler)
    }
}

impl<S> Adapter<S>
where
    S: FailureStrategy,
{
    /// Adapter for an arbitrary strategy.
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Borrow the strategy, e.g. to inspect a handler.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Run a fallible thunk once and settle its result.
    ///
    /// An escalation raised here reports the caller's location.
    #[track_caller]
    pub fn call<T, E, F>(&self, operation: F) -> S::Output<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Failure>,
    {
        self.strategy.settle(operation().map_err(Into::into))
    }

    /// Adapt a fallible `FnMut() -> Result<T, E>`.
    pub fn supplier<T, E, F>(self, mut operation: F) -> impl FnMut() -> S::Output<T>
    where
        F: FnMut() -> Result<T, E>,
        E: Into<Failure>,
    {
        move || self.strategy.settle(operation().map_err(Into::into))
    }

    /// Adapt a fallible `FnMut(I) -> Result<O, E>`.
    pub fn function<I, O, E, F>(self, mut operation: F) -> impl FnMut(I) -> S::Output<O>
    where
        F: FnMut(I) -> Result<O, E>,
        E: Into<Failure>,
    {
        move |input| self.strategy.settle(operation(input).map_err(Into::into))
    }

    /// Adapt a fallible `FnMut(I) -> Result<(), E>`.
    pub fn consumer<I, E, F>(self, mut operation: F) -> impl FnMut(I)
    where
        F: FnMut(I) -> Result<(), E>,
        E: Into<Failure>,
    {
        move |input| {
            let _ = self.strategy.settle(operation(input).map_err(Into::into));
        }
    }

    /// Adapt a fallible `FnMut() -> Result<(), E>`.
    pub fn runnable<E, F>(self, mut operation: F) -> impl FnMut()
    where
        F: FnMut() -> Result<(), E>,
        E: Into<Failure>,
    {
        move || {
            let _ = self.strategy.settle(operation().map_err(Into::into));
        }
    }

    /// Use a value-returning fallible function where a consumer is expected; the output is dropped.
    pub fn function_as_consumer<I, O, E, F>(self, mut operation: F) -> impl FnMut(I)
    where
        F: FnMut(I) -> Result<O, E>,
        E: Into<Failure>,
    {
        move |input| {
            let _ = self.strategy.settle(operation(input).map_err(Into::into));
        }
    }
}

/// Escalating supplier: returns the value or raises an [`EscalatedFailure`](crate::EscalatedFailure).
pub fn wrap_supplier<T, E, F>(operation: F) -> impl FnMut() -> T
where
    F: FnMut() -> Result<T, E>,
    E: Into<Failure>,
{
    Adapter::escalating().supplier(operation)
}

/// Escalating function.
pub fn wrap_function<I, O, E, F>(operation: F) -> impl FnMut(I) -> O
where
    F: FnMut(I) -> Result<O, E>,
    E: Into<Failure>,
{
    Adapter::escalating().function(operation)
}

/// Escalating consumer.
pub fn wrap_consumer<I, E, F>(operation: F) -> impl FnMut(I)
where
    F: FnMut(I) -> Result<(), E>,
    E: Into<Failure>,
{
    Adapter::escalating().consumer(operation)
}

/// Escalating runnable.
pub fn wrap_runnable<E, F>(operation: F) -> impl FnMut()
where
    F: FnMut() -> Result<(), E>,
    E: Into<Failure>,
{
    Adapter::escalating().runnable(operation)
}

/// Supplier that yields `None` after passing a failure to `handler`.
pub fn wrap_supplier_with_handler<T, E, F, H>(operation: F, handler: H) -> impl FnMut() -> Option<T>
where
    F: FnMut() -> Result<T, E>,
    E: Into<Failure>,
    H: FailureHandler,
{
    Adapter::handling(handler).supplier(operation)
}

/// Function that yields `None` after passing a failure to `handler`.
pub fn wrap_function_with_handler<I, O, E, F, H>(
    operation: F,
    handler: H,
) -> impl FnMut(I) -> Option<O>
where
    F: FnMut(I) -> Result<O, E>,
    E: Into<Failure>,
    H: FailureHandler,
{
    Adapter::handling(handler).function(operation)
}

/// Consumer that passes a failure to `handler` and returns normally.
pub fn wrap_consumer_with_handler<I, E, F, H>(operation: F, handler: H) -> impl FnMut(I)
where
    F: FnMut(I) -> Result<(), E>,
    E: Into<Failure>,
    H: FailureHandler,
{
    Adapter::handling(handler).consumer(operation)
}

/// Runnable that passes a failure to `handler` and returns normally.
pub fn wrap_runnable_with_handler<E, F, H>(operation: F, handler: H) -> impl FnMut()
where
    F: FnMut() -> Result<(), E>,
    E: Into<Failure>,
    H: FailureHandler,
{
    Adapter::handling(handler).runnable(operation)
}

/// Like [`wrap_function_with_handler`], but the handler also receives the input that failed.
///
/// The operation borrows its input so the handler can take ownership of it afterwards.
pub fn wrap_function_with_input_handler<I, O, E, F, H>(
    mut operation: F,
    mut handler: H,
) -> impl FnMut(I) -> Option<O>
where
    F: FnMut(&I) -> Result<O, E>,
    E: Into<Failure>,
    H: FnMut(I, &Failure),
{
    move |input| match operation(&input) {
        Ok(output) => Some(output),
        Err(e) => {
            let failure: Failure = e.into();
            tracing::trace!(target: "verdict::adapter", "failure routed to input handler");
            handler(input, &failure);
            None
        }
    }
}

/// Consumer counterpart of [`wrap_function_with_input_handler`].
pub fn wrap_consumer_with_input_handler<I, E, F, H>(mut operation: F, mut handler: H) -> impl FnMut(I)
where
    F: FnMut(&I) -> Result<(), E>,
    E: Into<Failure>,
    H: FnMut(I, &Failure),
{
    move |input| {
        if let Err(e) = operation(&input) {
            let failure: Failure = e.into();
            tracing::trace!(target: "verdict::adapter", "failure routed to input handler");
            handler(input, &failure);
        }
    }
}

/// Run `operation` once; on failure hand the reason to `handler` and return `None`.
pub fn try_catch<T, E, F, H>(operation: F, handler: H) -> Option<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<Failure>,
    H: FailureHandler,
{
    Adapter::handling(handler).call(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EscalatedFailure;
    use crate::handler::RecordingHandler;
    use std::fmt;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TestError(String);

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "TestError: {}", self.0)
        }
    }

    impl std::error::Error for TestError {}

    fn escalated_from(payload: Box<dyn std::any::Any + Send>) -> EscalatedFailure {
        *payload.downcast::<EscalatedFailure>().expect("escalated failure payload")
    }

    #[test]
    fn supplier_success_is_unchanged() {
        let mut supplier = wrap_supplier(|| Ok::<_, TestError>(42));
        assert_eq!(supplier(), 42);
        assert_eq!(supplier(), 42);
    }

    #[test]
    fn function_success_is_unchanged() {
        let mut double = wrap_function(|x: i32| Ok::<_, TestError>(x * 2));
        assert_eq!(double(21), 42);
    }

    #[test]
    fn consumer_and_runnable_success_run_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut consumer = wrap_consumer(move |v: u8| {
            sink.lock().unwrap().push(v);
            Ok::<_, TestError>(())
        });
        consumer(1);
        consumer(2);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);

        let runs = AtomicUsize::new(0);
        let mut runnable = wrap_runnable(|| {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok::<_, TestError>(())
        });
        runnable();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn supplier_escalates_with_original_failure() {
        let mut supplier = wrap_supplier(|| Err::<u32, _>(TestError("offline".into())));
        let payload = catch_unwind(AssertUnwindSafe(|| supplier())).unwrap_err();
        let escalated = escalated_from(payload);
        assert_eq!(
            escalated.failure().downcast_ref::<TestError>(),
            Some(&TestError("offline".into()))
        );
        let source = std::error::Error::source(&escalated).unwrap();
        assert_eq!(source.to_string(), "TestError: offline");
    }

    #[test]
    fn function_escalates() {
        let mut parse = wrap_function(|s: &str| s.parse::<i64>());
        assert_eq!(parse("12"), 12);
        let payload = catch_unwind(AssertUnwindSafe(|| parse("twelve"))).unwrap_err();
        assert!(escalated_from(payload).failure().is::<std::num::ParseIntError>());
    }

    #[test]
    fn consumer_and_runnable_escalate() {
        let mut consumer = wrap_consumer(|_: ()| Err(TestError("c".into())));
        let payload = catch_unwind(AssertUnwindSafe(|| consumer(()))).unwrap_err();
        assert!(escalated_from(payload).failure().to_string().contains("c"));

        let mut runnable = wrap_runnable(|| Err(TestError("r".into())));
        let payload = catch_unwind(AssertUnwindSafe(|| runnable())).unwrap_err();
        assert!(escalated_from(payload).failure().is::<TestError>());
    }

    #[test]
    fn handler_variants_yield_none_and_call_handler_once() {
        let recorder = RecordingHandler::new();
        let attempts = AtomicUsize::new(0);
        let mut supplier = wrap_supplier_with_handler(
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<u8, _>(TestError("s".into()))
            },
            recorder.clone(),
        );
        assert_eq!(supplier(), None);
        assert_eq!(attempts.load(Ordering::SeqCst), 1, "operation must not be retried");
        assert_eq!(recorder.count(), 1);

        let mut function = wrap_function_with_handler(
            |x: u8| if x > 0 { Ok(x) } else { Err(TestError("zero".into())) },
            recorder.clone(),
        );
        assert_eq!(function(3), Some(3));
        assert_eq!(function(0), None);
        assert_eq!(recorder.count(), 2);
    }

    #[test]
    fn consumer_and_runnable_handlers_return_normally() {
        let recorder = RecordingHandler::new();
        let mut consumer =
            wrap_consumer_with_handler(|_: u8| Err(TestError("c".into())), recorder.clone());
        consumer(1);
        let mut runnable = wrap_runnable_with_handler(|| Err(TestError("r".into())), recorder.clone());
        runnable();
        let messages: Vec<String> = recorder.failures().iter().map(|f| f.to_string()).collect();
        assert_eq!(messages, vec!["TestError: c", "TestError: r"]);
    }

    #[test]
    fn handler_not_called_on_success() {
        let recorder = RecordingHandler::new();
        let mut runnable = wrap_runnable_with_handler(|| Ok::<_, TestError>(()), recorder.clone());
        runnable();
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn input_handlers_receive_failing_input() {
        let failed_inputs = Arc::new(Mutex::new(Vec::new()));
        let sink = failed_inputs.clone();
        let mut parse = wrap_function_with_input_handler(
            |s: &String| s.parse::<u32>(),
            move |input: String, failure: &Failure| {
                sink.lock().unwrap().push((input, failure.to_string()));
            },
        );
        assert_eq!(parse("5".to_string()), Some(5));
        assert_eq!(parse("five".to_string()), None);

        let recorded = failed_inputs.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, "five");
        assert!(recorded[0].1.contains("invalid digit"));
    }

    #[test]
    fn consumer_input_handler_receives_input() {
        let rejected = Arc::new(Mutex::new(Vec::new()));
        let sink = rejected.clone();
        let mut store = wrap_consumer_with_input_handler(
            |v: &i32| if *v >= 0 { Ok(()) } else { Err(TestError("negative".into())) },
            move |v: i32, _: &Failure| sink.lock().unwrap().push(v),
        );
        store(4);
        store(-4);
        assert_eq!(*rejected.lock().unwrap(), vec![-4]);
    }

    #[test]
    fn function_as_consumer_drops_output() {
        let calls = AtomicUsize::new(0);
        let mut consumer = Adapter::escalating().function_as_consumer(|x: usize| {
            calls.fetch_add(x, Ordering::SeqCst);
            Ok::<_, TestError>(x * 10)
        });
        consumer(2);
        consumer(3);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn function_as_consumer_escalates_failure() {
        let mut consumer = Adapter::escalating()
            .function_as_consumer(|x: u8| if x > 0 { Ok(x) } else { Err(TestError("zero".into())) });
        consumer(1);
        let payload = catch_unwind(AssertUnwindSafe(|| consumer(0))).unwrap_err();
        assert_eq!(
            escalated_from(payload).failure().downcast_ref::<TestError>(),
            Some(&TestError("zero".into()))
        );
    }

    #[test]
    fn function_as_consumer_hands_failure_to_handler() {
        let recorder = RecordingHandler::new();
        let mut consumer = Adapter::handling(recorder.clone())
            .function_as_consumer(|s: &str| s.parse::<u8>());
        consumer("7");
        assert_eq!(recorder.count(), 0);
        consumer("seven");
        consumer("300");
        assert_eq!(recorder.count(), 2);
        assert!(recorder.failures().iter().all(|f| f.is::<std::num::ParseIntError>()));
    }

    #[test]
    fn boxed_errors_flow_through_adapters() {
        type BoxError = Box<dyn std::error::Error + Send + Sync>;

        let recorder = RecordingHandler::new();
        let mut read = wrap_supplier_with_handler(
            || -> Result<u8, BoxError> {
                Err(Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, "no file")))
            },
            recorder.clone(),
        );
        assert_eq!(read(), None);
        let failures = recorder.failures();
        assert!(failures[0].is::<std::io::Error>());
        assert_eq!(failures[0].to_string(), "no file");

        let mut strict = wrap_function(|s: &str| -> Result<usize, BoxError> {
            if s.is_empty() {
                Err("empty".into())
            } else {
                Ok(s.len())
            }
        });
        assert_eq!(strict("abc"), 3);
        let payload = catch_unwind(AssertUnwindSafe(|| strict(""))).unwrap_err();
        assert_eq!(escalated_from(payload).failure().to_string(), "empty");
    }

    #[test]
    fn try_catch_runs_once() {
        let recorder = RecordingHandler::new();
        assert_eq!(try_catch(|| Ok::<_, TestError>("ok"), recorder.clone()), Some("ok"));
        assert_eq!(try_catch(|| Err::<&str, _>(TestError("no".into())), recorder.clone()), None);
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn ignoring_adapter_swallows() {
        let mut supplier = Adapter::ignoring().supplier(|| Err::<u8, _>(TestError("x".into())));
        assert_eq!(supplier(), None);
    }

    #[test]
    fn logging_adapter_uses_default_log_handler() {
        let adapter = Adapter::logging();
        assert_eq!(adapter.strategy().handler().context(), "unhandled failure");
        assert_eq!(adapter.call(|| Ok::<_, TestError>(1)), Some(1));
    }

    #[test]
    fn failure_type_itself_is_accepted() {
        let adapter = Adapter::handling(|_: &Failure| {});
        assert_eq!(adapter.call(|| Err::<u8, _>(Failure::msg("plain"))), None);
    }

    #[test]
    fn default_adapter_escalates() {
        let adapter: Adapter = Adapter::default();
        assert_eq!(adapter.call(|| Ok::<_, TestError>(9)), 9);
    }
}
