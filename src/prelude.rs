//! Convenient re-exports for common Verdict types.
pub use crate::{
    adapter::{
        try_catch, wrap_consumer, wrap_consumer_with_handler, wrap_function,
        wrap_function_with_handler, wrap_runnable, wrap_runnable_with_handler, wrap_supplier,
        wrap_supplier_with_handler, Adapter,
    },
    any_matcher::{when_any, AnyMatcher},
    error::{install_panic_hook, ContractViolation, EscalatedFailure, Failure},
    handler::{FailureHandler, IgnoreHandler, LogHandler, RecordingHandler},
    matcher::{when, when_value, Matcher, Tagged},
    outcome::Outcome,
    strategy::{Escalate, FailureStrategy, Handle},
};
