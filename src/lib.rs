#![forbid(unsafe_code)]
#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # Verdict
//!
//! Small functional combinators for fallible Rust code.
//!
//! ## Features
//!
//! - **Outcomes** that capture a failure and defer handling until the caller asks
//! - **Adapters** that turn fallible closures into plain ones, escalating or handling failures
//! - **Handlers** for ignoring, logging, recording or escalating captured failures
//! - **Matchers** that dispatch over an ordered list of lazy branches
//!
//! ## Quick Start
//!
//! ```rust
//! use verdict::prelude::*;
//!
//! let branches = [
//!     Matcher::matches(0, || Outcome::fail(Failure::msg("empty"))),
//!     Matcher::otherwise(|| Outcome::generate(|| "42".parse::<u32>())),
//! ];
//!
//! let picked = when(&1, &branches).expect("fallback branch always matches");
//! let doubled = picked.map(|v| Ok::<_, Failure>(v * 2));
//! assert_eq!(doubled.get_or_handle(LogHandler::default()), Some(84));
//!
//! let mut checked_len = wrap_function(|s: &str| {
//!     if s.is_empty() { Err(Failure::msg("empty input")) } else { Ok(s.len()) }
//! });
//! assert_eq!(checked_len("abc"), 3);
//! ```

pub mod adapter;
pub mod any_matcher;
pub mod error;
pub mod handler;
pub mod matcher;
pub mod outcome;
pub mod prelude;
pub mod strategy;

// Re-exports
pub use adapter::{
    try_catch, wrap_consumer, wrap_consumer_with_handler, wrap_consumer_with_input_handler,
    wrap_function, wrap_function_with_handler, wrap_function_with_input_handler, wrap_runnable,
    wrap_runnable_with_handler, wrap_supplier, wrap_supplier_with_handler, Adapter,
};
pub use any_matcher::{when_any, AnyMatcher};
pub use error::{
    escalate, escalation_report, install_panic_hook, ContractViolation, EscalatedFailure, Failure,
};
pub use handler::{
    EscalateHandler, FailureHandler, IgnoreHandler, LogHandler, LogHandlerBuilder,
    RecordingHandler,
};
pub use matcher::{when, when_value, Matcher, Tagged};
pub use outcome::Outcome;
pub use strategy::{Escalate, FailureStrategy, Handle};
