//! Failure-handling strategies used by [`Adapter`](crate::Adapter).
//!
//! A strategy settles the `Result` of one fallible call into whatever the adapted
//! operation returns:
//!
//! - [`Escalate`] returns the value itself and raises an
//!   [`EscalatedFailure`](crate::EscalatedFailure) on failure (fail-fast default).
//! - [`Handle`] returns `Some(value)`, or passes the failure to its handler and returns `None`.
//!
//! Invariant: `settle` invokes the handler at most once and never retries.

use crate::error::{escalate, Failure};
use crate::handler::FailureHandler;

/// Converts the result of a fallible call into the adapted operation's output.
pub trait FailureStrategy {
    /// What an adapted value-producing operation returns.
    type Output<T>;

    fn settle<T>(&self, result: Result<T, Failure>) -> Self::Output<T>;
}

/// Raise on failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct Escalate;

impl FailureStrategy for Escalate {
    type Output<T> = T;

    #[track_caller]
    fn settle<T>(&self, result: Result<T, Failure>) -> T {
        match result {
            Ok(value) => value,
            Err(failure) => escalate(failure),
        }
    }
}

/// Route failures to a handler and yield an absent result.
#[derive(Debug, Default, Clone, Copy)]
pub struct Handle<H>(pub H);

impl<H> Handle<H> {
    pub fn handler(&self) -> &H {
        &self.0
    }
}

impl<H> FailureStrategy for Handle<H>
where
    H: FailureHandler,
{
    type Output<T> = Option<T>;

    fn settle<T>(&self, result: Result<T, Failure>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(failure) => {
                tracing::trace!(target: "verdict::adapter", "failure routed to handler");
                self.0.handle(&failure);
                None
            }
        }
    }
}
