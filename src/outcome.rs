//! Deferred-failure outcome of a computation.
//!
//! An [`Outcome`] is either `Succeeded(value)` or `Failed(reason)`, never both and never neither.
//! It is fixed for life once constructed; combinators consume it and build a new one.
//!
//! Semantics:
//! - [`Outcome::generate`] runs a fallible producer once and captures its failure.
//! - [`Outcome::map`] runs the transform only on success. A failure returned by the transform
//!   becomes the new outcome's reason; an existing failure is carried through unchanged.
//! - [`Outcome::get`] hands the captured failure back as `Err` for `?` propagation.
//! - [`Outcome::get_or_handle`], [`Outcome::consume`] and [`Outcome::map_to_optional`] route a
//!   failure to the caller's handler instead.
//!
//! Example
//! ```rust
//! use verdict::{Failure, Outcome};
//!
//! let port = Outcome::generate(|| "8080".parse::<u16>())
//!     .map(|p| if p >= 1024 { Ok(p) } else { Err(Failure::msg("privileged port")) });
//! assert!(port.succeeded());
//! assert_eq!(port.get().unwrap(), 8080);
//!
//! let bad = Outcome::generate(|| "http".parse::<u16>()).map(|p| Ok::<_, Failure>(p + 1));
//! assert!(bad.failed());
//! assert!(bad.get_or_handle(|f: &Failure| eprintln!("ignored: {f}")).is_none());
//! ```

use crate::error::{ContractViolation, Failure};
use crate::handler::FailureHandler;
use std::fmt;

/// Either a produced value or the failure that prevented it.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Succeeded(T),
    Failed(Failure),
}

impl<T> Outcome<T> {
    /// A succeeded outcome holding `value`.
    pub fn succeed(value: T) -> Self {
        Outcome::Succeeded(value)
    }

    /// A failed outcome holding `reason`.
    pub fn fail(reason: impl Into<Failure>) -> Self {
        Outcome::Failed(reason.into())
    }

    /// Success from an optional value; `None` is a [`ContractViolation::MissingValue`].
    pub fn try_succeed(value: Option<T>) -> Result<Self, ContractViolation> {
        value.map(Outcome::Succeeded).ok_or(ContractViolation::MissingValue)
    }

    /// Failure from an optional reason; `None` is a [`ContractViolation::MissingReason`].
    pub fn try_fail(reason: Option<Failure>) -> Result<Self, ContractViolation> {
        reason.map(Outcome::Failed).ok_or(ContractViolation::MissingReason)
    }

    /// Build from a value/reason pair where exactly one side must be present.
    pub fn from_parts(data: Option<T>, error: Option<Failure>) -> Result<Self, ContractViolation> {
        match (data, error) {
            (Some(value), None) => Ok(Outcome::Succeeded(value)),
            (None, Some(reason)) => Ok(Outcome::Failed(reason)),
            (Some(_), Some(_)) => Err(ContractViolation::BothPresent),
            (None, None) => Err(ContractViolation::MissingValue),
        }
    }

    /// Run `producer` once, capturing its failure.
    pub fn generate<E, F>(producer: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Failure>,
    {
        match producer() {
            Ok(value) => Outcome::Succeeded(value),
            Err(e) => Outcome::Failed(e.into()),
        }
    }

    /// True for `Succeeded`.
    pub fn succeeded(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    /// True for `Failed`; always the negation of [`Outcome::succeeded`].
    pub fn failed(&self) -> bool {
        !self.succeeded()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Succeeded(value) => Some(value),
            Outcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Succeeded(_) => None,
            Outcome::Failed(reason) => Some(reason),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Succeeded(value) => Outcome::Succeeded(value),
            Outcome::Failed(reason) => Outcome::Failed(reason.clone()),
        }
    }

    /// The value, or the captured failure as `Err`.
    pub fn get(self) -> Result<T, Failure> {
        match self {
            Outcome::Succeeded(value) => Ok(value),
            Outcome::Failed(reason) => Err(reason),
        }
    }

    /// The value, or `None` after passing the failure to `handler`.
    pub fn get_or_handle<H>(self, handler: H) -> Option<T>
    where
        H: FailureHandler,
    {
        match self {
            Outcome::Succeeded(value) => Some(value),
            Outcome::Failed(reason) => {
                handler.handle(&reason);
                None
            }
        }
    }

    /// Run exactly one of `on_value` / `on_failure`.
    pub fn consume<V, H>(self, on_value: V, on_failure: H)
    where
        V: FnOnce(T),
        H: FailureHandler,
    {
        match self {
            Outcome::Succeeded(value) => on_value(value),
            Outcome::Failed(reason) => on_failure.handle(&reason),
        }
    }

    /// Apply a fallible transform to the value; its failure becomes the new reason.
    pub fn map<R, E, F>(self, transform: F) -> Outcome<R>
    where
        F: FnOnce(T) -> Result<R, E>,
        E: Into<Failure>,
    {
        match self {
            Outcome::Succeeded(value) => Outcome::generate(|| transform(value)),
            Outcome::Failed(reason) => Outcome::Failed(reason),
        }
    }

    /// Chain a step that itself produces an outcome.
    pub fn and_then<R, F>(self, next: F) -> Outcome<R>
    where
        F: FnOnce(T) -> Outcome<R>,
    {
        match self {
            Outcome::Succeeded(value) => next(value),
            Outcome::Failed(reason) => Outcome::Failed(reason),
        }
    }

    /// Transform the value, or hand the failure to `handler` and return `None`.
    ///
    /// `transform` is not guarded: a panic inside it propagates to the caller.
    pub fn map_to_optional<R, F, H>(self, transform: F, handler: H) -> Option<R>
    where
        F: FnOnce(T) -> R,
        H: FailureHandler,
    {
        match self {
            Outcome::Succeeded(value) => Some(transform(value)),
            Outcome::Failed(reason) => {
                handler.handle(&reason);
                None
            }
        }
    }

    /// Same as [`Outcome::get`].
    pub fn into_result(self) -> Result<T, Failure> {
        self.get()
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Failure>,
{
    fn from(result: Result<T, E>) -> Self {
        Outcome::generate(|| result)
    }
}

impl<T> From<Outcome<T>> for Result<T, Failure> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.get()
    }
}

/// Values compare by equality; failures compare by identity.
impl<T: PartialEq> PartialEq for Outcome<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Outcome::Succeeded(a), Outcome::Succeeded(b)) => a == b,
            (Outcome::Failed(a), Outcome::Failed(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded(value) => write!(f, "Succeeded({})", value),
            Outcome::Failed(reason) => write!(f, "Failed({})", reason),
        }
    }
}
