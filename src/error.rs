//! Failure types shared by outcomes, adapters and handlers.
//!
//! - [`Failure`] is the opaque "whatever went wrong" carried by a failed
//!   [`Outcome`](crate::Outcome) and handed to handlers. It is cheap to clone.
//! - [`EscalatedFailure`] is what an escalating adapter raises (as a panic
//!   payload) when no handler was supplied. Its `source()` is the original failure.
//!   [`install_panic_hook`] makes an uncaught escalation report that failure.
//! - [`ContractViolation`] reports a missing construction argument.
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Opaque, cloneable failure reason.
///
/// Anything that converts into `Box<dyn Error + Send + Sync>` converts into a `Failure`:
/// every `std::error::Error + Send + Sync + 'static`, the boxed error itself, and plain
/// `String`/`&str` messages. So `?` works inside fallible closures. Clones share the same underlying error;
/// use [`Failure::ptr_eq`] to check that a reason was carried through unchanged.
#[derive(Clone)]
pub struct Failure {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

impl Failure {
    /// Wrap an error value.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self { inner: Arc::new(error) }
    }

    /// Take over an already type-erased error. Downcasts still see the original type.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self { inner: Arc::from(error) }
    }

    /// Build a failure from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Borrow the wrapped error.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Attempt to view the wrapped error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Check whether the wrapped error is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.is::<E>()
    }

    /// Iterate the wrapped error followed by its `source()` chain.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        let head: &(dyn StdError + 'static) = self.inner.as_ref();
        std::iter::successors(Some(head), |&e| e.source())
    }

    /// The last error in the `source()` chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self.inner.as_ref();
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    /// True when both failures share the same underlying error.
    pub fn ptr_eq(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E> From<E> for Failure
where
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    fn from(error: E) -> Self {
        Failure::from_boxed(error.into())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Failure").field(&self.inner).finish()
    }
}

impl AsRef<dyn StdError + Send + Sync + 'static> for Failure {
    fn as_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.as_error()
    }
}

/// A failure raised past an adapter boundary because no handler was supplied.
///
/// Escalating adapters raise this with [`std::panic::panic_any`], so it can be
/// recovered from a `catch_unwind` payload with `downcast::<EscalatedFailure>()`.
#[derive(Debug, Clone)]
pub struct EscalatedFailure {
    failure: Failure,
}

impl EscalatedFailure {
    pub fn new(failure: Failure) -> Self {
        Self { failure }
    }

    /// The original failure.
    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    pub fn into_failure(self) -> Failure {
        self.failure
    }
}

impl fmt::Display for EscalatedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unhandled failure escalated: {}", self.failure)
    }
}

impl StdError for EscalatedFailure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let source: &(dyn StdError + 'static) = self.failure.as_error();
        Some(source)
    }
}

/// Raise `failure` wrapped in an [`EscalatedFailure`].
///
/// The panic payload is the `EscalatedFailure` itself, not a message. Recover it with
/// `catch_unwind(..).unwrap_err().downcast::<EscalatedFailure>()`, and call
/// [`install_panic_hook`] once at startup so an uncaught escalation prints its failure.
#[track_caller]
pub fn escalate(failure: Failure) -> ! {
    tracing::trace!(target: "verdict::adapter", failure = %failure, "escalating unhandled failure");
    std::panic::panic_any(EscalatedFailure::new(failure))
}

/// Render an escalation panic payload, or `None` for any other panic.
pub fn escalation_report(payload: &(dyn Any + Send)) -> Option<String> {
    payload.downcast_ref::<EscalatedFailure>().map(ToString::to_string)
}

/// Chain a panic hook that reports uncaught escalations with their failure and location.
///
/// Other panics go to the hook that was installed before.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| match escalation_report(info.payload()) {
        Some(report) => {
            let thread = std::thread::current();
            let name = thread.name().unwrap_or("<unnamed>");
            match info.location() {
                Some(location) => eprintln!("thread '{name}' panicked at {location}:\n{report}"),
                None => eprintln!("thread '{name}' panicked:\n{report}"),
            }
        }
        None => previous(info),
    }));
}

/// A required construction argument was absent.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// A success was requested without a value.
    #[error("outcome value must be present")]
    MissingValue,
    /// A failure was requested without a reason.
    #[error("outcome failure reason must be present")]
    MissingReason,
    /// Both a value and a failure reason were supplied.
    #[error("outcome cannot hold both a value and a failure reason")]
    BothPresent,
}
