//! Guarded branches without an input value.
//!
//! Each [`AnyMatcher`] pairs a zero-argument condition with a lazy producer, which suits
//! ordered checks over several captured variables. Dispatch follows the same rules as
//! [`matcher::when`](crate::matcher::when): first true condition wins, later conditions and
//! producers never run, and no match yields `None`.
//!
//! Example
//! ```rust
//! use verdict::any_matcher::{when_any, AnyMatcher};
//!
//! let (amount, required) = (12, 5);
//! let verdict = when_any(&[
//!     AnyMatcher::satisfies(|| amount < 0, || "none"),
//!     AnyMatcher::satisfies(|| required > 10 && amount < 10, || "less"),
//!     AnyMatcher::satisfies(|| required < 10 && amount < 15, || "enough"),
//!     AnyMatcher::otherwise(|| "too much"),
//! ]);
//! assert_eq!(verdict, Some("enough"));
//! ```

use std::fmt;

type Condition<'a> = Box<dyn Fn() -> bool + Send + Sync + 'a>;
type Producer<'a, U> = Box<dyn Fn() -> U + Send + Sync + 'a>;

/// One `(condition, producer)` branch with no input.
pub struct AnyMatcher<'a, U> {
    condition: Condition<'a>,
    producer: Producer<'a, U>,
}

impl<'a, U> fmt::Debug for AnyMatcher<'a, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyMatcher")
            .field("condition", &"<condition>")
            .field("producer", &"<producer>")
            .finish()
    }
}

impl<'a, U: 'a> AnyMatcher<'a, U> {
    pub fn satisfies<C, P>(condition: C, producer: P) -> Self
    where
        C: Fn() -> bool + Send + Sync + 'a,
        P: Fn() -> U + Send + Sync + 'a,
    {
        Self { condition: Box::new(condition), producer: Box::new(producer) }
    }

    /// Always selected when reached.
    pub fn otherwise<P>(producer: P) -> Self
    where
        P: Fn() -> U + Send + Sync + 'a,
    {
        Self::satisfies(|| true, producer)
    }

    pub fn holds(&self) -> bool {
        (self.condition)()
    }

    pub fn produce(&self) -> U {
        (self.producer)()
    }
}

/// Return the result of the first branch whose condition holds.
pub fn when_any<U>(branches: &[AnyMatcher<'_, U>]) -> Option<U> {
    match branches.iter().position(AnyMatcher::holds) {
        Some(index) => {
            tracing::trace!(target: "verdict::any_matcher", branch = index, "branch selected");
            Some(branches[index].produce())
        }
        None => {
            tracing::trace!(target: "verdict::any_matcher", branches = branches.len(), "no branch matched");
            None
        }
    }
}
