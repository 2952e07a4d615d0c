//! Ordered value matching.
//!
//! [`when`] scans a list of [`Matcher`] branches against one input and returns the lazily
//! produced result of the first branch whose condition accepts it.
//!
//! Invariants:
//! - Branches are tried in the order given; the list is a priority list, not a set.
//! - Conditions after the first accepting branch are never evaluated.
//! - Only the selected branch's producer runs, so at most one producer side effect per dispatch.
//! - No match is a normal outcome (`None`). Append [`Matcher::otherwise`] to guarantee one.
//!
//! Example
//! ```rust
//! use verdict::matcher::{when, Matcher};
//!
//! let branches = [
//!     Matcher::satisfies(|x: &i32| *x < 0, || "none"),
//!     Matcher::satisfies(|x: &i32| *x < 10, || "some"),
//!     Matcher::otherwise(|| "many"),
//! ];
//! assert_eq!(when(&5, &branches), Some("some"));
//! assert_eq!(when(&-3, &branches), Some("none"));
//! assert_eq!(when(&50, &branches), Some("many"));
//! ```

use std::fmt;
use std::mem::{discriminant, Discriminant};

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + Send + Sync + 'a>;
type Producer<'a, U> = Box<dyn Fn() -> U + Send + Sync + 'a>;

/// Values that belong to one of a closed set of variants.
///
/// Used by [`Matcher::is_variant`] to match on the variant alone.
pub trait Tagged {
    type Tag: PartialEq;

    fn tag(&self) -> Self::Tag;
}

/// One `(condition, producer)` branch over inputs of type `T`.
pub struct Matcher<'a, T, U> {
    predicate: Predicate<'a, T>,
    producer: Producer<'a, U>,
}

impl<'a, T, U> fmt::Debug for Matcher<'a, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("predicate", &"<predicate>")
            .field("producer", &"<producer>")
            .finish()
    }
}

impl<'a, T: 'a, U: 'a> Matcher<'a, T, U> {
    /// Accepts inputs equal to `value`.
    pub fn matches<P>(value: T, producer: P) -> Self
    where
        T: PartialEq + Send + Sync,
        P: Fn() -> U + Send + Sync + 'a,
    {
        Self::satisfies(move |input| *input == value, producer)
    }

    /// Accepts inputs equal to any of `values`.
    pub fn matches_any<P>(values: Vec<T>, producer: P) -> Self
    where
        T: PartialEq + Send + Sync,
        P: Fn() -> U + Send + Sync + 'a,
    {
        Self::satisfies(move |input| values.iter().any(|v| v == input), producer)
    }

    /// Accepts inputs whose [`Tagged::tag`] equals `tag`.
    pub fn is_variant<P>(tag: T::Tag, producer: P) -> Self
    where
        T: Tagged,
        T::Tag: Send + Sync + 'a,
        P: Fn() -> U + Send + Sync + 'a,
    {
        Self::satisfies(move |input: &T| input.tag() == tag, producer)
    }

    /// Accepts inputs of the same enum variant as `sample`, ignoring variant data.
    pub fn same_variant_as<P>(sample: &T, producer: P) -> Self
    where
        P: Fn() -> U + Send + Sync + 'a,
    {
        let expected: Discriminant<T> = discriminant(sample);
        Self::satisfies(move |input| discriminant(input) == expected, producer)
    }

    pub fn satisfies<F, P>(predicate: F, producer: P) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'a,
        P: Fn() -> U + Send + Sync + 'a,
    {
        Self { predicate: Box::new(predicate), producer: Box::new(producer) }
    }

    /// Accepts every input.
    pub fn otherwise<P>(producer: P) -> Self
    where
        P: Fn() -> U + Send + Sync + 'a,
    {
        Self::satisfies(|_| true, producer)
    }

    pub fn accepts(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    pub fn produce(&self) -> U {
        (self.producer)()
    }
}

/// Dispatch `value` over `branches`, returning the first accepting branch's result.
pub fn when<T, U>(value: &T, branches: &[Matcher<'_, T, U>]) -> Option<U> {
    match branches.iter().position(|branch| branch.accepts(value)) {
        Some(index) => {
            tracing::trace!(target: "verdict::matcher", branch = index, "branch selected");
            Some(branches[index].produce())
        }
        None => {
            tracing::trace!(target: "verdict::matcher", branches = branches.len(), "no branch matched");
            None
        }
    }
}

/// Bind `branches` into a reusable dispatch function.
pub fn when_value<'a, T: 'a, U: 'a>(
    branches: Vec<Matcher<'a, T, U>>,
) -> impl Fn(&T) -> Option<U> + 'a {
    move |value| when(value, &branches)
}
