//! The matcher contract shared by every comparison algorithm.
//!
//! Concrete matchers are generic over the field they compare; [`Matcher`]
//! erases that so an assertion front end only ever sees `Matcher<T>` for the
//! representation `T` it holds. Matchers are immutable and `Send + Sync`:
//! build once, evaluate from any thread, rebind to get a new one.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::zone::Zone;

/// A predicate over values of representation `T` with mismatch diagnostics.
pub trait TemporalMatcher<T>: Send + Sync {
    fn matches(&self, actual: &T) -> bool;

    /// What a matching value looks like, e.g. "the date is after Tue, 04 Aug 2015".
    fn describe_expectation(&self) -> String;

    /// What was found instead, e.g. "the date is Mon, 03 Aug 2015".
    fn describe_mismatch(&self, actual: &T) -> String;

    /// An equivalent matcher with both sides observed in `zone`.
    ///
    /// Matchers over zone-naive fields return an equivalent matcher.
    fn rebind(&self, zone: Zone) -> Matcher<T>;
}

/// A shared, type-erased matcher.
pub struct Matcher<T> {
    inner: Arc<dyn TemporalMatcher<T>>,
}

impl<T: 'static> Matcher<T> {
    pub fn new<M: TemporalMatcher<T> + 'static>(matcher: M) -> Self {
        Self {
            inner: Arc::new(matcher),
        }
    }

    pub fn matches(&self, actual: &T) -> bool {
        self.inner.matches(actual)
    }

    pub fn describe_expectation(&self) -> String {
        self.inner.describe_expectation()
    }

    pub fn describe_mismatch(&self, actual: &T) -> String {
        self.inner.describe_mismatch(actual)
    }

    /// A new matcher observing both sides in `zone`. `self` is unchanged.
    pub fn rebind(&self, zone: Zone) -> Matcher<T> {
        self.inner.rebind(zone)
    }

    /// Evaluate against `actual`, producing the mismatch text on failure.
    pub fn evaluate(&self, actual: &T) -> MatchResult {
        if self.matches(actual) {
            MatchResult::accepted(self.describe_expectation())
        } else {
            MatchResult::rejected(self.describe_expectation(), self.describe_mismatch(actual))
        }
    }
}

impl<T> Clone for Matcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher")
            .field(&self.inner.describe_expectation())
            .finish()
    }
}

/// Outcome of a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub ok: bool,
    pub expectation: String,
    /// Present exactly when `ok` is false.
    pub mismatch: Option<String>,
}

impl MatchResult {
    pub fn accepted(expectation: String) -> Self {
        Self {
            ok: true,
            expectation,
            mismatch: None,
        }
    }

    pub fn rejected(expectation: String, mismatch: String) -> Self {
        Self {
            ok: false,
            expectation,
            mismatch: Some(mismatch),
        }
    }

    /// The conventional two-line assertion failure text, or `None` on success.
    pub fn failure_message(&self) -> Option<String> {
        self.mismatch
            .as_ref()
            .map(|mismatch| format!("Expected: {}\n     but: {}", self.expectation, mismatch))
    }
}

/// Render `values` as "a", "a or b", "a, b or c".
pub(crate) fn join_alternatives(values: &[String]) -> String {
    match values {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
