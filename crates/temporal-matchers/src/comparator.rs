//! Ordering comparators: after, before, same, same-or-before, same-or-after.
//!
//! "Same instant" and "same day" are both [`ComparisonKind::Same`]; they
//! differ only in the converter (identity vs. local date).

use std::sync::Arc;

use serde::Serialize;

use crate::convert::{Field, FieldConverter};
use crate::error::{MatcherError, Result};
use crate::format::Formatter;
use crate::matcher::{Matcher, TemporalMatcher};
use crate::reference::ZonedWrapper;
use crate::temporal::Temporal;
use crate::zone::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    After,
    Before,
    Same,
    SameOrBefore,
    SameOrAfter,
}

impl ComparisonKind {
    /// Whether `actual` stands in this relation to `expected`.
    ///
    /// Incomparable values (a partial order with no answer) never hold.
    pub fn holds<F: PartialOrd>(self, actual: &F, expected: &F) -> bool {
        match self {
            ComparisonKind::After => actual > expected,
            ComparisonKind::Before => actual < expected,
            ComparisonKind::Same => actual == expected,
            ComparisonKind::SameOrBefore => actual <= expected,
            ComparisonKind::SameOrAfter => actual >= expected,
        }
    }

    fn phrase(self, field: Field) -> String {
        let same = match field {
            Field::Value => "the same as".to_string(),
            other => format!("the same {} as", other.label()),
        };
        match self {
            ComparisonKind::After => "after".to_string(),
            ComparisonKind::Before => "before".to_string(),
            ComparisonKind::Same => same,
            ComparisonKind::SameOrBefore => format!("{same} or before"),
            ComparisonKind::SameOrAfter => format!("{same} or after"),
        }
    }
}

struct Comparator<T, F, D> {
    kind: ComparisonKind,
    converter: FieldConverter<T, F>,
    expected: ZonedWrapper<F>,
    formatter: Arc<D>,
}

impl<T, F, D> TemporalMatcher<T> for Comparator<T, F, D>
where
    T: Temporal,
    F: PartialOrd + Clone + Send + Sync + 'static,
    D: Formatter<F> + 'static,
{
    fn matches(&self, actual: &T) -> bool {
        let actual = self.converter.convert(actual, self.expected.effective_zone());
        self.kind.holds(&actual, &self.expected.resolve())
    }

    fn describe_expectation(&self) -> String {
        format!(
            "the date is {} {}",
            self.kind.phrase(self.converter.field()),
            self.formatter.describe(&self.expected.resolve())
        )
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        let actual = self.converter.convert(actual, self.expected.effective_zone());
        format!("the date is {}", self.formatter.describe(&actual))
    }

    fn rebind(&self, zone: Zone) -> Matcher<T> {
        Matcher::new(Comparator {
            kind: self.kind,
            converter: self.converter.clone(),
            expected: self.expected.rebind(zone),
            formatter: Arc::clone(&self.formatter),
        })
    }
}

/// Build an ordering comparator.
///
/// # Errors
///
/// [`MatcherError::ZoneRequired`] when the converter needs a zone the wrapper
/// lacks, [`MatcherError::MultiValuedReference`] when the wrapper holds a set.
pub fn make_comparator<T, F, D>(
    kind: ComparisonKind,
    converter: FieldConverter<T, F>,
    expected: ZonedWrapper<F>,
    formatter: Arc<D>,
) -> Result<Matcher<T>>
where
    T: Temporal,
    F: PartialOrd + Clone + Send + Sync + 'static,
    D: Formatter<F> + 'static,
{
    converter.ensure_zone(expected.effective_zone())?;
    if expected.reference().is_multi_valued() {
        return Err(MatcherError::MultiValuedReference("comparator"));
    }
    tracing::debug!(
        ?kind,
        field = converter.field().label(),
        representation = T::REPRESENTATION.name(),
        "built comparator"
    );
    Ok(Matcher::new(Comparator {
        kind,
        converter,
        expected,
        formatter,
    }))
}
