//! Within-tolerance matching.
//!
//! The bound is inclusive: a difference of exactly the interval's magnitude
//! matches.

use std::sync::Arc;

use crate::convert::FieldConverter;
use crate::error::{MatcherError, Result};
use crate::format::Formatter;
use crate::interval::{ensure_supported, Interval, Measurable};
use crate::matcher::{Matcher, TemporalMatcher};
use crate::reference::ZonedWrapper;
use crate::temporal::Temporal;
use crate::zone::Zone;

struct Within<T, F, D> {
    interval: Interval,
    converter: FieldConverter<T, F>,
    expected: ZonedWrapper<F>,
    formatter: Arc<D>,
}

impl<T, F, D> Within<T, F, D>
where
    T: Temporal,
    F: Measurable,
{
    fn difference(&self, actual: &T) -> (F, i64) {
        let actual = self.converter.convert(actual, self.expected.effective_zone());
        let difference = self.interval.difference(&actual, &self.expected.resolve());
        (actual, difference)
    }
}

impl<T, F, D> TemporalMatcher<T> for Within<T, F, D>
where
    T: Temporal,
    F: Measurable,
    D: Formatter<F> + 'static,
{
    fn matches(&self, actual: &T) -> bool {
        let (_, difference) = self.difference(actual);
        difference <= self.interval.magnitude()
    }

    fn describe_expectation(&self) -> String {
        format!(
            "the date is within {} of {}",
            self.interval,
            self.formatter.describe(&self.expected.resolve())
        )
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        let (actual, difference) = self.difference(actual);
        format!(
            "the date is {} and {} different",
            self.formatter.describe(&actual),
            self.interval.unit().quantity(difference)
        )
    }

    fn rebind(&self, zone: Zone) -> Matcher<T> {
        Matcher::new(Within {
            interval: self.interval,
            converter: self.converter.clone(),
            expected: self.expected.rebind(zone),
            formatter: Arc::clone(&self.formatter),
        })
    }
}

/// Build a within-tolerance matcher.
///
/// # Errors
///
/// [`MatcherError::UnsupportedUnit`] when `F` cannot be measured in the
/// interval's unit, [`MatcherError::ZoneRequired`] when the converter needs a
/// zone the wrapper lacks, [`MatcherError::MultiValuedReference`] when the
/// wrapper holds a set.
pub fn make_within_matcher<T, F, D>(
    interval: Interval,
    converter: FieldConverter<T, F>,
    expected: ZonedWrapper<F>,
    formatter: Arc<D>,
) -> Result<Matcher<T>>
where
    T: Temporal,
    F: Measurable,
    D: Formatter<F> + 'static,
{
    ensure_supported::<F>(interval.unit())?;
    converter.ensure_zone(expected.effective_zone())?;
    if expected.reference().is_multi_valued() {
        return Err(MatcherError::MultiValuedReference("within matcher"));
    }
    tracing::debug!(
        %interval,
        field = converter.field().label(),
        representation = T::REPRESENTATION.name(),
        "built within matcher"
    );
    Ok(Matcher::new(Within {
        interval,
        converter,
        expected,
        formatter,
    }))
}
