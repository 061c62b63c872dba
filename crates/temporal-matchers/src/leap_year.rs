//! Leap year check on the year field of the actual value.

use std::sync::Arc;

use crate::convert::FieldConverter;
use crate::error::Result;
use crate::format::Formatter;
use crate::matcher::{Matcher, TemporalMatcher};
use crate::reference::ZonedWrapper;
use crate::temporal::{is_leap_year, Temporal};
use crate::zone::Zone;

struct LeapYear<T, D> {
    converter: FieldConverter<T, i32>,
    binding: ZonedWrapper<()>,
    formatter: Arc<D>,
}

impl<T, D> TemporalMatcher<T> for LeapYear<T, D>
where
    T: Temporal,
    D: Formatter<i32> + 'static,
{
    fn matches(&self, actual: &T) -> bool {
        is_leap_year(self.converter.convert(actual, self.binding.effective_zone()))
    }

    fn describe_expectation(&self) -> String {
        "the date is in a leap year".to_string()
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        let year = self.converter.convert(actual, self.binding.effective_zone());
        format!("the date has the year {}", self.formatter.describe(&year))
    }

    fn rebind(&self, zone: Zone) -> Matcher<T> {
        Matcher::new(LeapYear {
            converter: self.converter.clone(),
            binding: self.binding.rebind(zone),
            formatter: Arc::clone(&self.formatter),
        })
    }
}

/// Build a leap year matcher over a year converter.
///
/// # Errors
///
/// [`crate::MatcherError::ZoneRequired`] when the converter needs a zone the
/// binding lacks.
pub fn make_leap_year_matcher<T, D>(
    converter: FieldConverter<T, i32>,
    binding: ZonedWrapper<()>,
    formatter: Arc<D>,
) -> Result<Matcher<T>>
where
    T: Temporal,
    D: Formatter<i32> + 'static,
{
    converter.ensure_zone(binding.effective_zone())?;
    tracing::debug!(
        representation = T::REPRESENTATION.name(),
        "built leap year matcher"
    );
    Ok(Matcher::new(LeapYear {
        converter,
        binding,
        formatter,
    }))
}
