//! Minimum / maximum of a field within the actual value's own period.
//!
//! The legal range comes from the actual value, never from an expected one:
//! the last day of month is 31 for 2015-08-31 and 30 for 2015-09-30.

use std::sync::Arc;

use serde::Serialize;

use crate::convert::{FieldConverter, FieldRange};
use crate::error::Result;
use crate::format::Formatter;
use crate::matcher::{Matcher, TemporalMatcher};
use crate::reference::ZonedWrapper;
use crate::temporal::Temporal;
use crate::zone::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extremum {
    Minimum,
    Maximum,
}

impl Extremum {
    fn label(self) -> &'static str {
        match self {
            Extremum::Minimum => "minimum",
            Extremum::Maximum => "maximum",
        }
    }
}

struct ExtremumMatcher<T, F, D> {
    extremum: Extremum,
    converter: FieldConverter<T, F>,
    range: FieldRange<T, F>,
    binding: ZonedWrapper<()>,
    formatter: Arc<D>,
}

impl<T, F, D> ExtremumMatcher<T, F, D>
where
    T: Temporal,
    F: PartialEq + Clone,
{
    /// Converted field and the bound it should sit on.
    fn observe(&self, actual: &T) -> (F, F) {
        let zone = self.binding.effective_zone();
        let value = self.converter.convert(actual, zone);
        let range = self.range.range(actual, zone);
        let bound = match self.extremum {
            Extremum::Minimum => range.start().clone(),
            Extremum::Maximum => range.end().clone(),
        };
        (value, bound)
    }
}

impl<T, F, D> TemporalMatcher<T> for ExtremumMatcher<T, F, D>
where
    T: Temporal,
    F: PartialEq + Clone + Send + Sync + 'static,
    D: Formatter<F> + 'static,
{
    fn matches(&self, actual: &T) -> bool {
        let (value, bound) = self.observe(actual);
        value == bound
    }

    fn describe_expectation(&self) -> String {
        format!(
            "the date has the {} {}",
            self.extremum.label(),
            self.converter.field()
        )
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        let (value, bound) = self.observe(actual);
        format!(
            "the date has the {} {}, the {} is {}",
            self.converter.field(),
            self.formatter.describe(&value),
            self.extremum.label(),
            self.formatter.describe(&bound)
        )
    }

    fn rebind(&self, zone: Zone) -> Matcher<T> {
        Matcher::new(ExtremumMatcher {
            extremum: self.extremum,
            converter: self.converter.clone(),
            range: self.range.clone(),
            binding: self.binding.rebind(zone),
            formatter: Arc::clone(&self.formatter),
        })
    }
}

/// Build a matcher for the minimum (`is_max == false`) or maximum of a field.
///
/// # Errors
///
/// [`crate::MatcherError::ZoneRequired`] when the converter needs a zone the
/// binding lacks.
pub fn make_extremum_matcher<T, F, D>(
    is_max: bool,
    converter: FieldConverter<T, F>,
    range: FieldRange<T, F>,
    binding: ZonedWrapper<()>,
    formatter: Arc<D>,
) -> Result<Matcher<T>>
where
    T: Temporal,
    F: PartialEq + Clone + Send + Sync + 'static,
    D: Formatter<F> + 'static,
{
    converter.ensure_zone(binding.effective_zone())?;
    let extremum = if is_max {
        Extremum::Maximum
    } else {
        Extremum::Minimum
    };
    tracing::debug!(
        ?extremum,
        field = converter.field().label(),
        representation = T::REPRESENTATION.name(),
        "built extremum matcher"
    );
    Ok(Matcher::new(ExtremumMatcher {
        extremum,
        converter,
        range,
        binding,
        formatter,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;
    use crate::error::MatcherError;
    use crate::format::LocaleFormatter;
    use chrono::{DateTime, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
    use chrono_tz::Tz;

    fn fmt() -> Arc<LocaleFormatter> {
        Arc::new(LocaleFormatter::new(Locale::en_US))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn last_day_of_month() -> Matcher<NaiveDate> {
        make_extremum_matcher(
            true,
            convert::day_of_month(),
            convert::day_of_month_range(),
            ZonedWrapper::zone_only(None),
            fmt(),
        )
        .unwrap()
    }

    fn first_day_of_month() -> Matcher<NaiveDate> {
        make_extremum_matcher(
            false,
            convert::day_of_month(),
            convert::day_of_month_range(),
            ZonedWrapper::zone_only(None),
            fmt(),
        )
        .unwrap()
    }

    #[test]
    fn test_maximum_day_of_month_uses_own_month() {
        let matcher = last_day_of_month();
        assert!(matcher.matches(&date(2015, 8, 31)));
        assert!(matcher.matches(&date(2015, 9, 30)));
        assert!(matcher.matches(&date(2016, 2, 29)));
        assert!(!matcher.matches(&date(2015, 8, 1)));
        assert!(!matcher.matches(&date(2015, 8, 30)));
    }

    #[test]
    fn test_minimum_day_of_month() {
        let matcher = first_day_of_month();
        for month in 1..=12 {
            assert!(matcher.matches(&date(2015, month, 1)));
            assert!(!matcher.matches(&date(2015, month, 2)));
        }
    }

    #[test]
    fn test_extremum_messages() {
        let result = last_day_of_month().evaluate(&date(2015, 9, 1));
        assert_eq!(result.expectation, "the date has the maximum day of month");
        assert_eq!(
            result.mismatch.as_deref(),
            Some("the date has the day of month 1, the maximum is 30")
        );
    }

    #[test]
    fn test_maximum_hour_of_time() {
        let matcher = make_extremum_matcher(
            true,
            convert::hour::<NaiveTime>(),
            convert::hour_range(),
            ZonedWrapper::zone_only(None),
            fmt(),
        )
        .unwrap();
        assert!(matcher.matches(&NaiveTime::from_hms_opt(23, 0, 0).unwrap()));
        assert!(!matcher.matches(&NaiveTime::from_hms_opt(22, 59, 59).unwrap()));
    }

    #[test]
    fn test_instant_extremum_requires_zone() {
        let result = make_extremum_matcher(
            true,
            convert::day_of_month::<DateTime<Utc>>(),
            convert::day_of_month_range(),
            ZonedWrapper::zone_only(None),
            fmt(),
        );
        assert!(matches!(result, Err(MatcherError::ZoneRequired { .. })));
    }

    #[test]
    fn test_instant_extremum_rebinds() {
        // 2015-08-31T20:00Z: still the 31st in UTC, already September 1st in Tokyo
        let actual = Utc.with_ymd_and_hms(2015, 8, 31, 20, 0, 0).unwrap();
        let last_day = make_extremum_matcher(
            true,
            convert::day_of_month::<DateTime<Utc>>(),
            convert::day_of_month_range(),
            ZonedWrapper::zone_only(Some(Zone::utc())),
            fmt(),
        )
        .unwrap();
        assert!(last_day.matches(&actual));
        let in_tokyo = last_day.rebind(Zone::Region(Tz::Asia__Tokyo));
        assert!(!in_tokyo.matches(&actual));
        assert!(last_day.matches(&actual));
    }
}
