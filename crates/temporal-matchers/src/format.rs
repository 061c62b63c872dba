//! Locale-aware descriptions of values and fields for mismatch text.
//!
//! Formatting is injected into matchers through [`Formatter`], so the
//! comparison algorithms never depend on a locale. [`LocaleFormatter`] is the
//! stock implementation, built on chrono's localized `strftime`.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Locale, NaiveDate, NaiveDateTime, NaiveTime, Utc,
};
use chrono_tz::Tz;

use crate::config::MatcherConfig;
use crate::error::{MatcherError, Result};
use crate::temporal::{DayOfWeek, MonthOfYear};

const DATE_PATTERN: &str = "%a, %d %b %Y";
const TIME_PATTERN: &str = "%I:%M:%S%.3f %p";
const DATE_TIME_PATTERN: &str = "%a, %d %b %Y %I:%M:%S%.3f %p";
const OFFSET_DATE_TIME_PATTERN: &str = "%a, %d %b %Y %I:%M:%S%.3f %p %:z";
const ZONED_DATE_TIME_PATTERN: &str = "%a, %d %b %Y %I:%M:%S%.3f %p %Z";

/// Describes values of type `V` for diagnostics.
pub trait Formatter<V: ?Sized>: Send + Sync {
    /// Full-precision description.
    fn describe(&self, value: &V) -> String;

    /// Description of the date portion alone.
    ///
    /// Values without a date portion return [`MatcherError::NotApplicable`],
    /// which is distinct from an empty description.
    fn describe_date(&self, value: &V) -> Result<String>;
}

/// Formats with `strftime` patterns localized for a [`Locale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl LocaleFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.locale())
    }

    /// Uses the host locale from the environment.
    pub fn host() -> Self {
        Self::from_config(&MatcherConfig::from_env())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn wall_clock(&self, value: &NaiveDateTime, pattern: &str) -> String {
        value
            .and_utc()
            .format_localized(pattern, self.locale)
            .to_string()
    }

    fn date(&self, value: &NaiveDate) -> String {
        self.wall_clock(&value.and_time(NaiveTime::MIN), DATE_PATTERN)
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::host()
    }
}

fn not_applicable(subject: &'static str) -> MatcherError {
    MatcherError::NotApplicable {
        operation: "date description",
        subject,
    }
}

impl Formatter<NaiveDate> for LocaleFormatter {
    fn describe(&self, value: &NaiveDate) -> String {
        self.date(value)
    }

    fn describe_date(&self, value: &NaiveDate) -> Result<String> {
        Ok(self.date(value))
    }
}

impl Formatter<NaiveDateTime> for LocaleFormatter {
    fn describe(&self, value: &NaiveDateTime) -> String {
        self.wall_clock(value, DATE_TIME_PATTERN)
    }

    fn describe_date(&self, value: &NaiveDateTime) -> Result<String> {
        Ok(self.date(&value.date()))
    }
}

impl Formatter<NaiveTime> for LocaleFormatter {
    fn describe(&self, value: &NaiveTime) -> String {
        self.wall_clock(&NaiveDate::MIN.and_time(*value), TIME_PATTERN)
    }

    fn describe_date(&self, _value: &NaiveTime) -> Result<String> {
        Err(not_applicable("time"))
    }
}

impl Formatter<DateTime<FixedOffset>> for LocaleFormatter {
    fn describe(&self, value: &DateTime<FixedOffset>) -> String {
        value
            .format_localized(OFFSET_DATE_TIME_PATTERN, self.locale)
            .to_string()
    }

    fn describe_date(&self, value: &DateTime<FixedOffset>) -> Result<String> {
        Ok(self.date(&value.date_naive()))
    }
}

impl Formatter<DateTime<Tz>> for LocaleFormatter {
    fn describe(&self, value: &DateTime<Tz>) -> String {
        value
            .format_localized(ZONED_DATE_TIME_PATTERN, self.locale)
            .to_string()
    }

    fn describe_date(&self, value: &DateTime<Tz>) -> Result<String> {
        Ok(self.date(&value.date_naive()))
    }
}

impl Formatter<DateTime<Utc>> for LocaleFormatter {
    fn describe(&self, value: &DateTime<Utc>) -> String {
        value
            .format_localized(ZONED_DATE_TIME_PATTERN, self.locale)
            .to_string()
    }

    fn describe_date(&self, value: &DateTime<Utc>) -> Result<String> {
        Ok(self.date(&value.date_naive()))
    }
}

impl Formatter<MonthOfYear> for LocaleFormatter {
    fn describe(&self, value: &MonthOfYear) -> String {
        match NaiveDate::from_ymd_opt(2000, value.number(), 1) {
            Some(first) => self.wall_clock(&first.and_time(NaiveTime::MIN), "%B"),
            None => value.to_string(),
        }
    }

    fn describe_date(&self, _value: &MonthOfYear) -> Result<String> {
        Err(not_applicable("month"))
    }
}

impl Formatter<DayOfWeek> for LocaleFormatter {
    fn describe(&self, value: &DayOfWeek) -> String {
        // 2024-01-01 is a Monday
        let day = NaiveDate::from_ymd_opt(2024, 1, 1)
            .map(|monday| monday + Duration::days(value.number() as i64 - 1));
        match day {
            Some(day) if DayOfWeek::from(day.weekday()) == *value => {
                self.wall_clock(&day.and_time(NaiveTime::MIN), "%A")
            }
            _ => value.to_string(),
        }
    }

    fn describe_date(&self, _value: &DayOfWeek) -> Result<String> {
        Err(not_applicable("day of week"))
    }
}

macro_rules! plain_field_formatter {
    ($($ty:ty),*) => {
        $(
            impl Formatter<$ty> for LocaleFormatter {
                fn describe(&self, value: &$ty) -> String {
                    value.to_string()
                }

                fn describe_date(&self, _value: &$ty) -> Result<String> {
                    Err(not_applicable("numeric field"))
                }
            }
        )*
    };
}

plain_field_formatter!(i32, u32, i64);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, TimeZone, Weekday};

    fn en() -> LocaleFormatter {
        LocaleFormatter::new(Locale::en_US)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_describe_date() {
        assert_eq!(en().describe(&date(2015, 8, 4)), "Tue, 04 Aug 2015");
    }

    #[test]
    fn test_describe_date_time() {
        let dt = date(2015, 8, 4).and_hms_milli_opt(12, 0, 1, 250).unwrap();
        assert_eq!(en().describe(&dt), "Tue, 04 Aug 2015 12:00:01.250 PM");
        assert_eq!(en().describe_date(&dt).unwrap(), "Tue, 04 Aug 2015");
    }

    #[test]
    fn test_describe_time() {
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(en().describe(&t), "09:05:00.000 AM");
    }

    #[test]
    fn test_describe_date_of_time_is_not_applicable() {
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert!(matches!(
            en().describe_date(&t),
            Err(MatcherError::NotApplicable { subject: "time", .. })
        ));
    }

    #[test]
    fn test_describe_offset_date_time() {
        let dt = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2015, 8, 4, 18, 30, 0)
            .unwrap();
        assert_eq!(en().describe(&dt), "Tue, 04 Aug 2015 06:30:00.000 PM +02:00");
        assert_eq!(en().describe_date(&dt).unwrap(), "Tue, 04 Aug 2015");
    }

    #[test]
    fn test_describe_zoned_date_time_uses_abbreviation() {
        let dt = Tz::America__New_York
            .with_ymd_and_hms(2015, 8, 4, 12, 0, 0)
            .unwrap();
        assert_eq!(en().describe(&dt), "Tue, 04 Aug 2015 12:00:00.000 PM EDT");
    }

    #[test]
    fn test_describe_instant() {
        let instant = Utc.with_ymd_and_hms(2015, 8, 4, 0, 0, 0).unwrap();
        assert_eq!(en().describe(&instant), "Tue, 04 Aug 2015 12:00:00.000 AM UTC");
    }

    #[test]
    fn test_describe_fields() {
        assert_eq!(en().describe(&MonthOfYear::from(Month::August)), "August");
        assert_eq!(en().describe(&DayOfWeek::from(Weekday::Sat)), "Saturday");
        assert_eq!(Formatter::<u32>::describe(&en(), &31), "31");
        assert!(Formatter::<i32>::describe_date(&en(), &2015).is_err());
    }

    #[test]
    fn test_locale_changes_names() {
        let fr = LocaleFormatter::new(Locale::fr_FR);
        assert_eq!(fr.describe(&MonthOfYear::from(Month::August)), "août");
        assert_eq!(fr.describe(&DayOfWeek::from(Weekday::Tue)), "mardi");
        assert_ne!(fr.describe(&date(2015, 8, 4)), en().describe(&date(2015, 8, 4)));
    }
}
