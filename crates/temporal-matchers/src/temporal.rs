//! Temporal representations and the canonical field types extracted from them.
//!
//! Six representations are supported, each a `chrono` type:
//!
//! | Representation | Type | Zone policy |
//! |---|---|---|
//! | date | [`NaiveDate`] | ignored |
//! | date-time | [`NaiveDateTime`] | ignored |
//! | offset date-time | `DateTime<FixedOffset>` | intrinsic, overridable |
//! | zoned date-time | `DateTime<chrono_tz::Tz>` | intrinsic, overridable |
//! | instant | `DateTime<Utc>` | required |
//! | time | [`NaiveTime`] | ignored |
//!
//! Month and weekday are normalized to ISO numbering ([`MonthOfYear`],
//! [`DayOfWeek`]) so field comparisons never depend on which enumeration a
//! caller used to build the expected value.

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, Month, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::zone::Zone;

// ── Representations ─────────────────────────────────────────────────────────

/// Which of the six temporal shapes a value has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    Date,
    DateTime,
    OffsetDateTime,
    ZonedDateTime,
    Instant,
    Time,
}

impl Representation {
    pub fn name(self) -> &'static str {
        match self {
            Representation::Date => "date",
            Representation::DateTime => "date-time",
            Representation::OffsetDateTime => "offset date-time",
            Representation::ZonedDateTime => "zoned date-time",
            Representation::Instant => "instant",
            Representation::Time => "time",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a representation reacts to a bound zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZonePolicy {
    /// Carries no zone and has no instant semantics; a bound zone is ignored.
    Ignored,
    /// Carries its own zone, which a bound zone overrides.
    Intrinsic,
    /// A point on the UTC timeline; local fields need a bound zone.
    Required,
}

/// A temporal value the matchers can evaluate.
pub trait Temporal: Clone + fmt::Debug + Send + Sync + 'static {
    const REPRESENTATION: Representation;
    const ZONE_POLICY: ZonePolicy;
}

/// Values with a calendar date portion.
pub trait HasDate: Temporal {
    /// The calendar date as observed in `zone` (or the value's own zone).
    fn local_date(&self, zone: Option<&Zone>) -> NaiveDate;
}

/// Values with a wall-clock time portion.
pub trait HasTime: Temporal {
    /// The wall-clock time as observed in `zone` (or the value's own zone).
    fn local_time(&self, zone: Option<&Zone>) -> NaiveTime;
}

/// Values that denote a single point on the UTC timeline.
pub trait HasInstant: Temporal {
    fn instant(&self) -> DateTime<Utc>;
}

/// Wall clock of an instant-bearing value, in `zone` when given.
fn project<Z: TimeZone>(value: &DateTime<Z>, zone: Option<&Zone>) -> NaiveDateTime {
    match zone {
        Some(zone) => zone.local_date_time(&value.with_timezone(&Utc)),
        None => value.naive_local(),
    }
}

impl Temporal for NaiveDate {
    const REPRESENTATION: Representation = Representation::Date;
    const ZONE_POLICY: ZonePolicy = ZonePolicy::Ignored;
}

impl HasDate for NaiveDate {
    fn local_date(&self, _zone: Option<&Zone>) -> NaiveDate {
        *self
    }
}

impl Temporal for NaiveTime {
    const REPRESENTATION: Representation = Representation::Time;
    const ZONE_POLICY: ZonePolicy = ZonePolicy::Ignored;
}

impl HasTime for NaiveTime {
    fn local_time(&self, _zone: Option<&Zone>) -> NaiveTime {
        *self
    }
}

impl Temporal for NaiveDateTime {
    const REPRESENTATION: Representation = Representation::DateTime;
    const ZONE_POLICY: ZonePolicy = ZonePolicy::Ignored;
}

impl HasDate for NaiveDateTime {
    fn local_date(&self, _zone: Option<&Zone>) -> NaiveDate {
        self.date()
    }
}

impl HasTime for NaiveDateTime {
    fn local_time(&self, _zone: Option<&Zone>) -> NaiveTime {
        self.time()
    }
}

macro_rules! instant_representation {
    ($ty:ty, $repr:expr, $policy:expr) => {
        impl Temporal for $ty {
            const REPRESENTATION: Representation = $repr;
            const ZONE_POLICY: ZonePolicy = $policy;
        }

        impl HasDate for $ty {
            fn local_date(&self, zone: Option<&Zone>) -> NaiveDate {
                project(self, zone).date()
            }
        }

        impl HasTime for $ty {
            fn local_time(&self, zone: Option<&Zone>) -> NaiveTime {
                project(self, zone).time()
            }
        }

        impl HasInstant for $ty {
            fn instant(&self) -> DateTime<Utc> {
                self.with_timezone(&Utc)
            }
        }
    };
}

instant_representation!(
    DateTime<FixedOffset>,
    Representation::OffsetDateTime,
    ZonePolicy::Intrinsic
);
instant_representation!(
    DateTime<Tz>,
    Representation::ZonedDateTime,
    ZonePolicy::Intrinsic
);
// Without a bound zone an instant is read on the UTC wall clock. Matchers that
// need local fields refuse to build without a zone, so this only shows up in
// direct calls.
instant_representation!(DateTime<Utc>, Representation::Instant, ZonePolicy::Required);

// ── Canonical field types ───────────────────────────────────────────────────

/// Month of year, ISO numbering (January = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthOfYear(u8);

impl MonthOfYear {
    /// Returns `None` outside 1–12.
    pub fn new(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number as u8))
    }

    pub fn number(self) -> u32 {
        self.0 as u32
    }

    pub fn to_month(self) -> Month {
        // 1..=12 by construction
        Month::try_from(self.0).unwrap_or(Month::January)
    }
}

impl From<Month> for MonthOfYear {
    fn from(month: Month) -> Self {
        Self(month.number_from_month() as u8)
    }
}

impl fmt::Display for MonthOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_month().name())
    }
}

/// Day of week, ISO numbering (Monday = 1, Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    /// Returns `None` outside 1–7.
    pub fn new(number: u32) -> Option<Self> {
        (1..=7).contains(&number).then_some(Self(number as u8))
    }

    pub fn number(self) -> u32 {
        self.0 as u32
    }

    pub fn to_weekday(self) -> Weekday {
        match self.0 {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    pub fn is_weekend(self) -> bool {
        self.0 >= 6
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        Self(weekday.number_from_monday() as u8)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.to_weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        };
        f.write_str(name)
    }
}

// ── Calendar arithmetic ─────────────────────────────────────────────────────

/// Whether `year` has a 366th day. Years chrono cannot represent report false.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_yo_opt(year, 366).is_some()
}

/// Number of days in `month` of `year`, or 0 when chrono has no such month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .unwrap_or(0)
}

/// Number of days in `year`.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Length of the month containing `date`.
pub(crate) fn month_length(date: &NaiveDate) -> u32 {
    days_in_month(date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2016));
        assert!(is_leap_year(2012));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2015));
        assert!(!is_leap_year(2013));
        assert!(!is_leap_year(1900));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2015, 8), 31);
        assert_eq!(days_in_month(2015, 9), 30);
        assert_eq!(days_in_month(2015, 2), 28);
        assert_eq!(days_in_month(2016, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(month_length(&date(2000, 2, 10)), 29);
    }

    #[test]
    fn test_days_in_month_agrees_with_chrono() {
        for year in [1900, 1999, 2000, 2015, 2016] {
            for month in 1..=12 {
                let last = date(year, month, days_in_month(year, month));
                assert_eq!(last.succ_opt().unwrap().day(), 1, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_days_in_month_outside_calendar() {
        assert_eq!(days_in_month(2015, 0), 0);
        assert_eq!(days_in_month(2015, 13), 0);
        assert_eq!(days_in_month(i32::MAX, 1), 0);
        assert!(!is_leap_year(i32::MAX));
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(2016), 366);
        assert_eq!(days_in_year(2015), 365);
    }

    #[test]
    fn test_day_of_week_iso_numbering() {
        assert_eq!(DayOfWeek::from(Weekday::Mon).number(), 1);
        assert_eq!(DayOfWeek::from(Weekday::Sun).number(), 7);
        assert_eq!(DayOfWeek::new(3).unwrap().to_weekday(), Weekday::Wed);
        assert!(DayOfWeek::new(0).is_none());
        assert!(DayOfWeek::new(8).is_none());
        assert_eq!(DayOfWeek::from(Weekday::Sat).to_string(), "Saturday");
        assert!(DayOfWeek::from(Weekday::Sun).is_weekend());
        assert!(!DayOfWeek::from(Weekday::Fri).is_weekend());
    }

    #[test]
    fn test_month_of_year_numbering() {
        assert_eq!(MonthOfYear::from(Month::August).number(), 8);
        assert_eq!(MonthOfYear::new(12).unwrap().to_month(), Month::December);
        assert!(MonthOfYear::new(13).is_none());
        assert_eq!(MonthOfYear::new(8).unwrap().to_string(), "August");
    }

    #[test]
    fn test_offset_value_uses_own_zone_without_binding() {
        let dt = FixedOffset::east_opt(10 * 3600)
            .unwrap()
            .with_ymd_and_hms(2015, 8, 4, 1, 30, 0)
            .unwrap();
        assert_eq!(dt.local_date(None), date(2015, 8, 4));
        assert_eq!(dt.local_time(None).hour(), 1);
    }

    #[test]
    fn test_offset_value_viewed_in_bound_zone() {
        let dt = FixedOffset::east_opt(10 * 3600)
            .unwrap()
            .with_ymd_and_hms(2015, 8, 4, 1, 30, 0)
            .unwrap();
        let utc = Zone::utc();
        // 01:30 at +10:00 is 15:30 the previous day in UTC
        assert_eq!(dt.local_date(Some(&utc)), date(2015, 8, 3));
        assert_eq!(dt.local_time(Some(&utc)).hour(), 15);
    }

    #[test]
    fn test_zoned_value_viewed_in_other_region() {
        let dt = Tz::Europe__London.with_ymd_and_hms(2015, 8, 4, 12, 0, 0).unwrap();
        let tokyo = Zone::Region(Tz::Asia__Tokyo);
        // 12:00 BST = 11:00 UTC = 20:00 JST
        assert_eq!(dt.local_time(Some(&tokyo)).hour(), 20);
        assert_eq!(dt.local_time(None).hour(), 12);
    }

    #[test]
    fn test_naive_values_ignore_zone() {
        let dt = date(2015, 8, 4).and_hms_opt(23, 0, 0).unwrap();
        let tokyo = Zone::Region(Tz::Asia__Tokyo);
        assert_eq!(dt.local_date(Some(&tokyo)), date(2015, 8, 4));
        assert_eq!(dt.local_time(Some(&tokyo)).hour(), 23);
    }

    #[test]
    fn test_instant_representation() {
        let instant = Utc.with_ymd_and_hms(2015, 8, 4, 23, 0, 0).unwrap();
        assert_eq!(<DateTime<Utc> as Temporal>::ZONE_POLICY, ZonePolicy::Required);
        let tokyo = Zone::Region(Tz::Asia__Tokyo);
        assert_eq!(instant.local_date(Some(&tokyo)), date(2015, 8, 5));
        assert_eq!(instant.instant(), instant);
    }
}
