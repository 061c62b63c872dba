//! Field converters: pure projections of a temporal value onto a comparable field.
//!
//! A [`FieldConverter`] is the only place representation-specific knowledge
//! lives. The matcher algorithms see nothing but the converted field `F`, so
//! one implementation of "is after" or "is maximum" serves every
//! representation.
//!
//! Converters never read the system clock and are total over their domain.
//! Representations without a date portion (time-only) do not implement
//! [`HasDate`], so asking one for a date field does not compile.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveTime, Timelike, Utc, Weekday};

use crate::error::{MatcherError, Result};
use crate::temporal::{
    days_in_year, month_length, DayOfWeek, HasDate, HasInstant, HasTime, MonthOfYear, Temporal,
    ZonePolicy,
};
use crate::zone::Zone;

/// The field a converter extracts, used to label diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The value itself.
    Value,
    Instant,
    Day,
    Time,
    Year,
    Month,
    DayOfMonth,
    DayOfYear,
    DayOfWeek,
    Hour,
    Minute,
    Second,
    Millisecond,
    Custom(&'static str),
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Value => "value",
            Field::Instant => "instant",
            Field::Day => "day",
            Field::Time => "time",
            Field::Year => "year",
            Field::Month => "month",
            Field::DayOfMonth => "day of month",
            Field::DayOfYear => "day of year",
            Field::DayOfWeek => "day of week",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::Millisecond => "millisecond",
            Field::Custom(label) => label,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type ConvertFn<T, F> = dyn Fn(&T, Option<&Zone>) -> F + Send + Sync;
type RangeFn<T, F> = dyn Fn(&T, Option<&Zone>) -> RangeInclusive<F> + Send + Sync;

/// Projects a value of representation `T` onto a field `F`.
pub struct FieldConverter<T, F> {
    field: Field,
    zone_sensitive: bool,
    func: Arc<ConvertFn<T, F>>,
}

impl<T: Temporal, F> FieldConverter<T, F> {
    /// Wrap a conversion function.
    ///
    /// `zone_sensitive` marks converters whose output depends on the zone the
    /// value is observed in (local date, hour, ...). Instant-like values then
    /// need a bound zone before a matcher using this converter can be built.
    pub fn new<C>(field: Field, zone_sensitive: bool, func: C) -> Self
    where
        C: Fn(&T, Option<&Zone>) -> F + Send + Sync + 'static,
    {
        Self {
            field,
            zone_sensitive,
            func: Arc::new(func),
        }
    }

    pub fn convert(&self, value: &T, zone: Option<&Zone>) -> F {
        (self.func)(value, zone)
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn is_zone_sensitive(&self) -> bool {
        self.zone_sensitive
    }

    pub fn requires_zone(&self) -> bool {
        self.zone_sensitive && T::ZONE_POLICY == ZonePolicy::Required
    }

    /// Fail when this converter needs a zone and `zone` is absent.
    pub fn ensure_zone(&self, zone: Option<&Zone>) -> Result<()> {
        if zone.is_none() && self.requires_zone() {
            tracing::debug!(
                field = self.field.label(),
                representation = T::REPRESENTATION.name(),
                "rejecting matcher: zone required"
            );
            return Err(MatcherError::ZoneRequired {
                representation: T::REPRESENTATION,
                field: self.field.label(),
            });
        }
        Ok(())
    }
}

impl<T, F> Clone for FieldConverter<T, F> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            zone_sensitive: self.zone_sensitive,
            func: Arc::clone(&self.func),
        }
    }
}

impl<T, F> fmt::Debug for FieldConverter<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConverter")
            .field("field", &self.field)
            .field("zone_sensitive", &self.zone_sensitive)
            .finish_non_exhaustive()
    }
}

/// The legal range of a field within the period of a given value.
pub struct FieldRange<T, F> {
    func: Arc<RangeFn<T, F>>,
}

impl<T: Temporal, F> FieldRange<T, F> {
    pub fn new<R>(func: R) -> Self
    where
        R: Fn(&T, Option<&Zone>) -> RangeInclusive<F> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    pub fn range(&self, value: &T, zone: Option<&Zone>) -> RangeInclusive<F> {
        (self.func)(value, zone)
    }
}

impl<T, F> Clone for FieldRange<T, F> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

// ── Built-in converters ─────────────────────────────────────────────────────

/// The value itself. Zoned values compare by instant.
pub fn identity<T: Temporal>() -> FieldConverter<T, T> {
    FieldConverter::new(Field::Value, false, |value: &T, _| value.clone())
}

/// The point on the UTC timeline.
pub fn instant<T: HasInstant>() -> FieldConverter<T, DateTime<Utc>> {
    FieldConverter::new(Field::Instant, false, |value: &T, _| value.instant())
}

/// The calendar date in the bound zone.
pub fn local_date<T: HasDate>() -> FieldConverter<T, NaiveDate> {
    FieldConverter::new(Field::Day, true, |value: &T, zone| value.local_date(zone))
}

/// The wall-clock time in the bound zone.
pub fn local_time<T: HasTime>() -> FieldConverter<T, NaiveTime> {
    FieldConverter::new(Field::Time, true, |value: &T, zone| value.local_time(zone))
}

pub fn year<T: HasDate>() -> FieldConverter<T, i32> {
    FieldConverter::new(Field::Year, true, |value: &T, zone| {
        value.local_date(zone).year()
    })
}

pub fn month<T: HasDate>() -> FieldConverter<T, MonthOfYear> {
    FieldConverter::new(Field::Month, true, |value: &T, zone| {
        let month = value.local_date(zone).month();
        MonthOfYear::new(month).unwrap_or(MonthOfYear::from(Month::January))
    })
}

pub fn day_of_month<T: HasDate>() -> FieldConverter<T, u32> {
    FieldConverter::new(Field::DayOfMonth, true, |value: &T, zone| {
        value.local_date(zone).day()
    })
}

pub fn day_of_year<T: HasDate>() -> FieldConverter<T, u32> {
    FieldConverter::new(Field::DayOfYear, true, |value: &T, zone| {
        value.local_date(zone).ordinal()
    })
}

pub fn day_of_week<T: HasDate>() -> FieldConverter<T, DayOfWeek> {
    FieldConverter::new(Field::DayOfWeek, true, |value: &T, zone| {
        DayOfWeek::from(value.local_date(zone).weekday())
    })
}

pub fn hour<T: HasTime>() -> FieldConverter<T, u32> {
    FieldConverter::new(Field::Hour, true, |value: &T, zone| {
        value.local_time(zone).hour()
    })
}

pub fn minute<T: HasTime>() -> FieldConverter<T, u32> {
    FieldConverter::new(Field::Minute, true, |value: &T, zone| {
        value.local_time(zone).minute()
    })
}

pub fn second<T: HasTime>() -> FieldConverter<T, u32> {
    FieldConverter::new(Field::Second, true, |value: &T, zone| {
        value.local_time(zone).second()
    })
}

pub fn millisecond<T: HasTime>() -> FieldConverter<T, u32> {
    FieldConverter::new(Field::Millisecond, true, |value: &T, zone| {
        // leap seconds carry nanos past 1e9
        (value.local_time(zone).nanosecond() % 1_000_000_000) / 1_000_000
    })
}

// ── Built-in ranges ─────────────────────────────────────────────────────────

/// 1 to the length of the value's own month (28–31).
pub fn day_of_month_range<T: HasDate>() -> FieldRange<T, u32> {
    FieldRange::new(|value: &T, zone| 1..=month_length(&value.local_date(zone)))
}

/// 1 to the length of the value's own year (365 or 366).
pub fn day_of_year_range<T: HasDate>() -> FieldRange<T, u32> {
    FieldRange::new(|value: &T, zone| 1..=days_in_year(value.local_date(zone).year()))
}

pub fn month_range<T: HasDate>() -> FieldRange<T, MonthOfYear> {
    FieldRange::new(|_: &T, _| {
        MonthOfYear::from(Month::January)..=MonthOfYear::from(Month::December)
    })
}

pub fn day_of_week_range<T: HasDate>() -> FieldRange<T, DayOfWeek> {
    FieldRange::new(|_: &T, _| DayOfWeek::from(Weekday::Mon)..=DayOfWeek::from(Weekday::Sun))
}

pub fn hour_range<T: HasTime>() -> FieldRange<T, u32> {
    FieldRange::new(|_: &T, _| 0..=23)
}

pub fn minute_range<T: HasTime>() -> FieldRange<T, u32> {
    FieldRange::new(|_: &T, _| 0..=59)
}

pub fn second_range<T: HasTime>() -> FieldRange<T, u32> {
    FieldRange::new(|_: &T, _| 0..=59)
}

pub fn millisecond_range<T: HasTime>() -> FieldRange<T, u32> {
    FieldRange::new(|_: &T, _| 0..=999)
}
