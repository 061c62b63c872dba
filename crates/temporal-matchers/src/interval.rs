//! Tolerance windows and unit-aware differences.
//!
//! An [`Interval`] is a non-negative magnitude of a [`TemporalUnit`]. The
//! distance between two values is always measured from the earlier to the
//! later one, so truncation behaves the same whichever side is the actual.
//!
//! Time units (nanos through half-days) count elapsed time. Calendar units
//! (months and larger) count whole calendar months between wall-clock values,
//! so 2015-01-31 to 2015-02-28 is zero months. Days and weeks on instant-like
//! values are measured on the wall clock of the earlier value's zone, with the
//! later value converted into it.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;

use crate::error::{MatcherError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
}

impl TemporalUnit {
    pub fn singular(self) -> &'static str {
        match self {
            TemporalUnit::Nanos => "nanosecond",
            TemporalUnit::Micros => "microsecond",
            TemporalUnit::Millis => "millisecond",
            TemporalUnit::Seconds => "second",
            TemporalUnit::Minutes => "minute",
            TemporalUnit::Hours => "hour",
            TemporalUnit::HalfDays => "half day",
            TemporalUnit::Days => "day",
            TemporalUnit::Weeks => "week",
            TemporalUnit::Months => "month",
            TemporalUnit::Years => "year",
            TemporalUnit::Decades => "decade",
            TemporalUnit::Centuries => "century",
            TemporalUnit::Millennia => "millennium",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            TemporalUnit::Nanos => "nanoseconds",
            TemporalUnit::Micros => "microseconds",
            TemporalUnit::Millis => "milliseconds",
            TemporalUnit::Seconds => "seconds",
            TemporalUnit::Minutes => "minutes",
            TemporalUnit::Hours => "hours",
            TemporalUnit::HalfDays => "half days",
            TemporalUnit::Days => "days",
            TemporalUnit::Weeks => "weeks",
            TemporalUnit::Months => "months",
            TemporalUnit::Years => "years",
            TemporalUnit::Decades => "decades",
            TemporalUnit::Centuries => "centuries",
            TemporalUnit::Millennia => "millennia",
        }
    }

    /// `"1 second"`, `"2 seconds"`.
    pub fn quantity(self, count: i64) -> String {
        let name = if count == 1 {
            self.singular()
        } else {
            self.plural()
        };
        format!("{count} {name}")
    }

    pub fn is_time_based(self) -> bool {
        self <= TemporalUnit::HalfDays
    }

    pub fn is_date_based(self) -> bool {
        self >= TemporalUnit::Days
    }

    /// Length in calendar months, for months and larger.
    fn months(self) -> Option<i64> {
        match self {
            TemporalUnit::Months => Some(1),
            TemporalUnit::Years => Some(12),
            TemporalUnit::Decades => Some(120),
            TemporalUnit::Centuries => Some(1_200),
            TemporalUnit::Millennia => Some(12_000),
            _ => None,
        }
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// A symmetric tolerance window: `magnitude` units either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    magnitude: i64,
    unit: TemporalUnit,
}

impl Interval {
    pub fn new(magnitude: i64, unit: TemporalUnit) -> Result<Self> {
        if magnitude < 0 {
            return Err(MatcherError::NegativeInterval(magnitude));
        }
        Ok(Self { magnitude, unit })
    }

    pub fn magnitude(&self) -> i64 {
        self.magnitude
    }

    pub fn unit(&self) -> TemporalUnit {
        self.unit
    }

    /// Whole units between `a` and `b`, never negative.
    pub fn difference<F: Measurable>(&self, a: &F, b: &F) -> i64 {
        unit_difference(a, b, self.unit)
    }

    /// Inclusive: a difference equal to the magnitude is within.
    pub fn contains<F: Measurable>(&self, a: &F, b: &F) -> bool {
        self.difference(a, b) <= self.magnitude
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unit.quantity(self.magnitude))
    }
}

/// Field values whose distance can be measured in [`TemporalUnit`]s.
pub trait Measurable: Clone + PartialOrd + Send + Sync + 'static {
    /// Name used when a unit is rejected.
    fn kind() -> &'static str;

    fn supports(unit: TemporalUnit) -> bool;

    /// Whole units from `self` to a later-or-equal `other`, truncated.
    fn until(&self, other: &Self, unit: TemporalUnit) -> i64;
}

/// Whole `unit`s between `a` and `b`, measured from the earlier value.
pub fn unit_difference<F: Measurable>(a: &F, b: &F, unit: TemporalUnit) -> i64 {
    let difference = if a <= b {
        a.until(b, unit)
    } else {
        b.until(a, unit)
    };
    // a DST fall-back can run the wall clock backwards
    difference.abs()
}

/// Fail when `F` cannot be measured in `unit`.
pub fn ensure_supported<F: Measurable>(unit: TemporalUnit) -> Result<()> {
    if F::supports(unit) {
        Ok(())
    } else {
        Err(MatcherError::UnsupportedUnit {
            unit: unit.plural().to_string(),
            field: F::kind(),
        })
    }
}

/// Elapsed time in a non-calendar unit, saturating where chrono overflows.
fn elapsed(delta: Duration, unit: TemporalUnit) -> i64 {
    match unit {
        TemporalUnit::Nanos => delta.num_nanoseconds().unwrap_or(i64::MAX),
        TemporalUnit::Micros => delta.num_microseconds().unwrap_or(i64::MAX),
        TemporalUnit::Millis => delta.num_milliseconds(),
        TemporalUnit::Seconds => delta.num_seconds(),
        TemporalUnit::Minutes => delta.num_minutes(),
        TemporalUnit::Hours => delta.num_hours(),
        TemporalUnit::HalfDays => delta.num_hours() / 12,
        TemporalUnit::Days => delta.num_days(),
        TemporalUnit::Weeks => delta.num_weeks(),
        // calendar units are counted by `months_between`
        _ => 0,
    }
}

/// Whole calendar months from `start` to `end`, truncated toward zero.
fn months_between(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
    let mut months = (end.year() as i64 - start.year() as i64) * 12 + end.month() as i64
        - start.month() as i64;
    let start_rest = (start.day(), start.time());
    let end_rest = (end.day(), end.time());
    if months > 0 && end_rest < start_rest {
        months -= 1;
    } else if months < 0 && end_rest > start_rest {
        months += 1;
    }
    months
}

/// Wall-clock difference, calendar-aware for months and larger.
fn wall_clock_until(start: &NaiveDateTime, end: &NaiveDateTime, unit: TemporalUnit) -> i64 {
    match unit.months() {
        Some(per_unit) => months_between(start, end) / per_unit,
        None => elapsed(end.signed_duration_since(*start), unit),
    }
}

impl Measurable for NaiveDate {
    fn kind() -> &'static str {
        "date"
    }

    fn supports(unit: TemporalUnit) -> bool {
        unit.is_date_based()
    }

    fn until(&self, other: &Self, unit: TemporalUnit) -> i64 {
        wall_clock_until(
            &self.and_time(NaiveTime::MIN),
            &other.and_time(NaiveTime::MIN),
            unit,
        )
    }
}

impl Measurable for NaiveTime {
    fn kind() -> &'static str {
        "time"
    }

    fn supports(unit: TemporalUnit) -> bool {
        unit.is_time_based()
    }

    fn until(&self, other: &Self, unit: TemporalUnit) -> i64 {
        elapsed(other.signed_duration_since(*self), unit)
    }
}

impl Measurable for NaiveDateTime {
    fn kind() -> &'static str {
        "date-time"
    }

    fn supports(_unit: TemporalUnit) -> bool {
        true
    }

    fn until(&self, other: &Self, unit: TemporalUnit) -> i64 {
        wall_clock_until(self, other, unit)
    }
}

impl<Z> Measurable for DateTime<Z>
where
    Z: TimeZone + Send + Sync + 'static,
    Z::Offset: Send + Sync,
{
    fn kind() -> &'static str {
        "date-time"
    }

    fn supports(_unit: TemporalUnit) -> bool {
        true
    }

    fn until(&self, other: &Self, unit: TemporalUnit) -> i64 {
        if unit.is_time_based() {
            elapsed(other.clone().signed_duration_since(self.clone()), unit)
        } else {
            // both ends on the wall clock of `self`'s zone
            let other = other.with_timezone(&self.timezone());
            wall_clock_until(&self.naive_local(), &other.naive_local(), unit)
        }
    }
}
