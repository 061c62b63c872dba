//! # temporal-matchers
//!
//! Composable assertion predicates over `chrono` values.
//!
//! A small set of comparison algorithms (after, before, same, within, field
//! equality, field extremum, leap year, any-of) runs unchanged over six
//! temporal representations. Representation-specific knowledge lives only in
//! [`convert::FieldConverter`]s; expected values sit in a
//! [`reference::ZonedWrapper`] that can be rebound to another zone without
//! mutating the matcher it belongs to.
//!
//! Matchers are immutable, `Send + Sync`, never read the system clock, and
//! report mismatches as data ([`MatchResult`]) rather than panicking.
//!
//! ## Modules
//!
//! - [`temporal`] — Representations, zone policies, ISO month/weekday fields
//! - [`zone`] — UTC offsets and IANA regions
//! - [`convert`] — Field converters and field ranges
//! - [`reference`] — Expected values and zone binding
//! - [`interval`] — Tolerance windows and unit-aware differences
//! - [`format`] — Locale-aware descriptions for diagnostics
//! - [`matcher`] — The matcher contract and evaluation results
//! - [`comparator`], [`field`], [`extremum`], [`leap_year`], [`within`], [`any_of`] — The algorithms
//! - [`config`] — Host default zone and locale
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::{Locale, NaiveDate};
//! use temporal_matchers::{convert, make_comparator, ComparisonKind, LocaleFormatter, ZonedWrapper};
//!
//! let expected = NaiveDate::from_ymd_opt(2015, 8, 3).unwrap();
//! let is_after = make_comparator(
//!     ComparisonKind::After,
//!     convert::identity(),
//!     ZonedWrapper::literal(expected),
//!     Arc::new(LocaleFormatter::new(Locale::en_US)),
//! )
//! .unwrap();
//!
//! assert!(is_after.matches(&NaiveDate::from_ymd_opt(2015, 8, 4).unwrap()));
//! let result = is_after.evaluate(&NaiveDate::from_ymd_opt(2015, 8, 2).unwrap());
//! assert_eq!(result.mismatch.as_deref(), Some("the date is Sun, 02 Aug 2015"));
//! ```

pub mod any_of;
pub mod comparator;
pub mod config;
pub mod convert;
pub mod error;
pub mod extremum;
pub mod field;
pub mod format;
pub mod interval;
pub mod leap_year;
pub mod matcher;
pub mod reference;
pub mod temporal;
pub mod within;
pub mod zone;

pub use any_of::{is_weekday, is_weekend, make_any_of};
pub use comparator::{make_comparator, ComparisonKind};
pub use config::MatcherConfig;
pub use convert::{Field, FieldConverter, FieldRange};
pub use error::MatcherError;
pub use extremum::{make_extremum_matcher, Extremum};
pub use field::make_field_matcher;
pub use format::{Formatter, LocaleFormatter};
pub use interval::{unit_difference, Interval, Measurable, TemporalUnit};
pub use leap_year::make_leap_year_matcher;
pub use matcher::{MatchResult, Matcher, TemporalMatcher};
pub use reference::{Reference, ZonedWrapper};
pub use temporal::{
    days_in_month, is_leap_year, DayOfWeek, HasDate, HasInstant, HasTime, MonthOfYear,
    Representation, Temporal, ZonePolicy,
};
pub use within::make_within_matcher;
pub use zone::Zone;
