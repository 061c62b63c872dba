//! Expected values and the zone they are observed in.
//!
//! A [`Reference`] supplies the expected field value: a literal, a deferred
//! conversion of a second temporal value, or a non-empty set of literals.
//! A [`ZonedWrapper`] pairs a shared reference with an optional zone and can
//! be rebound to another zone without touching the original.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::config::MatcherConfig;
use crate::convert::FieldConverter;
use crate::error::{MatcherError, Result};
use crate::temporal::{Temporal, ZonePolicy};
use crate::zone::Zone;

type ResolveFn<F> = dyn Fn(Option<&Zone>) -> F + Send + Sync;

enum Source<F> {
    Literal(F),
    Deferred(Box<ResolveFn<F>>),
    OneOf { first: F, rest: Vec<F> },
}

/// Supplies the expected field value(s) for a matcher.
pub struct Reference<F> {
    source: Source<F>,
}

impl<F: Clone + Send + Sync + 'static> Reference<F> {
    pub fn literal(value: F) -> Self {
        Self {
            source: Source::Literal(value),
        }
    }

    /// The field of a second temporal value, converted in whatever zone the
    /// wrapper is bound to when the matcher runs.
    pub fn converted<T: Temporal>(value: T, converter: FieldConverter<T, F>) -> Self {
        Self {
            source: Source::Deferred(Box::new(move |zone: Option<&Zone>| {
                converter.convert(&value, zone)
            })),
        }
    }

    /// Any of the given values. Fails when `values` is empty.
    pub fn one_of<I: IntoIterator<Item = F>>(values: I) -> Result<Self> {
        let mut values = values.into_iter();
        let first = values.next().ok_or(MatcherError::EmptyAnyOf)?;
        Ok(Self {
            source: Source::OneOf {
                first,
                rest: values.collect(),
            },
        })
    }

    pub fn is_multi_valued(&self) -> bool {
        matches!(&self.source, Source::OneOf { rest, .. } if !rest.is_empty())
    }

    /// The expected value. For a set, its first member.
    pub fn resolve(&self, zone: Option<&Zone>) -> F {
        match &self.source {
            Source::Literal(value) => value.clone(),
            Source::Deferred(resolve) => resolve(zone),
            Source::OneOf { first, .. } => first.clone(),
        }
    }

    pub fn resolve_all(&self, zone: Option<&Zone>) -> Vec<F> {
        match &self.source {
            Source::OneOf { first, rest } => {
                let mut all = Vec::with_capacity(rest.len() + 1);
                all.push(first.clone());
                all.extend(rest.iter().cloned());
                all
            }
            _ => vec![self.resolve(zone)],
        }
    }
}

impl Reference<NaiveDate> {
    /// The local date `days` days after `anchor`, in the bound zone.
    ///
    /// Backs "yesterday" (-1), "today" (0) and "tomorrow" (1). The caller
    /// reads the clock; resolution itself is pure.
    pub fn days_from(anchor: DateTime<Utc>, days: i64) -> Self {
        Self {
            source: Source::Deferred(Box::new(move |zone: Option<&Zone>| {
                let today = match zone {
                    Some(zone) => zone.local_date_time(&anchor).date(),
                    None => anchor.date_naive(),
                };
                let shift = Days::new(days.unsigned_abs());
                let shifted = if days >= 0 {
                    today.checked_add_days(shift)
                } else {
                    today.checked_sub_days(shift)
                };
                // clamp to the representable range
                shifted.unwrap_or_else(|| {
                    let clamped = if days >= 0 {
                        NaiveDate::MAX
                    } else {
                        NaiveDate::MIN
                    };
                    tracing::warn!(%today, days, %clamped, "relative day out of range, clamping");
                    clamped
                })
            })),
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for Reference<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Source::Deferred(_) => f.write_str("Deferred"),
            Source::OneOf { first, rest } => f
                .debug_struct("OneOf")
                .field("first", first)
                .field("rest", rest)
                .finish(),
        }
    }
}

/// A reference bound to an optional zone.
pub struct ZonedWrapper<F> {
    reference: Arc<Reference<F>>,
    zone: Option<Zone>,
}

impl<F: Clone + Send + Sync + 'static> ZonedWrapper<F> {
    pub fn new(reference: Reference<F>, zone: Option<Zone>) -> Self {
        Self {
            reference: Arc::new(reference),
            zone,
        }
    }

    pub fn literal(value: F) -> Self {
        Self::new(Reference::literal(value), None)
    }

    /// Bind `reference` for values of representation `T`, falling back to the
    /// configured default zone when `T` cannot resolve local fields on its own.
    pub fn for_representation<T: Temporal>(
        reference: Reference<F>,
        zone: Option<Zone>,
        config: &MatcherConfig,
    ) -> Self {
        let zone = match (zone, T::ZONE_POLICY) {
            (None, ZonePolicy::Required) => {
                tracing::debug!(
                    representation = T::REPRESENTATION.name(),
                    zone = %config.default_zone(),
                    "applying default zone"
                );
                Some(*config.default_zone())
            }
            (zone, _) => zone,
        };
        Self::new(reference, zone)
    }

    pub fn effective_zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    /// A copy bound to `zone`. The receiver is left unchanged and shares the
    /// same reference.
    pub fn rebind(&self, zone: Zone) -> Self {
        Self {
            reference: Arc::clone(&self.reference),
            zone: Some(zone),
        }
    }

    pub fn reference(&self) -> &Reference<F> {
        &self.reference
    }

    pub fn resolve(&self) -> F {
        self.reference.resolve(self.zone.as_ref())
    }

    pub fn resolve_all(&self) -> Vec<F> {
        self.reference.resolve_all(self.zone.as_ref())
    }

    pub fn shares_reference_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.reference, &other.reference)
    }
}

impl ZonedWrapper<()> {
    /// A zone binding with no expected value, for matchers that only inspect
    /// the actual value (leap year, field extremum).
    pub fn zone_only(zone: Option<Zone>) -> Self {
        Self::new(Reference::literal(()), zone)
    }
}

impl<F> Clone for ZonedWrapper<F> {
    fn clone(&self) -> Self {
        Self {
            reference: Arc::clone(&self.reference),
            zone: self.zone,
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for ZonedWrapper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZonedWrapper")
            .field("reference", &self.reference)
            .field("zone", &self.zone)
            .finish()
    }
}
