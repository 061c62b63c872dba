//! Disjunction of matchers, and the weekday / weekend matchers built on it.

use std::sync::Arc;

use chrono::Weekday;

use crate::convert::{self, FieldConverter};
use crate::error::{MatcherError, Result};
use crate::field::make_field_matcher;
use crate::format::Formatter;
use crate::matcher::{Matcher, TemporalMatcher};
use crate::reference::{Reference, ZonedWrapper};
use crate::temporal::{DayOfWeek, HasDate};
use crate::zone::Zone;

type DescribeFn<T> = dyn Fn(&T, Option<&Zone>) -> String + Send + Sync;

struct AnyOf<T> {
    members: Vec<Matcher<T>>,
    zone: Option<Zone>,
    describe: Arc<DescribeFn<T>>,
}

impl<T: Send + Sync + 'static> TemporalMatcher<T> for AnyOf<T> {
    fn matches(&self, actual: &T) -> bool {
        self.members.iter().any(|member| member.matches(actual))
    }

    fn describe_expectation(&self) -> String {
        self.members
            .iter()
            .map(Matcher::describe_expectation)
            .collect::<Vec<_>>()
            .join(" or ")
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        (self.describe)(actual, self.zone.as_ref())
    }

    fn rebind(&self, zone: Zone) -> Matcher<T> {
        Matcher::new(AnyOf {
            members: self.members.iter().map(|member| member.rebind(zone)).collect(),
            zone: Some(zone),
            describe: Arc::clone(&self.describe),
        })
    }
}

/// Match when any member matches.
///
/// `describe` renders the actual value for the mismatch text; it receives
/// the zone the matcher is currently bound to.
///
/// # Errors
///
/// [`MatcherError::EmptyAnyOf`] when `members` is empty.
pub fn make_any_of<T, M>(
    members: Vec<Matcher<T>>,
    zone: Option<Zone>,
    describe: M,
) -> Result<Matcher<T>>
where
    T: Send + Sync + 'static,
    M: Fn(&T, Option<&Zone>) -> String + Send + Sync + 'static,
{
    if members.is_empty() {
        return Err(MatcherError::EmptyAnyOf);
    }
    tracing::debug!(members = members.len(), "built any-of matcher");
    Ok(Matcher::new(AnyOf {
        members,
        zone,
        describe: Arc::new(describe),
    }))
}

/// Monday through Friday.
pub fn is_weekday<T, D>(zone: Option<Zone>, formatter: Arc<D>) -> Result<Matcher<T>>
where
    T: HasDate,
    D: Formatter<DayOfWeek> + 'static,
{
    days_of_week(
        &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        zone,
        formatter,
    )
}

/// Saturday and Sunday.
pub fn is_weekend<T, D>(zone: Option<Zone>, formatter: Arc<D>) -> Result<Matcher<T>>
where
    T: HasDate,
    D: Formatter<DayOfWeek> + 'static,
{
    days_of_week(&[Weekday::Sat, Weekday::Sun], zone, formatter)
}

fn days_of_week<T, D>(
    days: &[Weekday],
    zone: Option<Zone>,
    formatter: Arc<D>,
) -> Result<Matcher<T>>
where
    T: HasDate,
    D: Formatter<DayOfWeek> + 'static,
{
    let converter: FieldConverter<T, DayOfWeek> = convert::day_of_week();
    let members = days
        .iter()
        .map(|day| {
            make_field_matcher(
                converter.clone(),
                ZonedWrapper::new(Reference::literal(DayOfWeek::from(*day)), zone),
                Arc::clone(&formatter),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    make_any_of(members, zone, move |actual: &T, zone: Option<&Zone>| {
        format!(
            "the date is on a {}",
            formatter.describe(&converter.convert(actual, zone))
        )
    })
}
