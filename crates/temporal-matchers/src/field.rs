//! Field equality: year, month, day of month, day of week, hour, ...
//!
//! The expected side may hold several values, in which case any of them
//! matches. Month and weekday fields arrive already normalized to ISO
//! numbering, so equality here never depends on the calendar enumeration.

use std::sync::Arc;

use crate::convert::FieldConverter;
use crate::error::Result;
use crate::format::Formatter;
use crate::matcher::{join_alternatives, Matcher, TemporalMatcher};
use crate::reference::ZonedWrapper;
use crate::temporal::Temporal;
use crate::zone::Zone;

struct FieldEquals<T, F, D> {
    converter: FieldConverter<T, F>,
    expected: ZonedWrapper<F>,
    formatter: Arc<D>,
}

impl<T, F, D> TemporalMatcher<T> for FieldEquals<T, F, D>
where
    T: Temporal,
    F: PartialEq + Clone + Send + Sync + 'static,
    D: Formatter<F> + 'static,
{
    fn matches(&self, actual: &T) -> bool {
        let actual = self.converter.convert(actual, self.expected.effective_zone());
        self.expected.resolve_all().contains(&actual)
    }

    fn describe_expectation(&self) -> String {
        let expected: Vec<String> = self
            .expected
            .resolve_all()
            .iter()
            .map(|value| self.formatter.describe(value))
            .collect();
        format!(
            "the date has the {} {}",
            self.converter.field(),
            join_alternatives(&expected)
        )
    }

    fn describe_mismatch(&self, actual: &T) -> String {
        let actual = self.converter.convert(actual, self.expected.effective_zone());
        format!(
            "the date has the {} {}",
            self.converter.field(),
            self.formatter.describe(&actual)
        )
    }

    fn rebind(&self, zone: Zone) -> Matcher<T> {
        Matcher::new(FieldEquals {
            converter: self.converter.clone(),
            expected: self.expected.rebind(zone),
            formatter: Arc::clone(&self.formatter),
        })
    }
}

/// Build a field-equality matcher.
///
/// # Errors
///
/// [`crate::MatcherError::ZoneRequired`] when the converter needs a zone the
/// wrapper lacks.
pub fn make_field_matcher<T, F, D>(
    converter: FieldConverter<T, F>,
    expected: ZonedWrapper<F>,
    formatter: Arc<D>,
) -> Result<Matcher<T>>
where
    T: Temporal,
    F: PartialEq + Clone + Send + Sync + 'static,
    D: Formatter<F> + 'static,
{
    converter.ensure_zone(expected.effective_zone())?;
    tracing::debug!(
        field = converter.field().label(),
        representation = T::REPRESENTATION.name(),
        "built field matcher"
    );
    Ok(Matcher::new(FieldEquals {
        converter,
        expected,
        formatter,
    }))
}
