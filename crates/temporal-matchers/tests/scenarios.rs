//! End-to-end scenarios across representations, as an assertion front end
//! would drive the matchers.

use std::sync::Arc;
use std::thread;

use chrono::{
    DateTime, FixedOffset, Locale, Month, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;
use temporal_matchers::{
    convert, is_weekday, make_comparator, make_extremum_matcher, make_field_matcher,
    make_leap_year_matcher, make_within_matcher, ComparisonKind, DayOfWeek, Interval,
    LocaleFormatter, MatchResult, Matcher, MatcherConfig, MatcherError, MonthOfYear, Reference,
    TemporalUnit, Zone, ZonedWrapper,
};

fn fmt() -> Arc<LocaleFormatter> {
    Arc::new(LocaleFormatter::new(Locale::en_US))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn date_time(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, mi, s).unwrap()
}

fn compare<T>(kind: ComparisonKind, expected: T) -> Matcher<T>
where
    T: temporal_matchers::Temporal + PartialOrd,
    LocaleFormatter: temporal_matchers::Formatter<T>,
{
    make_comparator(kind, convert::identity(), ZonedWrapper::literal(expected), fmt()).unwrap()
}

// ── Literal scenarios ───────────────────────────────────────────────────────

#[test]
fn test_date_after_and_before() {
    let actual = date(2015, 8, 4);
    assert!(compare(ComparisonKind::After, date(2015, 8, 3)).matches(&actual));
    assert!(!compare(ComparisonKind::After, date(2015, 8, 5)).matches(&actual));
    assert!(compare(ComparisonKind::Before, date(2015, 8, 5)).matches(&actual));
}

#[test]
fn test_date_time_within_one_second() {
    let actual = date_time(2015, 8, 4, 12, 0, 0);
    let within = |expected| -> Matcher<NaiveDateTime> {
        make_within_matcher(
            Interval::new(1, TemporalUnit::Seconds).unwrap(),
            convert::identity(),
            ZonedWrapper::literal(expected),
            fmt(),
        )
        .unwrap()
    };
    assert!(within(date_time(2015, 8, 4, 12, 0, 1)).matches(&actual));
    assert!(!within(date_time(2015, 8, 4, 12, 0, 2)).matches(&actual));
}

#[test]
fn test_failure_message_for_front_end() {
    let result = compare(ComparisonKind::Before, date(2015, 8, 3)).evaluate(&date(2015, 8, 4));
    assert_eq!(
        result,
        MatchResult::rejected(
            "the date is before Mon, 03 Aug 2015".to_string(),
            "the date is Tue, 04 Aug 2015".to_string(),
        )
    );
    assert_eq!(
        result.failure_message().unwrap(),
        "Expected: the date is before Mon, 03 Aug 2015\n     but: the date is Tue, 04 Aug 2015"
    );
}

// ── Representations ─────────────────────────────────────────────────────────

#[test]
fn test_offset_date_times_order_by_instant() {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let minus_five = FixedOffset::east_opt(-5 * 3600).unwrap();
    // 12:00+02:00 is 10:00Z; 06:00-05:00 is 11:00Z
    let actual = plus_two.with_ymd_and_hms(2015, 8, 4, 12, 0, 0).unwrap();
    let expected = minus_five.with_ymd_and_hms(2015, 8, 4, 6, 0, 0).unwrap();
    assert!(compare(ComparisonKind::Before, expected).matches(&actual));
}

#[test]
fn test_zoned_same_day_viewed_in_other_zone() {
    let actual = Tz::Europe__London.with_ymd_and_hms(2015, 8, 4, 23, 30, 0).unwrap();
    let expected = Tz::Europe__London.with_ymd_and_hms(2015, 8, 4, 8, 0, 0).unwrap();
    let same_day = make_comparator(
        ComparisonKind::Same,
        convert::local_date(),
        ZonedWrapper::new(Reference::converted(expected, convert::local_date()), None),
        fmt(),
    )
    .unwrap();
    assert!(same_day.matches(&actual));
    // 23:30 BST is 07:30 the next day in Tokyo, 08:00 BST is 16:00 the same day
    assert!(!same_day.rebind(Zone::Region(Tz::Asia__Tokyo)).matches(&actual));
}

#[test]
fn test_instant_uses_configured_default_zone() {
    let config = MatcherConfig::default().with_zone(Zone::Region(Tz::America__New_York));
    let actual = Utc.with_ymd_and_hms(2015, 8, 4, 2, 0, 0).unwrap();
    let on_the_third = make_field_matcher(
        convert::day_of_month::<DateTime<Utc>>(),
        ZonedWrapper::for_representation::<DateTime<Utc>>(Reference::literal(3), None, &config),
        fmt(),
    )
    .unwrap();
    // 02:00Z is 22:00 EDT on the 3rd
    assert!(on_the_third.matches(&actual));
}

#[test]
fn test_instant_without_zone_fails_fast() {
    let result = make_field_matcher(
        convert::month::<DateTime<Utc>>(),
        ZonedWrapper::literal(MonthOfYear::from(Month::August)),
        fmt(),
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "Zone required: the month of instant values cannot be resolved without a zone"
    );
}

#[test]
fn test_time_only_values() {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    let after_noon = compare(ComparisonKind::After, noon);
    assert!(after_noon.matches(&NaiveTime::from_hms_opt(12, 0, 1).unwrap()));
    let last_minute = make_extremum_matcher(
        true,
        convert::minute::<NaiveTime>(),
        convert::minute_range(),
        ZonedWrapper::zone_only(None),
        fmt(),
    )
    .unwrap();
    assert!(last_minute.matches(&NaiveTime::from_hms_opt(7, 59, 0).unwrap()));
    // rebinding a zone-naive matcher changes nothing
    assert!(last_minute
        .rebind(Zone::Region(Tz::Asia__Tokyo))
        .matches(&NaiveTime::from_hms_opt(7, 59, 0).unwrap()));
}

#[test]
fn test_date_description_of_time_is_distinct_outcome() {
    use temporal_matchers::Formatter;
    let result = fmt().describe_date(&NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert!(matches!(result, Err(MatcherError::NotApplicable { .. })));
}

#[test]
fn test_leap_year_on_zoned_values() {
    let leap = make_leap_year_matcher(
        convert::year::<DateTime<Tz>>(),
        ZonedWrapper::zone_only(None),
        fmt(),
    )
    .unwrap();
    assert!(leap.matches(&Tz::Europe__Paris.with_ymd_and_hms(2016, 6, 1, 0, 0, 0).unwrap()));
    assert!(!leap.matches(&Tz::Europe__Paris.with_ymd_and_hms(1900, 6, 1, 0, 0, 0).unwrap()));
}

#[test]
fn test_relative_day_reference() {
    // The caller supplies "now"; the matcher checks "is yesterday"
    let now = Utc.with_ymd_and_hms(2015, 8, 4, 1, 0, 0).unwrap();
    let is_yesterday = make_comparator(
        ComparisonKind::Same,
        convert::local_date::<NaiveDateTime>(),
        ZonedWrapper::new(Reference::days_from(now, -1), Some(Zone::utc())),
        fmt(),
    )
    .unwrap();
    assert!(is_yesterday.matches(&date_time(2015, 8, 3, 18, 0, 0)));
    assert!(!is_yesterday.matches(&date_time(2015, 8, 4, 0, 30, 0)));
    // in New York it is still the 3rd, so yesterday is the 2nd
    let new_york = is_yesterday.rebind(Zone::Region(Tz::America__New_York));
    assert!(new_york.matches(&date_time(2015, 8, 2, 18, 0, 0)));
}

#[test]
fn test_day_of_week_literal_alias() {
    let monday = make_field_matcher(
        convert::day_of_week::<NaiveDate>(),
        ZonedWrapper::literal(DayOfWeek::from(Weekday::Mon)),
        fmt(),
    )
    .unwrap();
    assert!(monday.matches(&date(2015, 8, 3)));
    assert_eq!(DayOfWeek::new(1), Some(DayOfWeek::from(Weekday::Mon)));
}

// ── Sharing ─────────────────────────────────────────────────────────────────

#[test]
fn test_matcher_shared_across_threads() {
    let weekday: Matcher<NaiveDate> = is_weekday(None, fmt()).unwrap();
    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|offset| {
                let weekday = weekday.clone();
                scope.spawn(move || {
                    (0..28)
                        .map(|d| date(2015, 8, 3) + chrono::Duration::days(d + offset * 28))
                        .filter(|d| weekday.matches(d))
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, vec![20, 20, 20, 20]);
}
