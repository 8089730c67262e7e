use chrono::NaiveDate;
use dayplan::error::Error;
use dayplan::models::{Frequency, RepeatSpec};
use dayplan::recurrence::{matches, validate};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn spec(frequency: Frequency, interval: u32) -> RepeatSpec {
    RepeatSpec {
        frequency,
        interval,
        end_date: None,
        days_of_week: None,
    }
}

#[test]
fn test_no_match_on_or_before_anchor() {
    let s = spec(Frequency::Daily, 1);
    let anchor = d(2024, 1, 10);
    assert!(!matches(anchor, anchor, &s));
    assert!(!matches(d(2024, 1, 5), anchor, &s));
    assert!(matches(d(2024, 1, 11), anchor, &s));
}

#[test]
fn test_daily_interval() {
    let s = spec(Frequency::Daily, 2);
    let anchor = d(2024, 1, 1);
    assert!(!matches(d(2024, 1, 2), anchor, &s));
    assert!(matches(d(2024, 1, 3), anchor, &s));
    assert!(!matches(d(2024, 1, 4), anchor, &s));
    assert!(matches(d(2024, 1, 5), anchor, &s));
}

#[test]
fn test_weekdays_skips_weekends() {
    let s = spec(Frequency::Weekdays, 1);
    // 2024-01-01 is a Monday.
    let anchor = d(2024, 1, 1);
    assert!(!matches(d(2024, 1, 6), anchor, &s)); // Saturday
    assert!(!matches(d(2024, 1, 7), anchor, &s)); // Sunday
}

#[test]
fn test_weekdays_counts_weekdays_not_calendar_days() {
    let s = spec(Frequency::Weekdays, 1);
    let anchor = d(2024, 1, 1); // Monday
    // Distance is measured in counted weekdays, five per week: the rule
    // fires when the count since the anchor is a multiple of interval * 5.
    assert!(!matches(d(2024, 1, 2), anchor, &s)); // 1 weekday since anchor
    assert!(matches(d(2024, 1, 8), anchor, &s)); // 5 weekdays
    assert!(!matches(d(2024, 1, 9), anchor, &s)); // 6 weekdays
    assert!(matches(d(2024, 1, 15), anchor, &s)); // 10 weekdays

    let every_other = spec(Frequency::Weekdays, 2);
    assert!(!matches(d(2024, 1, 8), anchor, &every_other)); // 5 weekdays
    assert!(matches(d(2024, 1, 15), anchor, &every_other)); // 10 weekdays
}

#[test]
fn test_weekly_on_listed_days_with_interval() {
    let mut s = spec(Frequency::Weekly, 2);
    s.days_of_week = Some(vec![1]); // Mondays
    let anchor = d(2024, 1, 1); // Monday
    assert!(!matches(d(2024, 1, 8), anchor, &s)); // one week out
    assert!(matches(d(2024, 1, 15), anchor, &s)); // two weeks out
    assert!(!matches(d(2024, 1, 16), anchor, &s)); // Tuesday, not listed
    assert!(!matches(d(2024, 1, 22), anchor, &s)); // three weeks out
    assert!(matches(d(2024, 1, 29), anchor, &s)); // four weeks out
}

#[test]
fn test_weekly_waits_for_a_full_week() {
    // A listed day inside the anchor's own week has weeksSinceAnchor = 0
    // and therefore never matches.
    let mut s = spec(Frequency::Weekly, 1);
    s.days_of_week = Some(vec![2]); // Tuesdays
    let anchor = d(2024, 1, 1); // Monday
    assert!(!matches(d(2024, 1, 2), anchor, &s)); // Tuesday next day
    assert!(matches(d(2024, 1, 9), anchor, &s)); // Tuesday a week later
}

#[test]
fn test_weekly_without_day_list_never_matches() {
    let s = spec(Frequency::Weekly, 1);
    let anchor = d(2024, 1, 1);
    assert!(!matches(d(2024, 1, 8), anchor, &s));
    assert!(!matches(d(2024, 1, 15), anchor, &s));
}

#[test]
fn test_monthly_same_day_of_month() {
    let s = spec(Frequency::Monthly, 1);
    let anchor = d(2024, 1, 15);
    assert!(matches(d(2024, 2, 15), anchor, &s));
    assert!(matches(d(2024, 3, 15), anchor, &s));
    assert!(!matches(d(2024, 2, 16), anchor, &s));

    let quarterly = spec(Frequency::Monthly, 3);
    assert!(!matches(d(2024, 2, 15), anchor, &quarterly));
    assert!(matches(d(2024, 4, 15), anchor, &quarterly));
}

#[test]
fn test_monthly_day_31_skips_short_months() {
    let s = spec(Frequency::Monthly, 1);
    let anchor = d(2024, 1, 31);
    // February has no 31st, leap year or not; the rule simply produces
    // nothing that month.
    assert!(!matches(d(2024, 2, 29), anchor, &s));
    assert!(matches(d(2024, 3, 31), anchor, &s));
    assert!(!matches(d(2024, 4, 30), anchor, &s));
    assert!(matches(d(2024, 5, 31), anchor, &s));
}

#[test]
fn test_matcher_is_deterministic() {
    let mut s = spec(Frequency::Weekly, 2);
    s.days_of_week = Some(vec![1, 4]);
    let anchor = d(2024, 1, 1);
    let mut day = anchor;
    for _ in 0..120 {
        let first = matches(day, anchor, &s);
        let second = matches(day, anchor, &s);
        assert_eq!(first, second);
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn test_validate_rules() {
    let mut zero = spec(Frequency::Daily, 0);
    assert!(matches!(
        validate(&zero),
        Err(Error::InvalidRepeatSpec { .. })
    ));
    zero.interval = 3;
    assert!(validate(&zero).is_ok());

    let weekly_bare = spec(Frequency::Weekly, 1);
    assert!(matches!(
        validate(&weekly_bare),
        Err(Error::InvalidRepeatSpec { .. })
    ));

    let mut weekly_bad_day = spec(Frequency::Weekly, 1);
    weekly_bad_day.days_of_week = Some(vec![7]);
    assert!(matches!(
        validate(&weekly_bad_day),
        Err(Error::InvalidRepeatSpec { .. })
    ));

    let mut weekly_ok = spec(Frequency::Weekly, 1);
    weekly_ok.days_of_week = Some(vec![1, 3]);
    assert!(validate(&weekly_ok).is_ok());

    let mut daily_with_days = spec(Frequency::Daily, 1);
    daily_with_days.days_of_week = Some(vec![1]);
    assert!(matches!(
        validate(&daily_with_days),
        Err(Error::InvalidRepeatSpec { .. })
    ));
}
