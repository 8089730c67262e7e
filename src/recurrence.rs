use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{Frequency, RepeatSpec};

/// Decides whether a recurring template produces an occurrence on
/// `candidate`, measured from its `anchor` date.
///
/// Recurrence only produces occurrences strictly after the anchor; a
/// candidate on or before it never matches. Each frequency measures
/// distance in its own unit (days, weekday count, weeks, months) so that
/// multi-week and multi-month intervals do not drift.
pub fn matches(candidate: NaiveDate, anchor: NaiveDate, spec: &RepeatSpec) -> bool {
    if candidate <= anchor {
        return false;
    }
    let days_since_anchor = (candidate - anchor).num_days();
    // interval is >= 1 after validation; clamp in case the store file
    // was edited by hand.
    let interval = i64::from(spec.interval.max(1));

    match spec.frequency {
        Frequency::Daily => days_since_anchor % interval == 0,
        Frequency::Weekdays => {
            if !is_weekday(candidate) {
                return false;
            }
            let count = weekdays_between(anchor, candidate);
            count > 0 && count % (interval * 5) == 0
        }
        Frequency::Weekly => {
            let dow = candidate.weekday().num_days_from_sunday() as u8;
            match &spec.days_of_week {
                Some(days) if days.contains(&dow) => {
                    let weeks_since_anchor = days_since_anchor / 7;
                    weeks_since_anchor > 0 && weeks_since_anchor % interval == 0
                }
                _ => false,
            }
        }
        Frequency::Monthly => {
            if candidate.day() != anchor.day() {
                return false;
            }
            let months_since_anchor = i64::from(
                (candidate.year() - anchor.year()) * 12
                    + (candidate.month() as i32 - anchor.month() as i32),
            );
            months_since_anchor > 0 && months_since_anchor % interval == 0
        }
    }
}

/// Checks a repeat rule at construction time, before it reaches the
/// store. Weekly rules must say which weekdays they fire on; no other
/// frequency takes a weekday list.
pub fn validate(spec: &RepeatSpec) -> Result<()> {
    if spec.interval == 0 {
        return Err(invalid("interval must be at least 1"));
    }
    match spec.frequency {
        Frequency::Weekly => {
            let days = spec
                .days_of_week
                .as_deref()
                .filter(|d| !d.is_empty())
                .ok_or_else(|| invalid("weekly repeat needs at least one weekday"))?;
            if days.iter().any(|d| *d > 6) {
                return Err(invalid(
                    "weekday indices run 0 (Sunday) through 6 (Saturday)",
                ));
            }
        }
        _ => {
            if spec.days_of_week.as_ref().is_some_and(|d| !d.is_empty()) {
                return Err(invalid("weekday list only applies to weekly repeats"));
            }
        }
    }
    Ok(())
}

fn invalid(reason: &str) -> Error {
    Error::InvalidRepeatSpec {
        reason: reason.into(),
    }
}

fn is_weekday(day: NaiveDate) -> bool {
    let dow = day.weekday().num_days_from_sunday();
    (1..=5).contains(&dow)
}

/// Counts weekdays strictly after `anchor` up to and including
/// `candidate`, walking day by day. O(days between); fine for habit
/// horizons, so callers should cap how far back anchors reach.
fn weekdays_between(anchor: NaiveDate, candidate: NaiveDate) -> i64 {
    let mut count = 0;
    let mut cursor = anchor;
    while let Some(day) = cursor.succ_opt() {
        if day > candidate {
            break;
        }
        if is_weekday(day) {
            count += 1;
        }
        cursor = day;
    }
    count
}
