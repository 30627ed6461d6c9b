//! Calendar-aware time bucketing
//!
//! Generates the ordered sequence of non-overlapping buckets a report's
//! time series are keyed on. Buckets for one request are contiguous,
//! sorted ascending, and jointly cover at least `[effective_start, end]`.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::analytics::models::Granularity;

/// One time-series bucket. `end` is inclusive (the last representable
/// millisecond of the interval).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Display label for the chart axis
    pub label: String,
}

pub(crate) fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

pub(crate) fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    // Statically valid time-of-day constant
    day.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time of day"))
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1).unwrap_or(day)
}

fn first_of_next_month(day: NaiveDate) -> Option<NaiveDate> {
    if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
    }
}

/// Short day+month label, e.g. "14 Mar"
fn day_label(day: NaiveDate) -> String {
    day.format("%-d %b").to_string()
}

/// Short month+year label, e.g. "mar 24"
fn month_label(day: NaiveDate) -> String {
    day.format("%b %y").to_string().to_lowercase()
}

/// Generate the ordered bucket sequence covering `[effective_start, end]`
/// at the given granularity.
///
/// Returns an empty sequence when `effective_start > end`; callers treat a
/// zero-bucket report as "every series is empty" rather than an error.
pub fn generate_buckets(
    effective_start: NaiveDateTime,
    end: NaiveDateTime,
    granularity: Granularity,
) -> Vec<TimeBucket> {
    if effective_start > end {
        return Vec::new();
    }

    match granularity {
        Granularity::Day => day_buckets(effective_start.date(), end.date()),
        Granularity::Week => week_buckets(effective_start.date(), end),
        Granularity::Month => month_buckets(effective_start.date(), end.date()),
    }
}

/// One bucket per calendar day, inclusive on both sides
fn day_buckets(first: NaiveDate, last: NaiveDate) -> Vec<TimeBucket> {
    let mut buckets = Vec::new();
    let mut day = first;
    while day <= last {
        buckets.push(TimeBucket {
            start: start_of_day(day),
            end: end_of_day(day),
            label: day_label(day),
        });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    buckets
}

/// Monday-aligned weeks: the first bucket's start is `first` rolled back
/// to the Monday of its week, then each bucket is exactly 7 days.
fn week_buckets(first: NaiveDate, end: NaiveDateTime) -> Vec<TimeBucket> {
    let rollback = u64::from(first.weekday().num_days_from_monday());
    let mut monday = first.checked_sub_days(Days::new(rollback)).unwrap_or(first);

    let mut buckets = Vec::new();
    while start_of_day(monday) <= end {
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
        buckets.push(TimeBucket {
            start: start_of_day(monday),
            end: end_of_day(sunday),
            label: day_label(monday),
        });
        monday = match monday.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }
    buckets
}

/// One bucket per calendar month, from the month of `first` through the
/// month of `last` inclusive
fn month_buckets(first: NaiveDate, last: NaiveDate) -> Vec<TimeBucket> {
    let mut cursor = first_of_month(first);
    let stop = first_of_month(last);

    let mut buckets = Vec::new();
    while cursor <= stop {
        let next = match first_of_next_month(cursor) {
            Some(next) => next,
            None => break,
        };
        let month_end = next.pred_opt().unwrap_or(cursor);
        buckets.push(TimeBucket {
            start: start_of_day(cursor),
            end: end_of_day(month_end),
            label: month_label(cursor),
        });
        cursor = next;
    }
    buckets
}
