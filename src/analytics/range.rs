//! Date-range resolution
//!
//! Maps the symbolic range selector to a concrete `[start, end]` interval.
//! `end` is always "now" normalized to the end of the current day; `start`
//! is day-aligned at the selector's offset, or unbounded for `all`.

use chrono::{Days, Local, Months, NaiveDateTime};

use crate::analytics::buckets::{end_of_day, start_of_day};
use crate::analytics::models::{Granularity, RangeSelector};

/// A resolved report interval plus the bucket granularity to report at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    /// Inclusive lower bound; `None` means unbounded (the `all` selector)
    pub start: Option<NaiveDateTime>,

    /// Inclusive upper bound: end of the current day
    pub end: NaiveDateTime,

    /// Bucket size for the time series
    pub granularity: Granularity,
}

/// Resolve a selector against the current local time.
pub fn resolve(selector: RangeSelector) -> ResolvedRange {
    resolve_at(selector, Local::now().naive_local())
}

/// Resolve a selector against an explicit "now" (deterministic for tests).
pub fn resolve_at(selector: RangeSelector, now: NaiveDateTime) -> ResolvedRange {
    let end = end_of_day(now.date());
    let start = match selector {
        RangeSelector::All => None,
        RangeSelector::Last7Days => Some(days_back(end, 6)),
        RangeSelector::Last30Days => Some(days_back(end, 29)),
        RangeSelector::Last90Days => Some(days_back(end, 89)),
        RangeSelector::LastYear => Some(start_of_day(
            // checked_sub_months clamps Feb 29 to Feb 28 and fails only at
            // the edge of chrono's supported range
            end.date()
                .checked_sub_months(Months::new(12))
                .unwrap_or_else(|| end.date()),
        )),
    };

    ResolvedRange {
        start,
        end,
        granularity: selector.granularity(),
    }
}

fn days_back(end: NaiveDateTime, days: u64) -> NaiveDateTime {
    start_of_day(
        end.date()
            .checked_sub_days(Days::new(days))
            .unwrap_or_else(|| end.date()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn day_start(y: i32, m: u32, d: u32) -> NaiveDateTime {
        start_of_day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn end_is_normalized_to_end_of_day() {
        let resolved = resolve_at(RangeSelector::Last7Days, now());
        assert_eq!(
            resolved.end,
            NaiveDate::from_ymd_opt(2024, 3, 14)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap()
        );
    }

    #[test]
    fn day_windows_are_inclusive_of_today() {
        assert_eq!(
            resolve_at(RangeSelector::Last7Days, now()).start,
            Some(day_start(2024, 3, 8))
        );
        assert_eq!(
            resolve_at(RangeSelector::Last30Days, now()).start,
            Some(day_start(2024, 2, 14))
        );
        assert_eq!(
            resolve_at(RangeSelector::Last90Days, now()).start,
            Some(day_start(2023, 12, 16))
        );
    }

    #[test]
    fn one_year_goes_back_a_calendar_year() {
        assert_eq!(
            resolve_at(RangeSelector::LastYear, now()).start,
            Some(day_start(2023, 3, 14))
        );
    }

    #[test]
    fn one_year_from_leap_day_clamps() {
        let leap_now = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(
            resolve_at(RangeSelector::LastYear, leap_now).start,
            Some(day_start(2023, 2, 28))
        );
    }

    #[test]
    fn all_is_unbounded_below() {
        let resolved = resolve_at(RangeSelector::All, now());
        assert_eq!(resolved.start, None);
        assert_eq!(resolved.granularity, Granularity::Month);
    }
}
