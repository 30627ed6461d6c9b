//! Integration tests for the analytics report pipeline
//!
//! These drive the full path — range resolution, bucket generation,
//! grouping — through the public `build_report_at` surface with a pinned
//! "now" so results are deterministic.

use chrono::{NaiveDate, NaiveDateTime};
use cuppa::analytics::{build_report_at, generate_buckets, Granularity, RangeSelector, ReportOptions};
use cuppa::labels::DefaultLabels;
use cuppa::models::BrewRecord;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn brew(at: &str, method: &str, dose: Option<f64>, rating: Option<u8>) -> BrewRecord {
    BrewRecord {
        brewed_at: ts(at),
        brew_method: method.to_string(),
        dose_grams: dose,
        rating,
        bean_name: None,
        bean_roast_level: None,
        bean_origin_country: None,
    }
}

fn bean_brew(at: &str, bean: &str, rating: u8) -> BrewRecord {
    BrewRecord {
        bean_name: Some(bean.to_string()),
        bean_roast_level: Some("medium".to_string()),
        bean_origin_country: Some("Ethiopia".to_string()),
        ..brew(at, "v60", Some(15.0), Some(rating))
    }
}

fn options(range: RangeSelector) -> ReportOptions {
    ReportOptions {
        range,
        method_filter: None,
    }
}

#[test]
fn seven_day_report_buckets_by_calendar_day() {
    let now = ts("2024-03-14 15:00");
    let records = vec![
        brew("2024-03-10 08:00", "v60", Some(20.0), Some(4)),
        brew("2024-03-12 08:00", "v60", Some(18.0), None),
        brew("2024-03-12 17:30", "v60", Some(22.0), Some(5)),
    ];

    let report = build_report_at(&records, &options(RangeSelector::Last7Days), &DefaultLabels, now);

    assert_eq!(report.total_brews, 3);
    assert_eq!(report.avg_rating, Some(4.5));
    assert_eq!(report.total_grams, 60);

    assert_eq!(report.brews_over_time.len(), 7);
    assert_eq!(report.brews_over_time[0].label, "8 Mar");
    assert_eq!(report.brews_over_time[6].label, "14 Mar");

    let counts: Vec<u64> = report.brews_over_time.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![0, 0, 1, 0, 2, 0, 0]);

    let grams: Vec<i64> = report.consumption_over_time.iter().map(|p| p.grams).collect();
    assert_eq!(grams, vec![0, 0, 20, 0, 40, 0, 0]);

    let ratings: Vec<Option<f64>> = report.rating_over_time.iter().map(|p| p.avg_rating).collect();
    assert_eq!(
        ratings,
        vec![None, None, Some(4.0), None, Some(5.0), None, None]
    );
}

#[test]
fn week_buckets_align_to_monday() {
    // Wednesday 2024-03-13 rolls back to Monday 2024-03-11
    let start = ts("2024-03-13 00:00");
    let end = ts("2024-03-13 23:59");
    let buckets = generate_buckets(start, end, Granularity::Week);

    assert_eq!(buckets[0].start.date(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    assert_eq!(buckets[0].end.date(), NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
}

#[test]
fn top_beans_truncate_to_six_with_insertion_order_ties() {
    let now = ts("2024-03-14 15:00");
    let ratings = [5, 5, 5, 5, 5, 5, 4, 4, 4, 4];
    let records: Vec<BrewRecord> = ratings
        .iter()
        .enumerate()
        .map(|(i, &rating)| bean_brew("2024-03-12 08:00", &format!("bean-{:02}", i + 1), rating))
        .collect();

    let report = build_report_at(&records, &options(RangeSelector::Last7Days), &DefaultLabels, now);

    assert_eq!(report.top_beans.len(), 6);
    for (i, entry) in report.top_beans.iter().enumerate() {
        assert_eq!(entry.bean, format!("bean-{:02}", i + 1));
        assert_eq!(entry.avg_rating, 5.0);
        assert_eq!(entry.rated_count, 1);
    }
}

#[test]
fn rating_by_method_truncates_to_eight() {
    let now = ts("2024-03-14 15:00");
    let records: Vec<BrewRecord> = (0..10)
        .map(|i| {
            brew(
                "2024-03-12 08:00",
                &format!("method-{i}"),
                None,
                Some(1 + (i % 5) as u8),
            )
        })
        .collect();

    let report = build_report_at(&records, &options(RangeSelector::Last7Days), &DefaultLabels, now);

    assert_eq!(report.rating_by_method.len(), 8);
    // Sorted descending by mean rating
    for pair in report.rating_by_method.windows(2) {
        assert!(pair[0].avg_rating >= pair[1].avg_rating);
    }
}

#[test]
fn empty_history_yields_a_complete_report() {
    let now = ts("2024-03-14 15:00");
    let report = build_report_at(&[], &options(RangeSelector::Last7Days), &DefaultLabels, now);

    assert_eq!(report.total_brews, 0);
    assert_eq!(report.avg_rating, None);
    assert_eq!(report.total_grams, 0);
    assert!(report.favorite_method.is_none());

    assert_eq!(report.brews_over_time.len(), 7);
    assert!(report.brews_over_time.iter().all(|p| p.count == 0));
    assert!(report.consumption_over_time.iter().all(|p| p.grams == 0));
    assert!(report.rating_over_time.iter().all(|p| p.avg_rating.is_none()));

    assert!(report.method_distribution.is_empty());
    assert!(report.rating_by_method.is_empty());
    assert!(report.top_beans.is_empty());
    assert!(report.roast_distribution.is_empty());
    assert!(report.origin_distribution.is_empty());
}

#[test]
fn all_range_anchors_at_the_earliest_brew() {
    let now = ts("2024-03-14 15:00");
    let records = vec![
        brew("2024-01-20 08:00", "v60", None, None),
        brew("2024-03-10 08:00", "espresso", None, None),
    ];

    let report = build_report_at(&records, &options(RangeSelector::All), &DefaultLabels, now);

    let labels: Vec<&str> = report.brews_over_time.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["jan 24", "feb 24", "mar 24"]);
    let counts: Vec<u64> = report.brews_over_time.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![1, 0, 1]);
}

#[test]
fn all_range_with_no_records_falls_back_to_a_short_window() {
    let now = ts("2024-03-14 15:00");
    let report = build_report_at(&[], &options(RangeSelector::All), &DefaultLabels, now);

    // 29 days before 2024-03-14 is mid-February: two month buckets
    let labels: Vec<&str> = report.brews_over_time.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["feb 24", "mar 24"]);
    assert!(report.brews_over_time.iter().all(|p| p.count == 0));
}

#[test]
fn bucket_counts_conserve_the_filtered_total() {
    let now = ts("2024-03-14 15:00");
    let days = [
        "2023-12-20", "2023-12-31", "2024-01-05", "2024-01-05", "2024-02-01",
        "2024-02-14", "2024-02-29", "2024-03-01", "2024-03-13", "2024-03-14",
    ];
    let records: Vec<BrewRecord> = days
        .iter()
        .map(|d| brew(&format!("{d} 09:00"), "espresso", Some(18.0), Some(3)))
        .collect();

    let report = build_report_at(&records, &options(RangeSelector::Last90Days), &DefaultLabels, now);

    let bucketed: u64 = report.brews_over_time.iter().map(|p| p.count).sum();
    assert_eq!(bucketed, report.total_brews);
    assert_eq!(report.total_brews, 10);
}

#[test]
fn identical_inputs_produce_identical_reports() {
    let now = ts("2024-03-14 15:00");
    let records = vec![
        bean_brew("2024-03-10 08:00", "Gesha Village", 5),
        brew("2024-03-12 08:00", "espresso", Some(18.0), None),
    ];
    let opts = options(RangeSelector::Last30Days);

    let first = build_report_at(&records, &opts, &DefaultLabels, now);
    let second = build_report_at(&records, &opts, &DefaultLabels, now);
    assert_eq!(first, second);
}

#[test]
fn report_serializes_for_the_presentation_layer() {
    let now = ts("2024-03-14 15:00");
    let records = vec![brew("2024-03-12 08:00", "v60", Some(20.0), None)];

    let report = build_report_at(&records, &options(RangeSelector::Last7Days), &DefaultLabels, now);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["total_brews"], 1);
    assert!(value["avg_rating"].is_null());
    assert_eq!(value["favorite_method"]["label"], "V60");
    // Unrated buckets serialize as null so charts render gaps, not zeros
    assert!(value["rating_over_time"][0]["avg_rating"].is_null());
}
