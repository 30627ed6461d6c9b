//! Report assembly
//!
//! Orchestrates range resolution, bucket generation, and grouping against
//! the caller-supplied record collection to produce the complete
//! `AnalyticsReport`. One filtering pass is shared by every sub-report;
//! each sub-report is then derived independently from that filtered set.

use chrono::{Days, Local, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::analytics::buckets::{generate_buckets, start_of_day, TimeBucket};
use crate::analytics::grouping::{max_tally, GroupBy, Mean, Sum, Tally};
use crate::analytics::models::ReportOptions;
use crate::analytics::range::resolve_at;
use crate::labels::LabelLookup;
use crate::models::BrewRecord;

/// Method filter value meaning "no filter", as sent by the controls
const METHOD_FILTER_ALL: &str = "all";

/// Fallback chart window when the range is unbounded and the journal is
/// empty: 29 days back, so an empty history still renders a
/// non-degenerate chart
const EMPTY_HISTORY_FALLBACK_DAYS: u64 = 29;

/// A brew-method entry with its display label and brew count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCount {
    pub method: String,
    pub label: String,
    pub count: u64,
}

/// Mean rating for one brew method, over its rated brews only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodRating {
    pub method: String,
    pub label: String,
    pub avg_rating: f64,
    pub rated_count: u64,
}

/// Mean rating for one bean, over its rated brews only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeanRating {
    pub bean: String,
    pub avg_rating: f64,
    pub rated_count: u64,
}

/// Brew count for one roast level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastCount {
    pub roast: String,
    pub label: String,
    pub count: u64,
}

/// Brew count for one origin country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginCount {
    pub country: String,
    pub count: u64,
}

/// One point of the brews-per-bucket series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountPoint {
    pub label: String,
    pub count: u64,
}

/// One point of the grams-per-bucket series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GramsPoint {
    pub label: String,
    pub grams: i64,
}

/// One point of the rating-per-bucket series. `avg_rating` is `None` when
/// the bucket holds no rated brews, so it renders as a gap rather than a
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingPoint {
    pub label: String,
    pub avg_rating: Option<f64>,
}

/// The complete analytics report the presentation layer consumes.
/// A plain value: fully computed, immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_brews: u64,
    pub avg_rating: Option<f64>,
    pub total_grams: i64,
    pub favorite_method: Option<MethodCount>,

    pub brews_over_time: Vec<CountPoint>,
    pub consumption_over_time: Vec<GramsPoint>,
    pub rating_over_time: Vec<RatingPoint>,

    pub method_distribution: Vec<MethodCount>,
    pub rating_by_method: Vec<MethodRating>,
    pub top_beans: Vec<BeanRating>,
    pub roast_distribution: Vec<RoastCount>,
    pub origin_distribution: Vec<OriginCount>,
}

/// Build the analytics report for the current local time.
pub fn build_report(
    records: &[BrewRecord],
    options: &ReportOptions,
    labels: &dyn LabelLookup,
) -> AnalyticsReport {
    build_report_at(records, options, labels, Local::now().naive_local())
}

/// Build the analytics report against an explicit "now".
///
/// Total over its input domain: any record collection and any options
/// value produce a structurally complete report, never an error.
pub fn build_report_at(
    records: &[BrewRecord],
    options: &ReportOptions,
    labels: &dyn LabelLookup,
    now: NaiveDateTime,
) -> AnalyticsReport {
    let resolved = resolve_at(options.range, now);
    let method_filter = options
        .method_filter
        .as_deref()
        .filter(|method| *method != METHOD_FILTER_ALL);

    let filtered: Vec<&BrewRecord> = records
        .iter()
        .filter(|record| record.brewed_at <= resolved.end)
        .filter(|record| resolved.start.map_or(true, |start| record.brewed_at >= start))
        .filter(|record| method_filter.map_or(true, |method| record.brew_method == method))
        .collect();

    // Unbounded ranges anchor the chart at the earliest brew; an empty
    // journal falls back to a fixed window so the chart is never degenerate
    let effective_start = resolved
        .start
        .or_else(|| filtered.iter().map(|record| record.brewed_at).min())
        .unwrap_or_else(|| {
            start_of_day(
                resolved
                    .end
                    .date()
                    .checked_sub_days(Days::new(EMPTY_HISTORY_FALLBACK_DAYS))
                    .unwrap_or_else(|| resolved.end.date()),
            )
        });

    let buckets = generate_buckets(effective_start, resolved.end, resolved.granularity);
    debug!(
        "Building analytics report: {} of {} records in range, {} buckets",
        filtered.len(),
        records.len(),
        buckets.len()
    );

    // Accumulators for every sub-report, filled in a single pass so the
    // first-seen group order is the records' original order
    let mut overall_rating = Mean::default();
    let mut overall_grams = Sum::default();
    let mut methods: GroupBy<String, Tally> = GroupBy::new();
    let mut method_ratings: GroupBy<String, Mean> = GroupBy::new();
    let mut bean_ratings: GroupBy<String, Mean> = GroupBy::new();
    let mut roasts: GroupBy<String, Tally> = GroupBy::new();
    let mut origins: GroupBy<String, Tally> = GroupBy::new();

    let mut bucket_counts = vec![0u64; buckets.len()];
    let mut bucket_grams = vec![Sum::default(); buckets.len()];
    let mut bucket_ratings = vec![Mean::default(); buckets.len()];

    for record in &filtered {
        methods.update(record.brew_method.clone(), Tally::bump);

        if let Some(dose) = record.dose_grams {
            overall_grams.add(dose);
        }

        if let Some(rating) = record.rating {
            overall_rating.push(f64::from(rating));
            method_ratings.update(record.brew_method.clone(), |mean| mean.push(f64::from(rating)));
            if let Some(bean) = &record.bean_name {
                bean_ratings.update(bean.clone(), |mean| mean.push(f64::from(rating)));
            }
        }

        if let Some(roast) = &record.bean_roast_level {
            roasts.update(roast.clone(), Tally::bump);
        }
        if let Some(origin) = &record.bean_origin_country {
            origins.update(origin.clone(), Tally::bump);
        }

        if let Some(idx) = bucket_index(&buckets, record.brewed_at) {
            bucket_counts[idx] += 1;
            if let Some(dose) = record.dose_grams {
                bucket_grams[idx].add(dose);
            }
            if let Some(rating) = record.rating {
                bucket_ratings[idx].push(f64::from(rating));
            }
        }
    }

    let method_counts = methods.into_entries();

    let favorite_method = max_tally(&method_counts).map(|(method, tally)| MethodCount {
        label: method_label(labels, method),
        method: method.clone(),
        count: tally.count,
    });

    let mut method_distribution: Vec<MethodCount> = method_counts
        .iter()
        .map(|(method, tally)| MethodCount {
            label: method_label(labels, method),
            method: method.clone(),
            count: tally.count,
        })
        .collect();
    method_distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let mut rating_by_method: Vec<MethodRating> = method_ratings
        .into_entries()
        .into_iter()
        .filter_map(|(method, mean)| {
            mean.rounded().map(|avg_rating| MethodRating {
                label: method_label(labels, &method),
                method,
                avg_rating,
                rated_count: mean.samples(),
            })
        })
        .collect();
    rating_by_method.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
    rating_by_method.truncate(8);

    let mut top_beans: Vec<BeanRating> = bean_ratings
        .into_entries()
        .into_iter()
        .filter_map(|(bean, mean)| {
            mean.rounded().map(|avg_rating| BeanRating {
                bean,
                avg_rating,
                rated_count: mean.samples(),
            })
        })
        .collect();
    top_beans.sort_by(|a, b| {
        b.avg_rating
            .total_cmp(&a.avg_rating)
            .then(b.rated_count.cmp(&a.rated_count))
    });
    top_beans.truncate(6);

    let mut roast_distribution: Vec<RoastCount> = roasts
        .into_entries()
        .into_iter()
        .map(|(roast, tally)| RoastCount {
            label: labels.roast_label(&roast).unwrap_or(&roast).to_string(),
            roast,
            count: tally.count,
        })
        .collect();
    roast_distribution.sort_by(|a, b| b.count.cmp(&a.count));

    let mut origin_distribution: Vec<OriginCount> = origins
        .into_entries()
        .into_iter()
        .map(|(country, tally)| OriginCount {
            country,
            count: tally.count,
        })
        .collect();
    origin_distribution.sort_by(|a, b| b.count.cmp(&a.count));
    origin_distribution.truncate(8);

    AnalyticsReport {
        total_brews: filtered.len() as u64,
        avg_rating: overall_rating.rounded(),
        total_grams: overall_grams.rounded(),
        favorite_method,

        brews_over_time: buckets
            .iter()
            .zip(&bucket_counts)
            .map(|(bucket, count)| CountPoint {
                label: bucket.label.clone(),
                count: *count,
            })
            .collect(),
        consumption_over_time: buckets
            .iter()
            .zip(&bucket_grams)
            .map(|(bucket, grams)| GramsPoint {
                label: bucket.label.clone(),
                grams: grams.rounded(),
            })
            .collect(),
        rating_over_time: buckets
            .iter()
            .zip(&bucket_ratings)
            .map(|(bucket, mean)| RatingPoint {
                label: bucket.label.clone(),
                avg_rating: mean.rounded(),
            })
            .collect(),

        method_distribution,
        rating_by_method,
        top_beans,
        roast_distribution,
        origin_distribution,
    }
}

/// The bucket containing `at`, by binary search on the sorted bucket
/// starts. `None` when `at` falls outside every bucket.
fn bucket_index(buckets: &[TimeBucket], at: NaiveDateTime) -> Option<usize> {
    let idx = buckets.partition_point(|bucket| bucket.start <= at);
    let idx = idx.checked_sub(1)?;
    (at <= buckets[idx].end).then_some(idx)
}

fn method_label(labels: &dyn LabelLookup, key: &str) -> String {
    labels.method_label(key).unwrap_or(key).to_string()
}
