//! Analytics aggregation engine
//!
//! This module computes the journal's analytics dashboard from the user's
//! materialized brew history: KPIs, calendar-bucketed time series, and
//! distribution/ranking lists.
//!
//! The engine is a pure synchronous computation — it owns no state,
//! performs no I/O, and never fails. Degenerate inputs (empty history,
//! pathological date ranges) produce a structurally complete report with
//! empty/`None`/zero fields so the presentation layer never has to
//! special-case a failure path.

pub mod buckets;
pub mod grouping;
pub mod models;
pub mod range;
pub mod report;

// Re-export the types that make up the engine's public surface
pub use buckets::{generate_buckets, TimeBucket};
pub use models::{Granularity, ParseRangeError, RangeSelector, ReportOptions};
pub use range::{resolve, resolve_at, ResolvedRange};
pub use report::{build_report, build_report_at, AnalyticsReport};
