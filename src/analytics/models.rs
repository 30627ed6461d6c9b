//! Report options and range-selection types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbolic date-range selector as presented by the report controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeSelector {
    /// Last 7 calendar days (inclusive window)
    #[serde(rename = "7d")]
    Last7Days,

    /// Last 30 calendar days
    #[serde(rename = "30d")]
    Last30Days,

    /// Last 90 calendar days
    #[serde(rename = "90d")]
    Last90Days,

    /// One calendar year back
    #[serde(rename = "1y")]
    LastYear,

    /// The whole journal history (unbounded lower bound)
    #[serde(rename = "all")]
    All,
}

impl RangeSelector {
    /// Bucket granularity for this selector.
    ///
    /// A fixed lookup, not derived from the actual span: `All` is always
    /// month-bucketed even when the history covers less than a year.
    pub fn granularity(self) -> Granularity {
        match self {
            Self::Last7Days | Self::Last30Days => Granularity::Day,
            Self::Last90Days => Granularity::Week,
            Self::LastYear | Self::All => Granularity::Month,
        }
    }

    /// The selector value as it appears in the report controls
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
            Self::LastYear => "1y",
            Self::All => "all",
        }
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a user-supplied range-selector string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown range selector '{0}'")]
pub struct ParseRangeError(pub String);

impl FromStr for RangeSelector {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(Self::Last7Days),
            "30d" => Ok(Self::Last30Days),
            "90d" => Ok(Self::Last90Days),
            "1y" => Ok(Self::LastYear),
            "all" => Ok(Self::All),
            other => Err(ParseRangeError(other.to_string())),
        }
    }
}

/// Time-bucket size used for the report's time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

/// Options for one report request, parsed from the user-facing controls.
/// Constructed fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Requested date range
    pub range: RangeSelector,

    /// Restrict the report to one brew method. `None` and the sentinel
    /// `"all"` both mean "no filter".
    pub method_filter: Option<String>,
}
