//! Data models for the brew journal

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single logged brew, denormalized with the attributes of the bean it
/// references (if any). This is what the record store hands the analytics
/// engine: already scoped to the requesting user, already joined against
/// the bean entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewRecord {
    /// When the brew happened (local wall clock). Authoritative for all
    /// date filtering and bucketing.
    pub brewed_at: NaiveDateTime,

    /// Brew-method key (e.g., "v60", "espresso")
    pub brew_method: String,

    /// Coffee dose in grams, when logged
    pub dose_grams: Option<f64>,

    /// Rating in [1, 5]; `None` means "not rated", never zero
    pub rating: Option<u8>,

    /// Bean name, when the brew references a bean
    pub bean_name: Option<String>,

    /// Roast-level key of the referenced bean (e.g., "medium_dark")
    pub bean_roast_level: Option<String>,

    /// Origin country of the referenced bean
    pub bean_origin_country: Option<String>,
}
