//! Display-label lookup for categorical keys
//!
//! The aggregation code never hardcodes the set of known brew methods or
//! roast levels; it resolves display labels through this trait so the
//! engine can be tested with synthetic tables and extended without
//! touching report logic. Unknown keys fall back to the raw key at the
//! call site.

/// Resolves display labels for the categorical keys carried by brew
/// records.
pub trait LabelLookup {
    /// Display label for a brew-method key, if known
    fn method_label(&self, key: &str) -> Option<&str>;

    /// Display label for a roast-level key, if known
    fn roast_label(&self, key: &str) -> Option<&str>;
}

/// The application's built-in method and roast tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

const METHOD_LABELS: &[(&str, &str)] = &[
    ("v60", "V60"),
    ("chemex", "Chemex"),
    ("aeropress", "AeroPress"),
    ("french_press", "French Press"),
    ("espresso", "Espresso"),
    ("moka", "Moka Pot"),
    ("cold_brew", "Cold Brew"),
    ("siphon", "Siphon"),
    ("kalita", "Kalita Wave"),
    ("turkish", "Turkish"),
    ("batch", "Batch Brewer"),
];

const ROAST_LABELS: &[(&str, &str)] = &[
    ("light", "Light"),
    ("medium_light", "Medium Light"),
    ("medium", "Medium"),
    ("medium_dark", "Medium Dark"),
    ("dark", "Dark"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, label)| *label)
}

impl LabelLookup for DefaultLabels {
    fn method_label(&self, key: &str) -> Option<&str> {
        lookup(METHOD_LABELS, key)
    }

    fn roast_label(&self, key: &str) -> Option<&str> {
        lookup(ROAST_LABELS, key)
    }
}
